//! Library to slice an image into strips and stitch them back together.
//!
//! The main entry point is [generate]. It runs three stages in order:
//!
//! * [partition](partition::partition) cuts the source into strips,
//!   either a fixed number of equal strips or random-width ones.
//! * [arrange](arrange::arrange) shuffles the strips and optionally
//!   puts a solid-color separator between each pair.
//! * [composite](composite::composite) pastes everything onto a new
//!   RGB canvas.
//!
//! All randomness comes from a caller-supplied [rand::Rng], so a seeded
//! generator gives reproducible output.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

pub mod arrange;
pub mod codec;
pub mod composite;
pub mod config;
mod error;
pub mod partition;
pub mod source;

use std::borrow::Cow;

use rand::Rng;

#[doc(inline)]
pub use crate::arrange::{Arrangement, BlankStrip, Piece};
#[doc(inline)]
pub use crate::composite::Canvas;
#[doc(inline)]
pub use crate::config::{ConfigBuilder, CutAxis, PartitionMode, StripConfig};
#[doc(inline)]
pub use crate::error::StripError;
#[doc(inline)]
pub use crate::partition::Strip;
#[doc(inline)]
pub use crate::source::{ColorMode, SourceImage};

/// Cut, shuffle and reassemble `source` according to `config`.
///
/// The source is converted to grayscale first if requested. The result
/// is always RGB.
///
/// # Errors
///
/// Returns [`StripError::EmptyResult`] if the source is too small to
/// produce any strip, and [`StripError::Config`] if separators make the
/// canvas too large. Nothing is composited in either case.
pub fn generate<R>(
    source: &SourceImage,
    config: &StripConfig,
    random: &mut R,
) -> Result<Canvas, StripError>
where
    R: Rng + ?Sized,
{
    let source = if config.grayscale() {
        Cow::Owned(source.to_grayscale())
    } else {
        Cow::Borrowed(source)
    };

    let strips = partition::partition(&source, config, random)?;
    let cross = source.pixels().len_of(config.axis().cross_axis());
    let arrangement = arrange::arrange(strips, cross, config, random)?;

    Ok(composite::composite(arrangement))
}
