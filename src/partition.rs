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

use std::ops::Range;

use ndarray::prelude::*;
use ndarray::Slice;
use rand::prelude::*;

use crate::config::{PartitionMode, StripConfig};
use crate::error::StripError;
use crate::source::SourceImage;

/// An owned slice of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pixels: Array3<u8>,
    thickness: usize,
}

impl Strip {
    /// Extent along the cut axis.
    pub fn thickness(&self) -> usize {
        self.thickness
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

/// Compute strip spans along a dimension of length `dim`.
///
/// Fixed mode drops the integer division remainder. Random mode never
/// emits a trailing strip thinner than `min`, so the uncovered tail is
/// always shorter than `min`.
pub fn spans<R>(dim: usize, mode: PartitionMode, random: &mut R) -> Vec<Range<usize>>
where
    R: Rng + ?Sized,
{
    match mode {
        PartitionMode::Fixed { count } => {
            let size = dim / count;
            if size == 0 {
                return Vec::new();
            }
            (0..count).map(|i| i * size..(i + 1) * size).collect()
        }
        PartitionMode::Random { min, max } => {
            let mut ret = Vec::new();
            let mut offset = 0;
            while offset < dim {
                let mut size = random.gen_range(min..=max);
                if offset + size > dim {
                    size = dim - offset;
                    if size < min {
                        break;
                    }
                }

                ret.push(offset..offset + size);
                offset += size;
            }
            ret
        }
    }
}

/// Cut `source` into strips along the configured axis.
///
/// # Errors
///
/// Returns [`StripError::EmptyResult`] if the image is too small to
/// yield a single non-empty strip.
pub fn partition<R>(
    source: &SourceImage,
    config: &StripConfig,
    random: &mut R,
) -> Result<Vec<Strip>, StripError>
where
    R: Rng + ?Sized,
{
    let axis = config.axis().array_axis();
    let pixels = source.pixels();
    let spans = spans(pixels.len_of(axis), config.mode(), random);

    if spans.iter().all(|r| r.is_empty()) {
        return Err(StripError::EmptyResult);
    }

    Ok(spans
        .into_iter()
        .map(|r| Strip {
            thickness: r.len(),
            pixels: pixels.slice_axis(axis, Slice::from(r)).to_owned(),
        })
        .collect())
}
