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

/// Errors produced while generating a striped image.
///
/// Every stage fails fast; no partial output is ever returned alongside
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// Configuration was rejected before any pixel work.
    #[error("invalid strip configuration: {0}")]
    Config(String),

    /// The source image could not be read or parsed.
    #[error("failed to decode image")]
    Decode(#[source] image::ImageError),

    /// The partitioner produced no usable strips.
    #[error("image is too small to cut into strips")]
    EmptyResult,

    /// The composed image could not be written.
    #[error("failed to encode image")]
    Encode(#[source] image::ImageError),
}

impl StripError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
