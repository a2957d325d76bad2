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

//! Reading source images and writing composed output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::io::Reader as ImageReader;
use image::{ColorType, ImageError};

use crate::composite::Canvas;
use crate::error::StripError;
use crate::source::SourceImage;

/// Decode the image at `path`. Format is detected from content.
///
/// # Errors
///
/// Any failure to open or parse the file is a [`StripError::Decode`].
pub fn open(path: impl AsRef<Path>) -> Result<SourceImage, StripError> {
    let file = File::open(path).map_err(|e| StripError::Decode(e.into()))?;
    let im = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| StripError::Decode(e.into()))?
        .decode()
        .map_err(StripError::Decode)?;

    SourceImage::from_dynamic(&im)
}

/// Write `canvas` to `path` as an RGB JPEG.
///
/// # Errors
///
/// Returns [`StripError::Config`] if the destination directory does not
/// exist, and [`StripError::Encode`] if writing fails.
pub fn save_jpeg(canvas: &Canvas, path: impl AsRef<Path>, quality: u8) -> Result<(), StripError> {
    let path = path.as_ref();
    check_destination(path)?;

    let file = File::create(path).map_err(|e| StripError::Encode(e.into()))?;
    let mut writer = BufWriter::new(file);

    let pixels = canvas.pixels();
    let data = pixels
        .as_slice()
        .ok_or_else(|| {
            StripError::Encode(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            )))
        })?;
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
        .encode(
            data,
            canvas.width() as u32,
            canvas.height() as u32,
            ColorType::Rgb8,
        )
        .map_err(StripError::Encode)?;

    writer
        .flush()
        .map_err(|e| StripError::Encode(ImageError::IoError(e)))
}

/// Reject destinations whose parent directory is missing.
pub fn check_destination(path: &Path) -> Result<(), StripError> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(StripError::config(format!(
            "output path {} is not a file",
            path.display()
        )));
    }

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(StripError::config(
            format!("output directory {} does not exist", dir.display()),
        )),
        _ => Ok(()),
    }
}
