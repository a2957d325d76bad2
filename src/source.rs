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

use image::error::{ParameterError, ParameterErrorKind};
use image::{DynamicImage, GrayImage, ImageError, RgbImage};
use ndarray::prelude::*;

use crate::error::StripError;

/// Color layout of a [`SourceImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Gray,
}

impl ColorMode {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Gray => 1,
        }
    }
}

/// Decoded source pixels, shaped `(height, width, channels)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: Array3<u8>,
    mode: ColorMode,
}

fn shape_error() -> StripError {
    StripError::Decode(ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    )))
}

impl SourceImage {
    /// Convert a decoded image, keeping single-channel images as grayscale.
    /// Alpha is discarded.
    pub fn from_dynamic(im: &DynamicImage) -> Result<Self, StripError> {
        if im.color().has_color() {
            Self::from_rgb(im.to_rgb8())
        } else {
            Self::from_luma(im.to_luma8())
        }
    }

    pub fn from_rgb(im: RgbImage) -> Result<Self, StripError> {
        let (w, h) = im.dimensions();
        let pixels = Array3::from_shape_vec((h as usize, w as usize, 3), im.into_raw())
            .map_err(|_| shape_error())?;
        Ok(Self {
            pixels,
            mode: ColorMode::Rgb,
        })
    }

    pub fn from_luma(im: GrayImage) -> Result<Self, StripError> {
        let (w, h) = im.dimensions();
        let pixels = Array3::from_shape_vec((h as usize, w as usize, 1), im.into_raw())
            .map_err(|_| shape_error())?;
        Ok(Self {
            pixels,
            mode: ColorMode::Gray,
        })
    }

    pub fn width(&self) -> usize {
        self.pixels.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.pixels.len_of(Axis(0))
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// Single-channel copy using ITU-R 601-2 luma weights.
    pub fn to_grayscale(&self) -> Self {
        if self.mode == ColorMode::Gray {
            return self.clone();
        }

        let gray = self
            .pixels
            .map_axis(Axis(2), |px| luma(px[0], px[1], px[2]));
        Self {
            pixels: gray.insert_axis(Axis(2)),
            mode: ColorMode::Gray,
        }
    }
}

/// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, in 16-bit fixed point.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let l = (r as u32) * 19595 + (g as u32) * 38470 + (b as u32) * 7471 + 0x8000;
    (l >> 16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgb, Rgba};

    #[test]
    fn rgb_layout() {
        let im = RgbImage::from_fn(4, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        let src = SourceImage::from_rgb(im).unwrap();

        assert_eq!((src.width(), src.height()), (4, 2));
        assert_eq!(src.mode(), ColorMode::Rgb);
        assert_eq!(src.pixels().shape()[2], src.mode().channels());
        assert_eq!(src.pixels()[[1, 3, 0]], 3);
        assert_eq!(src.pixels()[[1, 3, 1]], 1);
        assert_eq!(src.pixels()[[1, 3, 2]], 9);
    }

    #[test]
    fn dynamic_keeps_gray() {
        let im = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(3, 3, LumaA([7, 0])));
        let src = SourceImage::from_dynamic(&im).unwrap();
        assert_eq!(src.mode(), ColorMode::Gray);
        assert_eq!(src.pixels().shape(), &[3, 3, 1]);
        assert!(src.pixels().iter().all(|&v| v == 7));
    }

    #[test]
    fn dynamic_drops_alpha() {
        let im = DynamicImage::ImageRgba8(image::ImageBuffer::from_pixel(2, 5, Rgba([1, 2, 3, 4])));
        let src = SourceImage::from_dynamic(&im).unwrap();
        assert_eq!(src.mode(), ColorMode::Rgb);
        assert_eq!(src.pixels().shape(), &[5, 2, 3]);
    }

    #[test]
    fn luma_weights() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn grayscale_conversion() {
        let im = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 80, y as u8 * 100, 40]));
        let src = SourceImage::from_rgb(im.clone()).unwrap();
        let gray = src.to_grayscale();

        assert_eq!(gray.mode(), ColorMode::Gray);
        assert_eq!(gray.pixels().shape(), &[2, 3, 1]);
        for (x, y, &Rgb([r, g, b])) in im.enumerate_pixels() {
            assert_eq!(gray.pixels()[[y as usize, x as usize, 0]], luma(r, g, b));
        }

        let again = gray.to_grayscale();
        assert_eq!(again, gray);
    }
}
