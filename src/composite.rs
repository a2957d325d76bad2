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

use image::RgbImage;
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::arrange::Arrangement;

/// Composed RGB output, shaped `(height, width, 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Array3<u8>,
}

impl Canvas {
    pub fn width(&self) -> usize {
        self.pixels.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.pixels.len_of(Axis(0))
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub fn into_image(self) -> RgbImage {
        let (w, h) = (self.width() as u32, self.height() as u32);
        RgbImage::from_raw(w, h, self.pixels.into_raw_vec())
            .expect("Canvas should be standard-layout")
    }
}

/// Paste every piece of `arrangement` onto a fresh RGB canvas.
///
/// Pieces are laid out back to back along the cut axis in arrangement
/// order. Grayscale pieces are broadcast across all three channels.
pub fn composite(arrangement: Arrangement) -> Canvas {
    let axis = arrangement.axis().array_axis();
    let mut pixels = Array3::zeros((arrangement.height(), arrangement.width(), 3));
    let pieces = arrangement.into_pieces();

    // Carve the canvas into disjoint slots first, then fill them.
    let mut slots = Vec::with_capacity(pieces.len());
    let mut rest = pixels.view_mut();
    for p in &pieces {
        let (slot, tail) = rest.split_at(axis, p.thickness());
        slots.push((slot, p));
        rest = tail;
    }
    debug_assert_eq!(rest.len_of(axis), 0);

    slots
        .into_par_iter()
        .for_each(|(mut slot, p)| slot.assign(&p.pixels()));

    Canvas { pixels }
}
