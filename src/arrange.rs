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

use std::sync::Arc;

use image::Rgb;
use ndarray::prelude::*;
use rand::prelude::*;

use crate::config::{CutAxis, StripConfig};
use crate::error::StripError;
use crate::partition::Strip;

/// Byte size of an RGB buffer `thickness` by `cross` pixels.
///
/// Fails if the buffer cannot be addressed.
fn rgb_len(thickness: usize, cross: usize) -> Result<usize, StripError> {
    thickness
        .checked_mul(cross)
        .and_then(|n| n.checked_mul(3))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or_else(|| StripError::config(format!("{thickness}x{cross} image is too large")))
}

/// Solid-color separator placed between strips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankStrip {
    pixels: Array3<u8>,
    thickness: usize,
}

impl BlankStrip {
    /// # Errors
    ///
    /// Returns [`StripError::Config`] if the strip cannot be allocated.
    pub fn new(
        axis: CutAxis,
        thickness: usize,
        cross: usize,
        color: Rgb<u8>,
    ) -> Result<Self, StripError> {
        let mut shape = [0, 0, 3];
        shape[axis.array_axis().index()] = thickness;
        shape[axis.cross_axis().index()] = cross;

        let len = rgb_len(thickness, cross)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| {
            StripError::config(format!("cannot allocate {thickness}x{cross} blank strip"))
        })?;
        buf.extend(color.0.iter().copied().cycle().take(len));

        let pixels = Array3::from_shape_vec(shape, buf)
            .map_err(|e| StripError::config(format!("blank strip: {e}")))?;
        Ok(Self { pixels, thickness })
    }

    pub fn thickness(&self) -> usize {
        self.thickness
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

/// One placeable element of an [`Arrangement`].
///
/// All blanks of an arrangement share one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Strip(Strip),
    Blank(Arc<BlankStrip>),
}

impl Piece {
    pub fn thickness(&self) -> usize {
        match self {
            Self::Strip(s) => s.thickness(),
            Self::Blank(b) => b.thickness(),
        }
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        match self {
            Self::Strip(s) => s.pixels(),
            Self::Blank(b) => b.pixels(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }
}

/// Final piece order plus the canvas size it fills.
///
/// Piece thicknesses sum to the canvas extent along the cut axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    axis: CutAxis,
    pieces: Vec<Piece>,
    width: usize,
    height: usize,
}

impl Arrangement {
    pub fn axis(&self) -> CutAxis {
        self.axis
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Canvas extent along the cut axis.
    pub fn thickness(&self) -> usize {
        match self.axis {
            CutAxis::Horizontal => self.height,
            CutAxis::Vertical => self.width,
        }
    }

    pub(crate) fn into_pieces(self) -> Vec<Piece> {
        self.pieces
    }
}

/// Shuffle `strips` and interleave separators if enabled.
///
/// `cross` is the source extent across the cut axis.
///
/// # Errors
///
/// Returns [`StripError::Config`] if the separators make the canvas too
/// large to address or allocate.
pub fn arrange<R>(
    mut strips: Vec<Strip>,
    cross: usize,
    config: &StripConfig,
    random: &mut R,
) -> Result<Arrangement, StripError>
where
    R: Rng + ?Sized,
{
    let axis = config.axis();
    strips.shuffle(&mut *random);

    let mut thickness: usize = strips.iter().map(Strip::thickness).sum();

    let pieces = match config.blank() {
        Some((width, color)) if strips.len() > 1 => {
            thickness = width
                .checked_mul(strips.len() - 1)
                .and_then(|n| n.checked_add(thickness))
                .ok_or_else(|| StripError::config("blank strips make the canvas too large"))?;
            rgb_len(thickness, cross)?;
            let blank = Arc::new(BlankStrip::new(axis, width, cross, color)?);

            let mut ret = Vec::with_capacity(strips.len() * 2 - 1);
            for (i, s) in strips.into_iter().enumerate() {
                if i > 0 {
                    ret.push(Piece::Blank(blank.clone()));
                }
                ret.push(Piece::Strip(s));
            }
            ret
        }
        _ => strips.into_iter().map(Piece::Strip).collect(),
    };

    let (width, height) = match axis {
        CutAxis::Horizontal => (cross, thickness),
        CutAxis::Vertical => (thickness, cross),
    };

    Ok(Arrangement {
        axis,
        pieces,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::ConfigBuilder;
    use crate::partition::partition;
    use crate::source::SourceImage;
    use image::RgbImage;
    use rand_xoshiro::Xoshiro256StarStar;

    // Strip `i` has its first red sample set to `i`.
    fn strips(n: u32, config: &StripConfig, random: &mut Xoshiro256StarStar) -> Vec<Strip> {
        let im = RgbImage::from_fn(n * 2, n * 2, |x, y| match config.axis() {
            CutAxis::Vertical => Rgb([(x / 2) as u8, 0, 0]),
            CutAxis::Horizontal => Rgb([(y / 2) as u8, 0, 0]),
        });
        let source = SourceImage::from_rgb(im).unwrap();
        partition(&source, config, random).unwrap()
    }

    fn order(arr: &Arrangement) -> Vec<u8> {
        arr.pieces()
            .iter()
            .filter(|p| !p.is_blank())
            .map(|p| p.pixels()[[0, 0, 0]])
            .collect()
    }

    #[test]
    fn blank_interleave() {
        let mut random = Xoshiro256StarStar::seed_from_u64(7);
        let config = ConfigBuilder::new()
            .strip_count(5)
            .insert_blank(true)
            .blank_width(3)
            .blank_color(Rgb([10, 20, 30]))
            .build()
            .unwrap();
        let arr = arrange(strips(5, &config, &mut random), 10, &config, &mut random).unwrap();

        let pieces = arr.pieces();
        assert_eq!(pieces.len(), 9);
        assert_eq!(pieces.iter().filter(|p| p.is_blank()).count(), 4);
        assert!(!pieces[0].is_blank());
        assert!(!pieces[8].is_blank());
        for (i, p) in pieces.iter().enumerate() {
            assert_eq!(p.is_blank(), i % 2 == 1);
            if p.is_blank() {
                assert_eq!(p.thickness(), 3);
                assert_eq!(p.pixels().shape(), &[10, 3, 3]);
                assert_eq!(p.pixels()[[9, 2, 1]], 20);
            }
        }

        assert_eq!(arr.width(), 5 * 2 + 4 * 3);
        assert_eq!(arr.height(), 10);
        assert_eq!(arr.thickness(), pieces.iter().map(Piece::thickness).sum::<usize>());
    }

    #[test]
    fn horizontal_blank_shape() {
        let mut random = Xoshiro256StarStar::seed_from_u64(7);
        let config = ConfigBuilder::new()
            .axis(CutAxis::Horizontal)
            .strip_count(3)
            .insert_blank(true)
            .blank_width(4)
            .build()
            .unwrap();
        let arr = arrange(strips(3, &config, &mut random), 6, &config, &mut random).unwrap();

        assert_eq!(arr.pieces()[1].pixels().shape(), &[4, 6, 3]);
        assert_eq!((arr.width(), arr.height()), (6, 3 * 2 + 2 * 4));
    }

    #[test]
    fn single_strip_gets_no_blank() {
        let config = ConfigBuilder::new()
            .random(true)
            .size_range(8, 9)
            .insert_blank(true)
            .build()
            .unwrap();
        let mut random = Xoshiro256StarStar::seed_from_u64(0);
        let source = SourceImage::from_rgb(RgbImage::new(10, 2)).unwrap();
        let strips = partition(&source, &config, &mut random).unwrap();
        assert_eq!(strips.len(), 1);

        let arr = arrange(strips, 2, &config, &mut random).unwrap();
        assert_eq!(arr.pieces().len(), 1);
        assert_eq!(arr.width(), arr.pieces()[0].thickness());
    }

    #[test]
    fn no_blank_total() {
        let mut random = Xoshiro256StarStar::seed_from_u64(3);
        let config = ConfigBuilder::new().strip_count(4).build().unwrap();
        let arr = arrange(strips(4, &config, &mut random), 8, &config, &mut random).unwrap();

        assert_eq!(arr.pieces().len(), 4);
        assert_eq!((arr.width(), arr.height()), (8, 8));

        let mut seen = order(&arr);
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_permutation_reachable() {
        let mut random = Xoshiro256StarStar::seed_from_u64(12345);
        let config = ConfigBuilder::new().strip_count(3).build().unwrap();

        let mut seen = HashSet::new();
        for _ in 0..600 {
            let arr = arrange(strips(3, &config, &mut random), 6, &config, &mut random).unwrap();
            seen.insert(order(&arr));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn seeded_is_reproducible() {
        let config = ConfigBuilder::new().strip_count(8).build().unwrap();

        let run = |seed| {
            let mut random = Xoshiro256StarStar::seed_from_u64(seed);
            order(&arrange(strips(8, &config, &mut random), 16, &config, &mut random).unwrap())
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn oversized_blank_is_error() {
        let mut random = Xoshiro256StarStar::seed_from_u64(0);
        for width in [usize::MAX / 2, usize::MAX / 8, isize::MAX as usize / 4] {
            let config = ConfigBuilder::new()
                .strip_count(3)
                .insert_blank(true)
                .blank_width(width)
                .build()
                .unwrap();
            let res = arrange(strips(3, &config, &mut random), 6, &config, &mut random);
            assert!(matches!(res, Err(StripError::Config(_))), "width {width}");
        }
    }

    #[test]
    fn blank_strip_too_large() {
        let res = BlankStrip::new(CutAxis::Vertical, usize::MAX, 2, Rgb([0, 0, 0]));
        assert!(matches!(res, Err(StripError::Config(_))));

        let blank = BlankStrip::new(CutAxis::Horizontal, 2, 3, Rgb([4, 5, 6])).unwrap();
        assert_eq!(blank.pixels().shape(), &[2, 3, 3]);
        assert_eq!(blank.pixels()[[1, 2, 0]], 4);
        assert_eq!(blank.pixels()[[1, 2, 2]], 6);
    }
}
