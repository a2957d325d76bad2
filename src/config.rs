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

use std::fmt;
use std::str::FromStr;

use image::Rgb;
use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::error::StripError;

/// Axis along which the image is cut.
///
/// Vertical cuts produce strips laid out left-to-right,
/// horizontal cuts produce strips stacked top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutAxis {
    Horizontal,
    #[default]
    Vertical,
}

impl CutAxis {
    /// Array axis that strips are cut along, for `(height, width, channel)` arrays.
    pub fn array_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis(0),
            Self::Vertical => Axis(1),
        }
    }

    /// Array axis whose extent is shared by every strip.
    pub fn cross_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis(1),
            Self::Vertical => Axis(0),
        }
    }
}

impl fmt::Display for CutAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

impl FromStr for CutAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(format!("unknown axis {s:?} (expected vertical or horizontal)")),
        }
    }
}

/// How strip boundaries are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionMode {
    /// Exactly `count` strips of equal thickness.
    Fixed { count: usize },
    /// Random thicknesses drawn from `min..=max`.
    Random { min: usize, max: usize },
}

/// Immutable strip generation parameters. Build with [`ConfigBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripConfig {
    axis: CutAxis,
    mode: PartitionMode,
    blank: Option<(usize, Rgb<u8>)>,
    grayscale: bool,
}

impl StripConfig {
    pub fn axis(&self) -> CutAxis {
        self.axis
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    /// Separator thickness and color, if separators are enabled.
    pub fn blank(&self) -> Option<(usize, Rgb<u8>)> {
        self.blank
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            axis: CutAxis::Vertical,
            mode: PartitionMode::Fixed { count: 6 },
            blank: None,
            grayscale: false,
        }
    }
}

/// Builder for [`StripConfig`].
///
/// Every field starts at a usable default; [`ConfigBuilder::build`]
/// validates the combination and never clamps.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    axis: CutAxis,
    strip_count: usize,
    random: bool,
    min_size: usize,
    max_size: usize,
    insert_blank: bool,
    blank_width: usize,
    blank_color: Rgb<u8>,
    grayscale: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            axis: CutAxis::Vertical,
            strip_count: 6,
            random: false,
            min_size: 20,
            max_size: 100,
            insert_blank: false,
            blank_width: 100,
            blank_color: Rgb([255, 255, 255]),
            grayscale: false,
        }
    }

    pub fn axis(mut self, axis: CutAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Number of strips in fixed mode.
    pub fn strip_count(mut self, count: usize) -> Self {
        self.strip_count = count;
        self
    }

    /// Switch to random-width strips.
    pub fn random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    /// Inclusive thickness range used in random mode.
    pub fn size_range(mut self, min: usize, max: usize) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn insert_blank(mut self, insert: bool) -> Self {
        self.insert_blank = insert;
        self
    }

    pub fn blank_width(mut self, width: usize) -> Self {
        self.blank_width = width;
        self
    }

    pub fn blank_color(mut self, color: Rgb<u8>) -> Self {
        self.blank_color = color;
        self
    }

    pub fn grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StripError::Config`] if `strip_count < 2`, `blank_width == 0`,
    /// or random mode is on and `min_size` is zero or not below `max_size`.
    pub fn build(self) -> Result<StripConfig, StripError> {
        if self.strip_count < 2 {
            return Err(StripError::config(format!(
                "strip count must be at least 2 (got {})",
                self.strip_count
            )));
        }
        if self.random && self.min_size == 0 {
            return Err(StripError::config("minimum strip size must be positive"));
        }
        if self.random && self.min_size >= self.max_size {
            return Err(StripError::config(format!(
                "maximum strip size must be greater than minimum ({} >= {})",
                self.min_size, self.max_size
            )));
        }
        if self.blank_width == 0 {
            return Err(StripError::config("blank strip width must be positive"));
        }

        let mode = if self.random {
            PartitionMode::Random {
                min: self.min_size,
                max: self.max_size,
            }
        } else {
            PartitionMode::Fixed {
                count: self.strip_count,
            }
        };

        Ok(StripConfig {
            axis: self.axis,
            mode,
            blank: self
                .insert_blank
                .then_some((self.blank_width, self.blank_color)),
            grayscale: self.grayscale,
        })
    }
}
