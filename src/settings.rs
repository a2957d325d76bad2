// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use image::Rgb;
use serde::{Deserialize, Serialize};
use stripstitch::{ConfigBuilder, CutAxis};

/// Persisted settings file, `config.toml` by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_folder: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_folder: Option<PathBuf>,
    pub strip_count: usize,
    pub random_strips: bool,
    pub min_strip_size: usize,
    pub max_strip_size: usize,
    pub direction: CutAxis,
    pub insert_blank: bool,
    pub blank_width: usize,
    pub strip_color: [u8; 3],
    pub grayscale: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_folder: None,
            output_folder: None,
            strip_count: 6,
            random_strips: false,
            min_strip_size: 20,
            max_strip_size: 100,
            direction: CutAxis::Vertical,
            insert_blank: false,
            blank_width: 100,
            strip_color: [255, 255, 255],
            grayscale: false,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file {}", path.display()))?;
        let mut ret: Self = toml::from_str(&s)
            .with_context(|| format!("cannot parse settings file {}", path.display()))?;

        // Empty strings mean "not set"
        ret.input_folder = ret.input_folder.filter(|p| !p.as_os_str().is_empty());
        ret.output_folder = ret.output_folder.filter(|p| !p.as_os_str().is_empty());
        Ok(ret)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)
            .with_context(|| format!("cannot write settings file {}", path.display()))
    }

    pub fn builder(&self) -> ConfigBuilder {
        ConfigBuilder::new()
            .axis(self.direction)
            .strip_count(self.strip_count)
            .random(self.random_strips)
            .size_range(self.min_strip_size, self.max_strip_size)
            .insert_blank(self.insert_blank)
            .blank_width(self.blank_width)
            .blank_color(Rgb(self.strip_color))
            .grayscale(self.grayscale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripstitch::{PartitionMode, StripConfig};

    #[test]
    fn partial_file_uses_defaults() {
        let s: Settings = toml::from_str(
            r#"
            direction = "horizontal"
            random_strips = true
            strip_color = [0, 128, 255]
            "#,
        )
        .unwrap();

        assert_eq!(s.direction, CutAxis::Horizontal);
        assert_eq!(s.strip_count, 6);
        assert_eq!(s.strip_color, [0, 128, 255]);

        let config = s.builder().build().unwrap();
        assert_eq!(config.mode(), PartitionMode::Random { min: 20, max: 100 });
    }

    #[test]
    fn defaults_match_library() {
        let config = Settings::default().builder().build().unwrap();
        assert_eq!(config, StripConfig::default());
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join(format!("stripstitch-{}-settings.toml", std::process::id()));
        let s = Settings {
            output_folder: Some(PathBuf::from("/tmp/out")),
            insert_blank: true,
            blank_width: 12,
            ..Settings::default()
        };
        s.save(&path).unwrap();
        let back = Settings::load(&path);
        fs::remove_file(&path).ok();

        assert_eq!(back.unwrap(), s);
    }

    #[test]
    fn empty_folder_is_unset() {
        let path = std::env::temp_dir().join(format!("stripstitch-{}-empty.toml", std::process::id()));
        fs::write(&path, "input_folder = \"\"\noutput_folder = \"\"\n").unwrap();
        let back = Settings::load(&path);
        fs::remove_file(&path).ok();

        let back = back.unwrap();
        assert_eq!(back.input_folder, None);
        assert_eq!(back.output_folder, None);
    }
}
