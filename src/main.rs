//! Main Program for Stripstitch
//! Run with `--help` for more instruction

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

mod settings;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Error};
use clap::Parser;
use log::{debug, error, info, warn};
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use stripstitch::{codec, CutAxis};

use crate::settings::Settings;

const CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Output file
    #[arg(short = 'o', long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Output directory (a unique file name is generated)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Settings file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    /// Cut direction (vertical or horizontal)
    #[arg(long)]
    axis: Option<CutAxis>,

    /// Number of strips (fixed mode)
    #[arg(short = 'n', long)]
    strips: Option<usize>,

    /// Use random strip widths
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    random: Option<bool>,

    /// Minimum strip width (random mode)
    #[arg(long)]
    min: Option<usize>,

    /// Maximum strip width (random mode)
    #[arg(long)]
    max: Option<usize>,

    /// Insert blank strips between strips
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    blank: Option<bool>,

    /// Blank strip width
    #[arg(long)]
    blank_width: Option<usize>,

    /// Blank strip color as R,G,B
    #[arg(long, value_parser = parse_color)]
    blank_color: Option<[u8; 3]>,

    /// Convert to grayscale before cutting
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    grayscale: Option<bool>,

    /// Random seed
    #[arg(long)]
    seed: Option<String>,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = self.axis {
            settings.direction = v;
        }
        if let Some(v) = self.strips {
            settings.strip_count = v;
        }
        if let Some(v) = self.random {
            settings.random_strips = v;
        }
        if let Some(v) = self.min {
            settings.min_strip_size = v;
        }
        if let Some(v) = self.max {
            settings.max_strip_size = v;
        }
        if let Some(v) = self.blank {
            settings.insert_blank = v;
        }
        if let Some(v) = self.blank_width {
            settings.blank_width = v;
        }
        if let Some(v) = self.blank_color {
            settings.strip_color = v;
        }
        if let Some(v) = self.grayscale {
            settings.grayscale = v;
        }
        if let Some(v) = &self.output_dir {
            settings.output_folder = Some(v.clone());
        }
    }
}

fn parse_color(s: &str) -> Result<[u8; 3], String> {
    let parts = s
        .split(',')
        .map(|v| v.trim().parse::<u8>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[u8; 3]>::try_from(parts).map_err(|_| format!("expected R,G,B, got {s:?}"))
}

fn load_settings(path: &Path, explicit: bool) -> Settings {
    if !path.exists() {
        if explicit {
            warn!("Settings file {} not found, using defaults", path.display());
        }
        return Settings::default();
    }

    match Settings::load(path) {
        Ok(v) => v,
        Err(e) => {
            error!("{e:#}");
            Settings::default()
        }
    }
}

fn resolve_input(input: PathBuf, settings: &Settings) -> PathBuf {
    match &settings.input_folder {
        Some(dir) if input.is_relative() && !input.exists() => {
            let p = dir.join(&input);
            if p.exists() {
                p
            } else {
                input
            }
        }
        _ => input,
    }
}

fn resolve_output(output: Option<PathBuf>, settings: &Settings) -> Result<PathBuf, Error> {
    if let Some(p) = output {
        return Ok(p);
    }

    match &settings.output_folder {
        Some(dir) => Ok(dir.join(format!("{:016x}_striped.jpg", rand::random::<u64>()))),
        None => bail!("no output destination (use --output or --output-dir)"),
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(|| CONFIG_FILE.into());
    let mut settings = load_settings(&config_path, args.config.is_some());
    args.apply(&mut settings);

    let config = settings.builder().build()?;
    debug!("Config: {config:?}");

    let output = resolve_output(args.output.clone(), &settings)?;
    codec::check_destination(&output)?;

    if args.save_config {
        settings.save(&config_path)?;
        info!("Saved settings to {}", config_path.display());
    }

    let mut random = if let Some(seed) = &args.seed {
        debug!("Seed: {seed:?}");
        let mut hasher = Sha256::new();
        hasher.update(seed);

        rand_xoshiro::Xoshiro256StarStar::from_seed(hasher.finalize().into())
    } else {
        rand_xoshiro::Xoshiro256StarStar::from_entropy()
    };

    let input = resolve_input(args.input, &settings);
    let source = codec::open(&input).with_context(|| format!("cannot open {}", input.display()))?;
    info!(
        "Loaded {} ({}x{}, {:?})",
        input.display(),
        source.width(),
        source.height(),
        source.mode(),
    );

    let canvas = stripstitch::generate(&source, &config, &mut random)?;
    info!(
        "Composed {}x{} image ({} cut)",
        canvas.width(),
        canvas.height(),
        config.axis(),
    );

    codec::save_jpeg(&canvas, &output, args.quality)?;
    info!("Wrote {}", output.display());

    Ok(())
}
