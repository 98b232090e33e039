/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Variaine.

Variaine is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Variaine is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Variaine. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the palette generator.
//! Väriaine generates random palettes, prints them, and optionally exports the last one.
//!
//! # Examples
//!
//! Generate a 4x4 palette:
//!
//! ```text
//! $ variaine --size 4
//! #b0364b	#a6395c	#9b3d6b	#8f427a
//! #b75a4b	#ad5d60	#a16274	#936786
//! #bd7e4c	#b28264	#a6887c	#988d93
//! #c0a04f	#b7a76a	#aaae86	#9cb2a0
//! ```
//!
//! Generate 10,000 palettes and print some statistics:
//!
//! ```text
//! $ variaine -c 10000 -s 50 --summary > /dev/null
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::{Path, PathBuf};

use variaine::board::Board;
use variaine::config::{COPYRIGHT_NOTICE, DEFAULT_BOARD_SIZE, IMAGE_MULTIPLIER};
use variaine::generator::GeneratorError;
use variaine::generator::corners::Strategy;
use variaine::generator::palette::Palette;
use variaine::generator::random_palette::RandomPalette;
use variaine::saver::export::{self, ExportFormat};

/// Build random Väriaine palettes for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of rows and columns
    #[arg(short, long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Algorithm used to pick the corner colors
    #[arg(value_enum, short = 't', long, default_value_t = Strategy::Circle)]
    strategy: Strategy,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Number of palettes to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Export the last palette as a PNG image
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    image: Option<Option<PathBuf>>,

    /// Export the last palette as a text file
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    text: Option<Option<PathBuf>>,

    /// Print the palettes in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print a shuffled board and a hint after each palette
    #[arg(short, long, default_value_t = false)]
    board: bool,

    /// Print some statistics after generating the palettes
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator: RandomPalette = match RandomPalette::new(args.size, args.strategy) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let mut last: Option<Palette> = None;
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut max_attempts: usize = 0;
    let mut errors: usize = 0;

    for i in 0..args.count {
        debug!("Iteration {i}");

        let ret: Result<Palette, GeneratorError> = generator.generate(&mut rng);
        total += generator.duration;
        max = max.max(generator.duration);
        attempts += generator.attempts;
        max_attempts = max_attempts.max(generator.attempts);

        let palette: Palette = match ret {
            Ok(p) => p,
            Err(e) => {
                // The generator gave up, the next iteration starts over
                errors += 1;
                debug!("ERROR generating a palette: {e}");
                continue;
            }
        };

        if i > 0 {
            println!();
        }
        if args.json {
            match palette.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
            }
        } else {
            println!("{}", palette.to_text());
        }

        if args.board {
            let board: Board = Board::new(palette.clone(), &mut rng);
            println!();
            for row in board.rows() {
                println!(
                    "{}",
                    row.iter()
                        .map(|c| c.to_hex())
                        .collect::<Vec<String>>()
                        .join("\t")
                );
            }
            match board.hint(&mut rng) {
                Some((from, to)) => println!("Hint: move {from} to {to}"),
                None => println!("Hint: none"),
            }
        }
        last = Some(palette);
    }

    //
    // Export the last palette
    //
    let mut ret: u8 = 0;
    if let Some(palette) = &last {
        if let Some(path) = &args.image {
            let path: PathBuf = export_path(path.as_deref(), ExportFormat::Image);
            match export::export_image(palette, &path, IMAGE_MULTIPLIER) {
                Ok(()) => eprintln!("Image saved in {}", path.display()),
                Err(e) => {
                    eprintln!("Error: {}: {e}", path.display());
                    ret = 1;
                }
            }
        }
        if let Some(path) = &args.text {
            let path: PathBuf = export_path(path.as_deref(), ExportFormat::Text);
            match export::export_text(palette, &path) {
                Ok(()) => eprintln!("Text saved in {}", path.display()),
                Err(e) => {
                    eprintln!("Error: {}: {e}", path.display());
                    ret = 1;
                }
            }
        }
    } else if args.count > 0 {
        eprintln!("Error: no palette could be generated");
        ret = 1;
    }

    // Print some stats
    if args.summary && args.count > 0 {
        eprintln!(
            "
      total time = {}s
    average time = {}s
        max time = {}s
average attempts = {}
    max attempts = {}
          errors = {}",
            total,
            total / args.count as f32,
            max,
            attempts / args.count,
            max_attempts,
            errors
        );
    }
    ret
}

/// Return the path provided by the user, or a timestamped file name.
fn export_path(path: Option<&Path>, format: ExportFormat) -> PathBuf {
    match path {
        Some(p) => p.to_path_buf(),
        None => export::default_file_name(format),
    }
}
