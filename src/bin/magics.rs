/*
  Fiddler, a UCI-compatible chess engine.
  Copyright (C) 2022 The Fiddler Authors (see AUTHORS.md file)

  Fiddler is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Fiddler is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Search for magic multipliers and print them as Rust source.
//!
//! Pass `--entropic` to search from random seeds instead of the default ones,
//! and `-v` to log the progress of the search to stderr.

#![warn(clippy::pedantic)]

use std::{env, time::Instant};

use fiddler_tables::{
    magic::{MagicConfig, SeedTable, SlidingAttacks},
    Bitboard, Slider,
};
use simplelog::{Config, LevelFilter, WriteLogger};

#[allow(clippy::result_unit_err)]
/// Run the magic search and print the results.
///
/// # Errors
///
/// This function will return an error if the search fails or a logger cannot
/// be installed.
pub fn main() -> Result<(), i32> {
    let mut config = MagicConfig::new();
    let mut level = LevelFilter::Info;

    // first argument is the name of the binary
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--entropic" => config.seeds = SeedTable::entropic(),
            "-v" => level = LevelFilter::Debug,
            _ => eprintln!("Warning: ignoring unrecognized argument `{arg}`"),
        }
    }

    if WriteLogger::init(level, Config::default(), std::io::stderr()).is_err() {
        eprintln!("Error: unable to initialize logger");
        return Err(-1);
    }

    println!("// seeds: {:?}", config.seeds.0);
    for slider in Slider::ALL {
        let tic = Instant::now();
        let attacks = match SlidingAttacks::new(slider, &config) {
            Ok(attacks) => attacks,
            Err(e) => {
                eprintln!("Error: {e}");
                return Err(-2);
            }
        };
        log::info!("{slider} magics found in {:?}", tic.elapsed());

        println!("// {slider} table: {} entries", attacks.table_len());
        println!(
            "const {}_MAGICS: [u64; 64] = [",
            slider.to_string().to_uppercase()
        );
        for sq in Bitboard::ALL {
            println!("    {:#018x}, // {sq}", attacks.magic(sq).magic());
        }
        println!("];");
    }

    Ok(())
}
