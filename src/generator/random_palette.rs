/*
random_palette.rs

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

//! Generate a random palette.

use image::RgbImage;
use log::{Level, debug, log_enabled};
use rand::Rng;
use std::time::Instant;

use super::GeneratorError;
use super::corners::{CornerSet, Strategy};
use super::gradient;
use super::palette::Palette;
use crate::colors::{GradientColor, Rgb};
use crate::config::{IMAGE_MULTIPLIER, MAX_GENERATION_ATTEMPTS, MIN_BOARD_SIZE};

/// [`RandomPalette`] object.
pub struct RandomPalette {
    /// Number of rows and columns of the palettes.
    pub size: usize,

    /// Algorithm used to pick the corner colors.
    pub strategy: Strategy,

    /// Number of attempts after which [`RandomPalette::generate`] gives up.
    pub max_attempts: usize,

    /// Number of attempts it took to generate the last palette.
    pub attempts: usize,

    /// Duration in seconds it took to generate the last palette.
    pub duration: f32,

    /// Time when the palette generation started. Used to compute the
    /// [`RandomPalette::duration`].
    start: Instant,
}

impl RandomPalette {
    /// Create the object.
    ///
    /// # Errors
    ///
    /// Return [`GeneratorError::InvalidSize`] if `size` is lower than 3.
    pub fn new(size: usize, strategy: Strategy) -> Result<Self, GeneratorError> {
        if size < MIN_BOARD_SIZE {
            return Err(GeneratorError::InvalidSize(size));
        }
        Ok(Self {
            size,
            strategy,
            max_attempts: MAX_GENERATION_ATTEMPTS,
            attempts: 0,
            duration: 0.0,
            start: Instant::now(),
        })
    }

    /// Change the retry ceiling.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generate and return a random palette.
    ///
    /// Rejected samples and out-of-range colors are retried with new random samples.
    ///
    /// # Errors
    ///
    /// The method returns [`GeneratorError::GenerationFailed`] if no valid palette is found
    /// within [`RandomPalette::max_attempts`] attempts. In that case, the method can be
    /// retried.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Palette, GeneratorError> {
        self.attempts = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        debug!(
            "Generating a {0}x{0} palette with the {1} strategy",
            self.size, self.strategy
        );

        while self.attempts < self.max_attempts {
            self.attempts += 1;
            match self.attempt(rng) {
                Ok(palette) => {
                    self.duration = self.start.elapsed().as_secs_f32();
                    debug!(
                        "Attempts = {}  Duration = {}",
                        self.attempts, self.duration
                    );
                    if log_enabled!(Level::Debug) {
                        for row in palette.to_hex_rows() {
                            debug!("    {}", row.join(" "));
                        }
                    }
                    return Ok(palette);
                }
                Err(e) => debug!("    Attempt {} rejected: {e}", self.attempts),
            }
        }

        self.duration = self.start.elapsed().as_secs_f32();
        Err(GeneratorError::GenerationFailed {
            attempts: self.attempts,
        })
    }

    /// Perform one attempt: sample the corners and fill the grid.
    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Palette, GeneratorError> {
        let corners: CornerSet = self.strategy.sample(self.size, rng)?;
        if !corners.are_distinct() {
            return Err(GeneratorError::Rejected("corners are not distinct"));
        }

        let rows: Vec<Vec<Rgb>> = match corners {
            CornerSet::Hsl(c) => to_rgb_rows(gradient::bilinear(&c, self.size)?),
            CornerSet::Rgb(c) => gradient::bilinear(&c, self.size)?,
        };
        let palette: Palette = Palette::from_rows(rows)?;
        if palette.is_uniform() {
            return Err(GeneratorError::Rejected("uniform palette"));
        }
        Ok(palette)
    }

    /// Render a palette as an image, with the default cell size.
    pub fn create_image(&self, palette: &Palette) -> RgbImage {
        palette.create_image(IMAGE_MULTIPLIER)
    }
}

/// Convert a grid of colors to RGB.
fn to_rgb_rows<C: GradientColor>(rows: Vec<Vec<C>>) -> Vec<Vec<Rgb>> {
    rows.into_iter()
        .map(|row| row.iter().map(|c| c.to_rgb()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sizes_below_three_are_rejected() {
        for size in 0..3 {
            assert!(matches!(
                RandomPalette::new(size, Strategy::Circle),
                Err(GeneratorError::InvalidSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn same_seed_same_palette() {
        let mut one: RandomPalette = RandomPalette::new(6, Strategy::Circle).unwrap();
        let mut two: RandomPalette = RandomPalette::new(6, Strategy::Circle).unwrap();
        let a: Palette = one.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        let b: Palette = two.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        let c: Palette = two.generate(&mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn circle_palettes_have_distinct_corners() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let mut generator: RandomPalette = RandomPalette::new(5, Strategy::Circle).unwrap();
        for _ in 0..50 {
            let palette: Palette = generator.generate(&mut rng).unwrap();
            assert_eq!(palette.size(), 5);
            assert!(!palette.is_uniform());
            let corners: [Rgb; 4] = [
                palette.rows()[0][0],
                palette.rows()[0][4],
                palette.rows()[4][0],
                palette.rows()[4][4],
            ];
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(corners[i], corners[j]);
                }
            }
        }
    }

    #[test]
    fn adjacent_cells_are_close() {
        let mut rng: StdRng = StdRng::seed_from_u64(6);
        let mut generator: RandomPalette = RandomPalette::new(8, Strategy::Circle).unwrap();
        let palette: Palette = generator.generate(&mut rng).unwrap();
        for row in palette.rows() {
            for pair in row.windows(2) {
                let d: i32 = pair[0]
                    .as_array()
                    .iter()
                    .zip(pair[1].as_array().iter())
                    .map(|(a, b)| (*a as i32 - *b as i32).abs())
                    .max()
                    .unwrap_or(0);
                // The circle diameter is at most 100 hue degrees or lightness percents
                assert!(d < 128, "{pair:?}");
            }
        }
    }

    #[test]
    fn zero_attempts_fails() {
        let mut generator: RandomPalette = RandomPalette::new(4, Strategy::Circle)
            .unwrap()
            .with_max_attempts(0);
        assert_eq!(
            generator.generate(&mut StdRng::seed_from_u64(0)),
            Err(GeneratorError::GenerationFailed { attempts: 0 })
        );
    }

    #[test]
    fn every_strategy_generates() {
        let mut rng: StdRng = StdRng::seed_from_u64(8);
        for strategy in [
            Strategy::Circle,
            Strategy::WideCircle,
            Strategy::Scattered,
            Strategy::Square,
            Strategy::PlaneNormal,
            Strategy::UniformStep,
            Strategy::SplitComplementary,
        ] {
            let mut generator: RandomPalette = RandomPalette::new(4, strategy).unwrap();
            let palette: Palette = generator
                .generate(&mut rng)
                .unwrap_or_else(|e| panic!("{strategy}: {e}"));
            assert_eq!(palette.size(), 4);
            assert!(generator.attempts >= 1);
        }
    }

    #[test]
    fn default_image_size() {
        let mut generator: RandomPalette = RandomPalette::new(3, Strategy::Circle).unwrap();
        let palette: Palette = generator.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(generator.create_image(&palette).dimensions(), (600, 600));
    }
}
