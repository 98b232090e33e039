/*
generator.rs

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

//! Generate random color palettes.
//!
//! A palette is a square grid of colors that forms a smooth two dimensional gradient.
//! It is the solution of a game.
//!
//! A palette is built in two steps:
//!
//! * Four corner colors are sampled by a [`corners::Strategy`].
//!   Each strategy places the corners in color space with its own geometric constraints and
//!   returns them as a [`corners::CornerSet`], either in HSL or in RGB.
//!
//! * The [`gradient::bilinear`] routine fills the grid: it interpolates the left and right
//!   columns between the corners, and then each row between the two columns.
//!
//! Sampling and interpolation can produce colors outside of the valid ranges.
//! The [`random_palette::RandomPalette`] object drives the whole process and retries with new
//! random samples until a valid palette is produced.
//! If that takes too many attempts, then the generation fails with
//! [`GeneratorError::GenerationFailed`] and the caller can ask for a new game.

pub mod corners;
pub mod gradient;
pub mod palette;
pub mod random_palette;

use std::error::Error;
use std::fmt;

use crate::colors::ColorError;
use crate::vector_math::VectorError;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GeneratorError {
    /// The board size is too small (the board needs four distinct corners).
    InvalidSize(usize),

    /// A gradient needs at least two steps.
    DegenerateSize(usize),

    /// The sampled corners do not meet the strategy constraints.
    Rejected(&'static str),

    /// An interpolated or sampled color is out of range.
    Color(ColorError),

    /// A corner cannot be derived from a zero-length vector.
    Vector(VectorError),

    /// No valid palette could be produced before the retry ceiling.
    GenerationFailed {
        /// Number of attempts.
        attempts: usize,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeneratorError::InvalidSize(size) => {
                write!(f, "invalid board size {size}: the board needs at least 3x3 cells")
            }
            GeneratorError::DegenerateSize(steps) => {
                write!(f, "cannot build a gradient with {steps} step(s)")
            }
            GeneratorError::Rejected(reason) => write!(f, "sample rejected: {reason}"),
            GeneratorError::Color(e) => write!(f, "{e}"),
            GeneratorError::Vector(e) => write!(f, "{e}"),
            GeneratorError::GenerationFailed { attempts } => {
                write!(f, "no valid palette after {attempts} attempts")
            }
        }
    }
}

impl Error for GeneratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeneratorError::Color(e) => Some(e),
            GeneratorError::Vector(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorError> for GeneratorError {
    fn from(e: ColorError) -> Self {
        GeneratorError::Color(e)
    }
}

impl From<VectorError> for GeneratorError {
    fn from(e: VectorError) -> Self {
        GeneratorError::Vector(e)
    }
}
