/*
lib.rs

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

//! Väriaine is a color gradient puzzle.
//!
//! The solution is a square grid of colors that smoothly vary between four corner colors.
//! The player receives the grid with all the cells shuffled, except the four corners, and
//! rebuilds the gradient by exchanging cells two at a time.
//!
//! ```no_run
//! use variaine::{GridCoordinate, SelectionOutcome, new_game};
//!
//! let mut session = new_game(5)?;
//! session.select(GridCoordinate::new(1, 2))?;
//! if let SelectionOutcome::Completed { total_moves, .. } =
//!     session.select(GridCoordinate::new(2, 1))?
//! {
//!     println!("Solved in {total_moves} moves");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod colors;
pub mod config;
pub mod game;
pub mod generator;
pub mod saver;
pub mod vector_math;

pub use board::{BoardError, GridCoordinate};
pub use game::{GameOptions, GameSession, Selection, SelectionOutcome, SwapEvent, new_game};
pub use generator::GeneratorError;
pub use generator::corners::Strategy;
