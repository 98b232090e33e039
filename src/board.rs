/*
board.rs

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

//! Puzzle board.
//!
//! The board starts as a shuffled copy of the solution [`Palette`]. The four corner cells are
//! pinned: they keep their solution color during the shuffle and the player cannot move them.
//!
//! Cells are identified by their [`GridCoordinate`], with the row first.
//!
//! ```text
//!      col 0   col 1   col 2
//!    +-------+-------+-------+
//!  0 |  pin  |       |  pin  |
//!    +-------+-------+-------+
//!  1 |       |       |       |
//!    +-------+-------+-------+
//!  2 |  pin  |       |  pin  |
//!    +-------+-------+-------+
//! ```

use log::{Level, debug, log_enabled, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::colors::Rgb;
use crate::config::MAX_SHUFFLE_ATTEMPTS;
use crate::generator::palette::Palette;

/// Position of a cell in the grid.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors when accessing the board.
#[derive(Debug, PartialEq)]
pub enum BoardError {
    /// The grid does not have the expected dimensions.
    InvalidSize(usize),

    /// The coordinate is outside the grid.
    InvalidCoordinate(GridCoordinate),

    /// The cell is a pinned corner.
    PinnedCell(GridCoordinate),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardError::InvalidSize(size) => write!(f, "Invalid grid size: {size}"),
            BoardError::InvalidCoordinate(c) => write!(f, "Cell {c} is outside the grid"),
            BoardError::PinnedCell(c) => write!(f, "Cell {c} is pinned and cannot be moved"),
        }
    }
}

impl Error for BoardError {}

/// The four fixed cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedCorners {
    size: usize,
}

impl PinnedCorners {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Top-left, top-right, bottom-left, and bottom-right coordinates.
    pub fn coordinates(&self) -> [GridCoordinate; 4] {
        let last: usize = self.size.saturating_sub(1);
        [
            GridCoordinate::new(0, 0),
            GridCoordinate::new(0, last),
            GridCoordinate::new(last, 0),
            GridCoordinate::new(last, last),
        ]
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        let last: usize = self.size.saturating_sub(1);
        (coord.row == 0 || coord.row == last) && (coord.col == 0 || coord.col == last)
    }
}

/// Flatten a grid row by row.
pub fn flatten<T: Clone>(grid: &[Vec<T>]) -> Vec<T> {
    grid.iter().flatten().cloned().collect()
}

/// Rebuild a `size` x `size` grid from its flattened cells.
///
/// # Errors
///
/// Return [`BoardError::InvalidSize`] if the number of cells is not `size` squared.
pub fn unflatten<T: Clone>(cells: &[T], size: usize) -> Result<Vec<Vec<T>>, BoardError> {
    if size == 0 || cells.len() != size * size {
        return Err(BoardError::InvalidSize(size));
    }
    Ok(cells.chunks(size).map(|row| row.to_vec()).collect())
}

/// Player grid and its solution.
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid the player has to rebuild.
    solution: Palette,

    /// Current colors, row by row.
    cells: Vec<Vec<Rgb>>,

    pinned: PinnedCorners,
}

impl Board {
    /// Create a [`Board`] object with a shuffled copy of the solution.
    ///
    /// When the shuffle reproduces the solution, the board is shuffled again, up to
    /// [`MAX_SHUFFLE_ATTEMPTS`] times.
    pub fn new<R: Rng + ?Sized>(solution: Palette, rng: &mut R) -> Self {
        let pinned: PinnedCorners = PinnedCorners::new(solution.size());
        let mut cells: Vec<Vec<Rgb>> = shuffle(&solution, &pinned, rng);
        let mut attempts: usize = 1;

        while cells == solution.rows() && attempts < MAX_SHUFFLE_ATTEMPTS {
            debug!("The shuffled board is the solution. Shuffling again");
            cells = shuffle(&solution, &pinned, rng);
            attempts += 1;
        }
        if cells == solution.rows() {
            warn!("The board is solved after {attempts} shuffles");
        }

        if log_enabled!(Level::Debug) {
            debug!("Board:");
            for row in &cells {
                debug!(
                    "    {}",
                    row.iter().map(|c| c.to_hex()).collect::<Vec<String>>().join(" ")
                );
            }
        }

        Self {
            solution,
            cells,
            pinned,
        }
    }

    /// Create a [`Board`] object from a given layout.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::InvalidSize`] if the layout and the solution do not have the same
    /// dimensions, and [`BoardError::PinnedCell`] if a corner of the layout does not hold its
    /// solution color.
    pub fn with_layout(solution: Palette, cells: Vec<Vec<Rgb>>) -> Result<Self, BoardError> {
        let size: usize = solution.size();
        if cells.len() != size {
            return Err(BoardError::InvalidSize(cells.len()));
        }
        if let Some(row) = cells.iter().find(|row| row.len() != size) {
            return Err(BoardError::InvalidSize(row.len()));
        }
        let pinned: PinnedCorners = PinnedCorners::new(size);
        for coord in pinned.coordinates() {
            if solution.get(coord.row, coord.col) != Some(cells[coord.row][coord.col]) {
                return Err(BoardError::PinnedCell(coord));
            }
        }
        Ok(Self {
            solution,
            cells,
            pinned,
        })
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        self.solution.size()
    }

    pub fn solution(&self) -> &Palette {
        &self.solution
    }

    /// Return the current rows of the board.
    pub fn rows(&self) -> &[Vec<Rgb>] {
        &self.cells
    }

    /// Verify that the coordinate is inside the grid.
    pub fn check(&self, coord: GridCoordinate) -> Result<(), BoardError> {
        if coord.row >= self.size() || coord.col >= self.size() {
            return Err(BoardError::InvalidCoordinate(coord));
        }
        Ok(())
    }

    /// Return the current color of a cell.
    pub fn cell_color(&self, coord: GridCoordinate) -> Result<Rgb, BoardError> {
        self.check(coord)?;
        Ok(self.cells[coord.row][coord.col])
    }

    /// Return the solution color of a cell.
    pub fn solution_color(&self, coord: GridCoordinate) -> Result<Rgb, BoardError> {
        self.solution
            .get(coord.row, coord.col)
            .ok_or(BoardError::InvalidCoordinate(coord))
    }

    pub fn is_pinned(&self, coord: GridCoordinate) -> bool {
        self.check(coord).is_ok() && self.pinned.contains(coord)
    }

    /// Exchange the colors of two cells. The solution is never modified.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::InvalidCoordinate`] if a cell is outside the grid, and
    /// [`BoardError::PinnedCell`] if a cell is a pinned corner. The board is not modified on
    /// error.
    pub fn swap(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<(), BoardError> {
        self.check(a)?;
        self.check(b)?;
        for coord in [a, b] {
            if self.pinned.contains(coord) {
                return Err(BoardError::PinnedCell(coord));
            }
        }

        let color_a: Rgb = self.cells[a.row][a.col];
        self.cells[a.row][a.col] = self.cells[b.row][b.col];
        self.cells[b.row][b.col] = color_a;
        debug!("Swapped {a} and {b}");
        Ok(())
    }

    /// Whether every cell holds its solution color.
    pub fn is_solved(&self) -> bool {
        self.cells == self.solution.rows()
    }

    /// Number of cells that do not hold their solution color.
    pub fn misplaced(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .zip(self.solution.rows().iter().flatten())
            .filter(|(cell, expected)| cell != expected)
            .count()
    }

    /// Return the first cell of the solution, in row order, with the given color.
    pub fn find_in_solution(&self, color: Rgb) -> Option<GridCoordinate> {
        let size: usize = self.size();
        flatten(self.solution.rows())
            .iter()
            .position(|c| *c == color)
            .map(|i| GridCoordinate::new(i / size, i % size))
    }

    /// Suggest a move.
    ///
    /// The returned `(from, to)` pair gives a movable cell and the position in the solution of
    /// its current color. The cell is randomly chosen among the cells that are not at that
    /// position already. Return None when there is no such cell.
    pub fn hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(GridCoordinate, GridCoordinate)> {
        let size: usize = self.size();
        let candidates: Vec<(GridCoordinate, GridCoordinate)> = (0..size * size)
            .map(|i| GridCoordinate::new(i / size, i % size))
            .filter(|from| !self.pinned.contains(*from))
            .filter_map(|from| {
                let to: GridCoordinate =
                    self.find_in_solution(self.cells[from.row][from.col])?;
                if to == from { None } else { Some((from, to)) }
            })
            .collect();
        candidates.choose(rng).copied()
    }
}

/// Shuffle the solution, keeping the four corners in place.
fn shuffle<R: Rng + ?Sized>(
    solution: &Palette,
    pinned: &PinnedCorners,
    rng: &mut R,
) -> Vec<Vec<Rgb>> {
    let size: usize = solution.size();
    let mut remainder: Vec<Rgb> = flatten(solution.rows())
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !pinned.contains(GridCoordinate::new(i / size, i % size)))
        .map(|(_, c)| c)
        .collect();
    remainder.shuffle(rng);

    let mut movable = remainder.into_iter();
    let mut cells: Vec<Rgb> = Vec::with_capacity(size * size);
    for i in 0..size * size {
        let coord: GridCoordinate = GridCoordinate::new(i / size, i % size);
        if pinned.contains(coord) {
            cells.push(solution.rows()[coord.row][coord.col]);
        } else if let Some(color) = movable.next() {
            cells.push(color);
        }
    }
    cells.chunks(size).map(|row| row.to_vec()).collect()
}
