/*
palette.rs

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

//! Palette, the solution of a game.

use image::RgbImage;
use serde::Serialize;

use super::GeneratorError;
use crate::colors::Rgb;
use crate::config::MIN_BOARD_SIZE;

/// Square grid of colors. A palette is never modified once created.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Number of rows and columns.
    size: usize,

    /// Colors, row by row.
    cells: Vec<Vec<Rgb>>,
}

impl Palette {
    /// Create a [`Palette`] object from its rows.
    ///
    /// # Errors
    ///
    /// Return [`GeneratorError::InvalidSize`] if the grid is not square or is smaller than
    /// 3x3.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, GeneratorError> {
        let size: usize = rows.len();
        if size < MIN_BOARD_SIZE {
            return Err(GeneratorError::InvalidSize(size));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(GeneratorError::InvalidSize(row.len()));
        }
        Ok(Self { size, cells: rows })
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return the rows of the palette.
    pub fn rows(&self) -> &[Vec<Rgb>] {
        &self.cells
    }

    /// Return the color at the given position, or None if the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Whether all the cells have the same color.
    pub fn is_uniform(&self) -> bool {
        let first: Rgb = self.cells[0][0];
        self.cells.iter().flatten().all(|c| *c == first)
    }

    /// Return the palette as hexadecimal strings.
    pub fn to_hex_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_hex()).collect())
            .collect()
    }

    /// Return the palette as tab-separated hexadecimal strings, one row per line.
    ///
    /// The last line has no line terminator.
    pub fn to_text(&self) -> String {
        self.to_hex_rows()
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Return the palette in JSON format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render the palette as an image. Each cell is a `multiplier` x `multiplier` block.
    pub fn create_image(&self, multiplier: u32) -> RgbImage {
        let side: u32 = self.size as u32 * multiplier;
        let block: u32 = multiplier.max(1);
        RgbImage::from_fn(side, side, |x, y| {
            let color: Rgb = self.cells[(y / block) as usize][(x / block) as usize];
            image::Rgb(color.as_array())
        })
    }
}
