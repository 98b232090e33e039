/*
config.rs

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

//! Build-time settings.

/// Program name, used in the window title and in the command-line help.
pub const PROGRAM_NAME: &str = "Väriaine";

/// Version string reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text reported by `--version` in long form.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Smallest board: four distinct pinned corners need at least 3x3 cells.
pub const MIN_BOARD_SIZE: usize = 3;

/// Board size when the player does not choose one.
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// Width and height, in pixels, of a cell in exported images.
pub const IMAGE_MULTIPLIER: u32 = 200;

/// Number of corner-sampling attempts before the palette generation gives up.
pub const MAX_GENERATION_ATTEMPTS: usize = 1000;

/// Number of times the board is reshuffled when a shuffle reproduces the solution.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 16;
