/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! The player selects two cells, one after the other, to exchange their colors. Selecting the
//! same cell twice cancels the selection. The game is over when the board matches the
//! solution.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::board::{Board, BoardError, GridCoordinate};
use crate::colors::Rgb;
use crate::config::{DEFAULT_BOARD_SIZE, IMAGE_MULTIPLIER};
use crate::generator::GeneratorError;
use crate::generator::corners::Strategy;
use crate::generator::palette::Palette;
use crate::generator::random_palette::RandomPalette;
use crate::saver::export;

/// Parameters of a new game.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GameOptions {
    /// Number of rows and columns.
    pub size: usize,

    /// Algorithm used to pick the corner colors.
    pub strategy: Strategy,

    /// Seed of the random number generator. A random seed is used when None.
    pub seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            strategy: Strategy::default(),
            seed: None,
        }
    }
}

/// Selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// No cell is selected.
    Idle,

    /// The player selected a cell and the next selection swaps the two cells.
    Armed(GridCoordinate),
}

/// Two cells that the player exchanged, with their new colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapEvent {
    pub a: GridCoordinate,
    pub b: GridCoordinate,
    pub color_a: String,
    pub color_b: String,
}

/// Result of a cell selection, for refreshing the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The cell is now selected.
    Armed(GridCoordinate),

    /// The player selected the same cell again, and the selection is cancelled.
    Cleared,

    /// The two cells are exchanged.
    Swapped(SwapEvent),

    /// The two cells are exchanged and the puzzle is solved.
    Completed { swap: SwapEvent, total_moves: usize },

    /// The game is already completed.
    Ignored,
}

/// Start a game with the default options and the given size.
///
/// # Errors
///
/// Return [`GeneratorError::InvalidSize`] if `size` is lower than 3, and
/// [`GeneratorError::GenerationFailed`] if no palette could be generated. In that last case,
/// the function can be retried.
pub fn new_game(size: usize) -> Result<GameSession, GeneratorError> {
    GameSession::new(&GameOptions {
        size,
        ..GameOptions::default()
    })
}

/// Manage the status of the game in progress.
pub struct GameSession {
    board: Board,

    selection: Selection,

    /// Number of swaps since the beginning of the game.
    moves: usize,

    /// Whether the puzzle is solved.
    completed: bool,

    /// Number of attempts it took to generate the palette.
    attempts: usize,

    /// Time when the game started. Used to compute game duration.
    start_time: Instant,

    /// The game duration, set when the puzzle is solved.
    final_duration: Option<Duration>,

    rng: StdRng,
}

impl GameSession {
    /// Generate a palette and shuffle it into a new board.
    ///
    /// # Errors
    ///
    /// See [`new_game`].
    pub fn new(options: &GameOptions) -> Result<Self, GeneratorError> {
        let mut rng: StdRng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut generator: RandomPalette = RandomPalette::new(options.size, options.strategy)?;
        let palette: Palette = generator.generate(&mut rng)?;
        let board: Board = Board::new(palette, &mut rng);

        info!(
            "New {0}x{0} game ({1} attempts, {2:.3}s)",
            options.size, generator.attempts, generator.duration
        );
        let mut session: GameSession = Self::from_board(board, rng);
        session.attempts = generator.attempts;
        Ok(session)
    }

    /// Create a game from an existing board.
    pub fn from_board(board: Board, rng: StdRng) -> Self {
        let completed: bool = board.is_solved();
        Self {
            board,
            selection: Selection::Idle,
            moves: 0,
            completed,
            attempts: 0,
            start_time: Instant::now(),
            final_duration: completed.then(Duration::default),
            rng,
        }
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Return the current color of a cell in hexadecimal notation.
    pub fn cell_color(&self, coord: GridCoordinate) -> Result<String, BoardError> {
        Ok(self.board.cell_color(coord)?.to_hex())
    }

    pub fn is_pinned(&self, coord: GridCoordinate) -> bool {
        self.board.is_pinned(coord)
    }

    /// Process the selection of a cell by the player.
    ///
    /// # Errors
    ///
    /// Return [`BoardError::InvalidCoordinate`] if the cell is outside the grid, and
    /// [`BoardError::PinnedCell`] if the cell is a pinned corner. The selection state is not
    /// changed in that case.
    pub fn select(&mut self, coord: GridCoordinate) -> Result<SelectionOutcome, BoardError> {
        if self.completed {
            debug!("Game completed. Ignoring the selection of {coord}");
            return Ok(SelectionOutcome::Ignored);
        }
        self.board.check(coord)?;
        if self.board.is_pinned(coord) {
            debug!("Cell {coord} is pinned. Selection rejected");
            return Err(BoardError::PinnedCell(coord));
        }

        match self.selection {
            Selection::Idle => {
                self.selection = Selection::Armed(coord);
                Ok(SelectionOutcome::Armed(coord))
            }
            Selection::Armed(prev) if prev == coord => {
                self.selection = Selection::Idle;
                Ok(SelectionOutcome::Cleared)
            }
            Selection::Armed(prev) => {
                self.board.swap(prev, coord)?;
                self.moves += 1;
                self.selection = Selection::Idle;

                let swap: SwapEvent = SwapEvent {
                    a: prev,
                    b: coord,
                    color_a: self.board.cell_color(prev)?.to_hex(),
                    color_b: self.board.cell_color(coord)?.to_hex(),
                };

                if self.board.is_solved() {
                    self.completed = true;
                    self.final_duration = Some(self.start_time.elapsed());
                    info!("Puzzle solved in {} moves", self.moves);
                    Ok(SelectionOutcome::Completed {
                        swap,
                        total_moves: self.moves,
                    })
                } else {
                    Ok(SelectionOutcome::Swapped(swap))
                }
            }
        }
    }

    /// Suggest a move. See [`Board::hint`].
    pub fn hint(&mut self) -> Option<(GridCoordinate, GridCoordinate)> {
        let hint: Option<(GridCoordinate, GridCoordinate)> = self.board.hint(&mut self.rng);
        if let Some((from, to)) = hint {
            debug!("Hint: move {from} to {to}");
        }
        hint
    }

    /// Number of swaps since the beginning of the game.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Number of cells that do not hold their solution color.
    pub fn misplaced(&self) -> usize {
        self.board.misplaced()
    }

    /// Number of attempts it took to generate the palette.
    pub fn generation_attempts(&self) -> usize {
        self.attempts
    }

    /// Time spent in the game, which stops when the puzzle is solved.
    pub fn duration(&self) -> Duration {
        self.final_duration
            .unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Return the current rows of the board.
    pub fn board_rows(&self) -> &[Vec<Rgb>] {
        self.board.rows()
    }

    pub fn solution(&self) -> &Palette {
        self.board.solution()
    }

    /// Save the solution as a PNG image.
    pub fn export_solution_as_image(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        export::export_image(self.board.solution(), path, IMAGE_MULTIPLIER)
    }

    /// Save the solution as tab-separated hexadecimal colors.
    pub fn export_solution_as_text(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        export::export_text(self.board.solution(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: u8) -> Rgb {
        Rgb::from_bytes(v, v, v)
    }

    fn numbered_session() -> GameSession {
        let rows: Vec<Vec<Rgb>> = (0..3u8)
            .map(|r| (0..3u8).map(|c| value(r * 3 + c + 1)).collect())
            .collect();
        let solution: Palette = Palette::from_rows(rows.clone()).unwrap();
        let mut layout: Vec<Vec<Rgb>> = rows;
        layout[0][1] = value(6);
        layout[1][2] = value(2);
        GameSession::from_board(
            Board::with_layout(solution, layout).unwrap(),
            StdRng::seed_from_u64(0),
        )
    }

    #[test]
    fn swap_then_complete() {
        let mut session: GameSession = numbered_session();
        assert!(!session.is_completed());
        assert_eq!(session.misplaced(), 2);

        assert_eq!(
            session.select(GridCoordinate::new(1, 2)),
            Ok(SelectionOutcome::Armed(GridCoordinate::new(1, 2)))
        );
        assert_eq!(
            session.selection(),
            Selection::Armed(GridCoordinate::new(1, 2))
        );
        let outcome: SelectionOutcome = session.select(GridCoordinate::new(0, 1)).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Completed {
                swap: SwapEvent {
                    a: GridCoordinate::new(1, 2),
                    b: GridCoordinate::new(0, 1),
                    color_a: "#060606".to_string(),
                    color_b: "#020202".to_string(),
                },
                total_moves: 1,
            }
        );
        assert_eq!(session.moves(), 1);
        assert_eq!(session.selection(), Selection::Idle);
        assert!(session.is_completed());
        assert_eq!(
            session.select(GridCoordinate::new(1, 1)),
            Ok(SelectionOutcome::Ignored)
        );
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn deselect_counts_no_move() {
        let mut session: GameSession = numbered_session();
        let cell: GridCoordinate = GridCoordinate::new(1, 1);
        session.select(cell).unwrap();
        assert_eq!(session.select(cell), Ok(SelectionOutcome::Cleared));
        assert_eq!(session.selection(), Selection::Idle);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn rejected_selection_keeps_state() {
        let mut session: GameSession = numbered_session();
        let pinned: GridCoordinate = GridCoordinate::new(2, 2);
        assert_eq!(session.select(pinned), Err(BoardError::PinnedCell(pinned)));
        assert_eq!(session.selection(), Selection::Idle);

        let cell: GridCoordinate = GridCoordinate::new(1, 0);
        session.select(cell).unwrap();
        let outside: GridCoordinate = GridCoordinate::new(0, 3);
        assert_eq!(
            session.select(outside),
            Err(BoardError::InvalidCoordinate(outside))
        );
        assert_eq!(session.select(pinned), Err(BoardError::PinnedCell(pinned)));
        assert_eq!(session.selection(), Selection::Armed(cell));
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn swap_without_completion() {
        let mut session: GameSession = numbered_session();
        session.select(GridCoordinate::new(1, 0)).unwrap();
        let outcome: SelectionOutcome = session.select(GridCoordinate::new(2, 1)).unwrap();
        assert!(matches!(outcome, SelectionOutcome::Swapped(_)));
        assert_eq!(session.moves(), 1);
        assert_eq!(session.misplaced(), 4);
        assert_eq!(
            session.cell_color(GridCoordinate::new(1, 0)),
            Ok("#080808".to_string())
        );
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let options: GameOptions = GameOptions {
            size: 6,
            seed: Some(1234),
            ..GameOptions::default()
        };
        let one: GameSession = GameSession::new(&options).unwrap();
        let two: GameSession = GameSession::new(&options).unwrap();
        assert_eq!(one.solution(), two.solution());
        assert_eq!(one.board_rows(), two.board_rows());
        assert!(one.generation_attempts() >= 1);
    }

    #[test]
    fn size_too_small() {
        assert!(matches!(new_game(2), Err(GeneratorError::InvalidSize(2))));
    }
}
