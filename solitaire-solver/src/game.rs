//! Game façade: the current board plus a move history.
//!
//! All user-facing entry points validate first and report failure through
//! return values; nothing here panics on bad input. Hints and solutions
//! delegate to the solver.

use std::fmt::Write as _;

use solitaire_core::{Board, Direction, Move};

use crate::solver;

/// A marble solitaire game in progress.
pub struct Game {
    board: Board,
    history: Vec<Move>,
}

impl Game {
    /// Start from the conventional board, (2,3) empty.
    pub fn new() -> Game {
        Game {
            board: Board::new_default(),
            history: Vec::new(),
        }
    }

    /// Restart from a full board with the given cell empty, discarding the
    /// move history. Non-playable cells fall back to the default start.
    pub fn set_custom_start(&mut self, r: usize, c: usize) {
        self.board = Board::new_with_empty(r, c);
        self.history.clear();
    }

    /// The current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Marbles currently on the board.
    pub fn marbles_left(&self) -> u32 {
        self.board.marble_count()
    }

    /// Moves applied since the start.
    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    /// Destination of a jump from (r, c) in the given direction, if it
    /// stays on the 7×7 square.
    fn destination(r: usize, c: usize, dir: Direction) -> Option<(usize, usize)> {
        match dir {
            Direction::Up => r.checked_sub(2).map(|r2| (r2, c)),
            Direction::Down => Some((r + 2, c)),
            Direction::Left => c.checked_sub(2).map(|c2| (r, c2)),
            Direction::Right => Some((r, c + 2)),
        }
    }

    /// Whether the marble at (r, c) can jump in the given direction.
    pub fn is_valid_move(&self, r: usize, c: usize, dir: Direction) -> bool {
        match Self::destination(r, c, dir) {
            Some((r2, c2)) => self.board.is_valid_move(r, c, r2, c2),
            None => false,
        }
    }

    /// Jump the marble at (r, c) in the given direction. Returns false and
    /// leaves the game untouched if the move is not legal.
    pub fn make_move(&mut self, r: usize, c: usize, dir: Direction) -> bool {
        let Some((r2, c2)) = Self::destination(r, c, dir) else {
            return false;
        };
        let Some(m) = self.board.move_between(r, c, r2, c2) else {
            return false;
        };
        self.board = self.board.make_move(m);
        self.history.push(m);
        true
    }

    /// Take back the most recent move. Returns false if there is nothing
    /// to undo.
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(m) => {
                self.board = self.board.undo_move(m);
                true
            }
            None => false,
        }
    }

    /// Whether any legal move remains.
    pub fn has_moves(&self) -> bool {
        !self.board.valid_moves().is_empty()
    }

    /// Whether exactly one marble remains.
    pub fn has_won(&self) -> bool {
        self.board.has_won()
    }

    /// The first move of a winning sequence, as `"<row> <col> <direction>"`,
    /// or the empty string if the board is unsolvable.
    ///
    /// May take seconds to minutes; it solves the whole board.
    pub fn best_move(&self) -> String {
        match solver::solve(self.board) {
            Some(solution) => solution.first().map(Move::to_string).unwrap_or_default(),
            None => String::new(),
        }
    }

    /// The full winning sequence, one move per line, or
    /// `"No solution exists."` if the board is unsolvable.
    pub fn solution(&self) -> String {
        match solver::solve(self.board) {
            Some(solution) => {
                let mut out = String::new();
                for m in &solution {
                    let _ = writeln!(out, "{}", m);
                }
                out
            }
            None => "No solution exists.".to_string(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(r: usize, c: usize) -> u64 {
        1u64 << (63 - (r * 7 + c))
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.marbles_left(), 36);
        assert_eq!(game.moves_made(), 0);
        assert!(game.has_moves());
        assert!(!game.has_won());
    }

    #[test]
    fn test_make_then_undo_restores_board() {
        let mut game = Game::new();
        let before = game.board();

        assert!(game.make_move(0, 3, Direction::Down));
        assert_eq!(game.marbles_left(), 35);
        assert_eq!(game.moves_made(), 1);
        assert_ne!(game.board(), before);

        assert!(game.undo_move());
        assert_eq!(game.board(), before);
        assert_eq!(game.moves_made(), 0);
    }

    #[test]
    fn test_invalid_move_changes_nothing() {
        let mut game = Game::new();
        let before = game.board();

        // Occupied destination, empty source, and off-board jumps.
        assert!(!game.make_move(3, 3, Direction::Right));
        assert!(!game.make_move(2, 3, Direction::Up));
        assert!(!game.make_move(0, 2, Direction::Up));
        assert!(!game.make_move(3, 0, Direction::Left));

        assert_eq!(game.board(), before);
        assert_eq!(game.moves_made(), 0);
    }

    #[test]
    fn test_is_valid_move_matches_make_move() {
        let game = Game::new();
        assert!(game.is_valid_move(0, 3, Direction::Down));
        assert!(game.is_valid_move(4, 3, Direction::Up));
        assert!(game.is_valid_move(2, 1, Direction::Right));
        assert!(game.is_valid_move(2, 5, Direction::Left));
        assert!(!game.is_valid_move(3, 3, Direction::Right));
        assert!(!game.is_valid_move(0, 3, Direction::Up));
    }

    #[test]
    fn test_undo_on_fresh_game() {
        let mut game = Game::new();
        assert!(!game.undo_move());
    }

    #[test]
    fn test_custom_start_clears_history() {
        let mut game = Game::new();
        assert!(game.make_move(0, 3, Direction::Down));

        game.set_custom_start(0, 2);
        assert_eq!(game.moves_made(), 0);
        assert_eq!(game.board(), Board::new_with_empty(0, 2));
        assert!(!game.undo_move());
    }

    #[test]
    fn test_best_move_on_tiny_board() {
        let game = Game {
            board: Board::from_u64(bit(3, 0) | bit(3, 1)),
            history: Vec::new(),
        };
        assert_eq!(game.best_move(), "3 0 right");
    }

    #[test]
    fn test_solution_strings() {
        let solvable = Game {
            board: Board::from_u64(bit(3, 1) | bit(3, 2) | bit(3, 4)),
            history: Vec::new(),
        };
        assert_eq!(solvable.solution(), "3 1 right\n3 3 right\n");

        let dead = Game {
            board: Board::from_u64(bit(3, 3) | bit(3, 6)),
            history: Vec::new(),
        };
        assert_eq!(dead.best_move(), "");
        assert_eq!(dead.solution(), "No solution exists.");
    }

    #[test]
    fn test_won_game_has_no_moves() {
        let game = Game {
            board: Board::from_u64(bit(3, 3)),
            history: Vec::new(),
        };
        assert!(game.has_won());
        assert!(!game.has_moves());
    }
}
