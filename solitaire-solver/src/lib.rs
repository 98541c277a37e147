//! Exhaustive solver and interactive façade for French marble solitaire.
//!
//! The solver runs an iterative depth-first search over canonical board
//! positions (see [`solver`]), deduplicated through a process-wide visited
//! set with two build-time backends (see [`visited`]). [`game::Game`] wraps
//! a board and its undo history for interactive play.

pub mod game;
pub mod solver;
pub mod stats;
pub mod visited;
