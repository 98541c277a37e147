//! Exhaustive depth-first solver over canonical positions.
//!
//! The search descends in canonical space: every child position is folded
//! into the smallest of its eight dihedral images before the visited check,
//! so each equivalence class is explored at most once. The transforms
//! applied along the path are recorded per frame and unwound during
//! reconstruction, so the returned moves are expressed on the caller's
//! board, not the canonical one.
//!
//! All frames share one move buffer used as an arena: a frame appends its
//! valid moves on push and the buffer is truncated back on pop, giving
//! O(depth × branching) peak memory with a single amortised allocation.

use std::sync::{LazyLock, Mutex};

use solitaire_core::{Board, Move, Transform};

use crate::stats::SolverStats;
use crate::visited::{DefaultVisited, VisitedSet};

const INIT_MOVE_BUFFER: usize = 64;

/// One node of the iterative DFS.
///
/// `move_index`, `move_end` and `moves_start` are cursors into the shared
/// move buffer: the frame's untried moves live in `move_index..move_end`,
/// and the buffer is truncated to `moves_start` when the frame is popped.
struct Frame {
    /// Canonical board at this node.
    board: Board,
    /// Next move to try.
    move_index: usize,
    /// One past this node's last move.
    move_end: usize,
    /// Buffer length before this node's moves were appended.
    moves_start: usize,
    /// Non-identity transforms applied from the root to reach this node's
    /// canonical frame.
    transforms: Vec<Transform>,
    /// The move that produced this node, expressed in the parent's
    /// canonical frame. None only at the root.
    incoming_move: Option<Move>,
}

/// Process-wide visited set: allocated once, cleared in place at the start
/// of every solve, held exclusively for the whole call.
static SEEN: LazyLock<Mutex<DefaultVisited>> =
    LazyLock::new(|| Mutex::new(DefaultVisited::default()));

/// Find a winning move sequence from `start`.
///
/// On success the moves are in forward order, each expressed in `start`'s
/// coordinate system; applying them in order reaches a one-marble board.
/// Returns None when no sequence of legal moves wins. A board that has
/// already won solves to `Some(vec![])`.
///
/// Branching follows the fixed move-table order, so the result is
/// deterministic across runs.
pub fn solve(start: Board) -> Option<Vec<Move>> {
    let mut stats = SolverStats::new();
    solve_with_stats(start, &mut stats)
}

/// Whether any winning sequence exists from `start`.
pub fn is_solvable(start: Board) -> bool {
    solve(start).is_some()
}

/// [`solve`], recording search statistics into `stats`.
pub fn solve_with_stats(start: Board, stats: &mut SolverStats) -> Option<Vec<Move>> {
    if start.has_won() {
        return Some(Vec::new());
    }

    let mut seen = SEEN.lock().unwrap();
    seen.clear();

    let mut moves: Vec<Move> = Vec::with_capacity(INIT_MOVE_BUFFER);
    let mut stack: Vec<Frame> = Vec::new();

    let (canonical, transform) = start.canonicalize();
    let mut transforms = Vec::new();
    if transform != Transform::Identity {
        transforms.push(transform);
    }
    canonical.append_valid_moves(&mut moves);
    stack.push(Frame {
        board: canonical,
        move_index: 0,
        move_end: moves.len(),
        moves_start: 0,
        transforms,
        incoming_move: None,
    });
    stats.frames_expanded += 1;

    while let Some(top) = stack.last_mut() {
        if top.move_index >= top.move_end {
            moves.truncate(top.moves_start);
            stack.pop();
            continue;
        }

        let m = moves[top.move_index];
        top.move_index += 1;
        let next = top.board.make_move(m);
        let (canonical, transform) = next.canonicalize();

        if seen.test_and_set(canonical) {
            stats.dedup_hits += 1;
            continue;
        }

        let moves_start = moves.len();
        canonical.append_valid_moves(&mut moves);
        let move_end = moves.len();
        let mut transforms = top.transforms.clone();
        if transform != Transform::Identity {
            transforms.push(transform);
        }

        let won = next.has_won();
        stack.push(Frame {
            board: canonical,
            move_index: moves_start,
            move_end,
            moves_start,
            transforms,
            incoming_move: Some(m),
        });
        stats.frames_expanded += 1;
        stats.max_depth = stats.max_depth.max(stack.len() as u64);

        if won {
            return Some(reconstruct(&stack));
        }
    }

    None
}

/// Pull the winning path out of the DFS stack and express every move on
/// the caller's board.
///
/// Each frame's incoming move lives in its *parent's* canonical frame, and
/// the parent's transform list is exactly the chain that maps the caller's
/// frame there. Undoing that chain (inverses, last transform first)
/// brings the move home; reversing the collected list puts the earliest
/// move first.
fn reconstruct(stack: &[Frame]) -> Vec<Move> {
    let mut solution = Vec::with_capacity(stack.len());
    for i in (1..stack.len()).rev() {
        if let Some(m) = stack[i].incoming_move {
            let mut mapped = m;
            for &t in stack[i - 1].transforms.iter().rev() {
                mapped = mapped.transformed(t.inverse());
            }
            solution.push(mapped);
        }
    }
    solution.reverse();
    solution
}
