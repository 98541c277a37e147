//! Visited-set backends keyed on the 37-bit board packing.
//!
//! Two interchangeable implementations sit behind [`VisitedSet`]: a dense
//! 2³⁷-bit array (16 GiB, feature `dense-visited`) and a hash set with an
//! identity hash. The backend is chosen at build time via the
//! [`DefaultVisited`] alias, so the solver never branches on it.

use std::collections::HashSet;

use memmap2::MmapMut;
use nohash_hasher::BuildNoHashHasher;

use solitaire_core::Board;

/// Width of the packed key.
pub const KEY_BITS: u32 = 37;

/// A set of boards the search has already explored.
pub trait VisitedSet {
    /// Insert the board's packed key. Returns true iff it was already
    /// present.
    fn test_and_set(&mut self, board: Board) -> bool;

    /// Reset to empty, keeping the backing storage.
    fn clear(&mut self);
}

/// Dense backend: one bit per possible packed key, in a single anonymous
/// mapping of 2³⁷ bits (16 GiB). Membership is a load + OR + store.
pub struct DenseVisited {
    bits: MmapMut,
}

impl DenseVisited {
    const BYTES: usize = 1 << (KEY_BITS - 3);

    /// Map the bit array. Anonymous pages arrive zero-filled, so the fresh
    /// mapping is already an empty set. Mapping failure is fatal.
    pub fn new() -> DenseVisited {
        let bits = MmapMut::map_anon(Self::BYTES).unwrap_or_else(|e| {
            eprintln!("failed to map {} GiB visited bitmap: {}", Self::BYTES >> 30, e);
            std::process::abort();
        });
        DenseVisited { bits }
    }
}

impl VisitedSet for DenseVisited {
    #[inline]
    fn test_and_set(&mut self, board: Board) -> bool {
        let idx = board.pack37();
        let byte = &mut self.bits[(idx >> 3) as usize];
        let mask = 1u8 << (idx & 7);
        let hit = *byte & mask != 0;
        *byte |= mask;
        hit
    }

    fn clear(&mut self) {
        self.bits.fill(0);
    }
}

impl Default for DenseVisited {
    fn default() -> Self {
        Self::new()
    }
}

/// Sparse backend: an open-addressed set of packed keys. The 37-bit packing
/// is already well mixed (neighbouring positions differ in several bits),
/// so the keys are hashed with the identity function.
pub struct SparseVisited {
    seen: HashSet<u64, BuildNoHashHasher<u64>>,
}

impl SparseVisited {
    /// Sized for a typical one-empty-start solve without rehashing.
    const INITIAL_CAPACITY: usize = 8_000_000;

    pub fn new() -> SparseVisited {
        SparseVisited {
            seen: HashSet::with_capacity_and_hasher(
                Self::INITIAL_CAPACITY,
                BuildNoHashHasher::default(),
            ),
        }
    }
}

impl VisitedSet for SparseVisited {
    #[inline]
    fn test_and_set(&mut self, board: Board) -> bool {
        !self.seen.insert(board.pack37())
    }

    fn clear(&mut self) {
        self.seen.clear();
    }
}

impl Default for SparseVisited {
    fn default() -> Self {
        Self::new()
    }
}

/// The backend the solver uses, selected at build time.
#[cfg(feature = "dense-visited")]
pub type DefaultVisited = DenseVisited;

/// The backend the solver uses, selected at build time.
#[cfg(not(feature = "dense-visited"))]
pub type DefaultVisited = SparseVisited;

#[cfg(test)]
mod tests {
    use super::*;

    fn check_backend(set: &mut impl VisitedSet) {
        let a = Board::new_default();
        let b = Board::new_with_empty(0, 2);

        assert!(!set.test_and_set(a));
        assert!(set.test_and_set(a));
        assert!(!set.test_and_set(b));
        assert!(set.test_and_set(b));

        set.clear();
        assert!(!set.test_and_set(a));
        assert!(!set.test_and_set(b));
    }

    #[test]
    fn test_sparse_semantics() {
        check_backend(&mut SparseVisited::new());
    }

    #[test]
    fn test_sparse_distinguishes_boards() {
        let mut set = SparseVisited::new();
        // Boards differing in a single cell get distinct keys.
        assert!(!set.test_and_set(Board::new_with_empty(3, 3)));
        assert!(!set.test_and_set(Board::new_with_empty(3, 4)));
        assert!(!set.test_and_set(Board::full()));
    }

    #[test]
    #[ignore] // Maps 16 GiB. Run manually: cargo test test_dense_semantics -- --ignored
    fn test_dense_semantics() {
        check_backend(&mut DenseVisited::new());
    }
}
