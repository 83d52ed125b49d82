//! Visited sets for parallel traversals.
//!
//! A dense, word-packed set of atomic bits, one per vertex. Two access styles
//! are offered on purpose:
//! - [`VisitedSet::try_visit`]: a single `fetch_or`, so check and set cannot be
//!   split by another worker.
//! - [`VisitedSet::is_visited`] followed by [`VisitedSet::mark`]: two separate
//!   operations, which is what the legacy DFS mode uses.

use core::sync::atomic::{AtomicUsize, Ordering};

const WORD_BITS: usize = usize::BITS as usize;

/// Per-traversal visited flags.
pub struct VisitedSet {
    len: usize,
    words: Box<[AtomicUsize]>,
}

impl VisitedSet {
    /// Creates a set for `len` vertices, all unvisited.
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(WORD_BITS))
            .map(|_| AtomicUsize::new(0))
            .collect();
        Self { len, words }
    }

    /// Number of vertices tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no vertices are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether `vertex` has been marked.
    ///
    /// # Panics
    /// Panics if `vertex >= len()`.
    #[inline]
    pub fn is_visited(&self, vertex: usize) -> bool {
        let (word, mask) = self.locate(vertex);
        self.words[word].load(Ordering::Acquire) & mask != 0
    }

    /// Marks `vertex` and returns `true` iff this call observed it unvisited.
    ///
    /// Exactly one of any number of concurrent callers for the same vertex wins.
    ///
    /// # Panics
    /// Panics if `vertex >= len()`.
    #[inline]
    pub fn try_visit(&self, vertex: usize) -> bool {
        let (word, mask) = self.locate(vertex);
        self.words[word].fetch_or(mask, Ordering::AcqRel) & mask == 0
    }

    /// Marks `vertex` without reporting whether it was already set.
    ///
    /// # Panics
    /// Panics if `vertex >= len()`.
    #[inline]
    pub fn mark(&self, vertex: usize) {
        let (word, mask) = self.locate(vertex);
        self.words[word].fetch_or(mask, Ordering::Release);
    }

    /// Number of marked vertices.
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    #[inline(always)]
    fn locate(&self, vertex: usize) -> (usize, usize) {
        assert!(vertex < self.len, "vertex {vertex} out of bounds for visited set of {}", self.len);
        (vertex / WORD_BITS, 1usize << (vertex % WORD_BITS))
    }
}

impl std::fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitedSet")
            .field("len", &self.len)
            .field("visited", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_visit_wins_once() {
        let set = VisitedSet::new(130);
        assert!(set.try_visit(129));
        assert!(!set.try_visit(129));
        assert!(set.is_visited(129));
        assert!(!set.is_visited(128));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn mark_is_visible_to_is_visited() {
        let set = VisitedSet::new(3);
        set.mark(1);
        assert!(set.is_visited(1));
        assert!(!set.try_visit(1));
    }

    #[test]
    fn concurrent_claims_have_a_single_winner_per_vertex() {
        const N: usize = 512;
        let set = VisitedSet::new(N);
        let wins = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for v in 0..N {
                        if set.try_visit(v) {
                            wins.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(wins.load(Ordering::Relaxed), N);
        assert_eq!(set.count(), N);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_vertex_panics() {
        VisitedSet::new(4).is_visited(4);
    }

    #[test]
    fn empty_set_has_no_words() {
        let set = VisitedSet::new(0);
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
    }
}
