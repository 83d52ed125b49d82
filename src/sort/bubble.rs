//! Repeated-pass parallel bubble sort.
//!
//! The default pass structure is odd-even transposition: even passes compare
//! `(0,1), (2,3), ..`, odd passes compare `(1,2), (3,4), ..`. Pairs within a
//! pass never share an index, so every pass is a lock-free data-parallel loop.
//!
//! [`BubbleMode::Legacy`] keeps the overlapping-pair pass, where neighbouring
//! workers race on the shared index of adjacent pairs. The slice is staged
//! through atomics so the race is memory-safe, but values can still be
//! misplaced, duplicated or lost when more than one worker runs.

use core::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crossbeam_utils::CachePadded;
use rayon::prelude::*;

use crate::concurrency::WorkerPool;
use crate::config::BubbleMode;

/// Parallel bubble sort over `i64` slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BubbleSort {
    mode: BubbleMode,
}

impl BubbleSort {
    /// Creates a sorter using `mode`.
    pub const fn new(mode: BubbleMode) -> Self {
        Self { mode }
    }

    /// The pass structure in use.
    pub const fn mode(&self) -> BubbleMode {
        self.mode
    }

    /// Sorts `data` in place on `pool` and returns the number of passes run.
    ///
    /// With [`BubbleMode::OddEven`] the slice is ascending on return. With
    /// [`BubbleMode::Legacy`] that only holds for a single-worker pool.
    pub fn sort(&self, pool: &WorkerPool, data: &mut [i64]) -> usize {
        let _span =
            tracing::debug_span!("bubble_sort", mode = ?self.mode, len = data.len()).entered();
        let passes = match self.mode {
            BubbleMode::OddEven => odd_even_sort(pool, data),
            BubbleMode::Legacy => {
                tracing::warn!("legacy bubble sort selected: overlapping swaps are unsynchronized");
                legacy_sort(pool, data)
            }
        };
        tracing::debug!(passes, "bubble sort finished");
        passes
    }
}

/// Odd-even transposition sort of `data` on `pool`.
///
/// Runs even/odd pass cycles until one full cycle performs no swap and returns
/// the number of passes (two per cycle).
pub fn odd_even_sort<T: Ord + Send>(pool: &WorkerPool, data: &mut [T]) -> usize {
    if data.len() < 2 {
        return 0;
    }

    let swapped = CachePadded::new(AtomicBool::new(false));
    pool.install(|| {
        let mut passes = 0;
        loop {
            swapped.store(false, Ordering::Relaxed);
            transpose_pairs(data, &swapped);
            transpose_pairs(&mut data[1..], &swapped);
            passes += 2;
            if !swapped.load(Ordering::Relaxed) {
                return passes;
            }
        }
    })
}

/// One pass over the disjoint pairs `(0,1), (2,3), ..` of `data`.
fn transpose_pairs<T: Ord + Send>(data: &mut [T], swapped: &AtomicBool) {
    data.par_chunks_exact_mut(2).for_each(|pair| {
        if pair[0] > pair[1] {
            pair.swap(0, 1);
            swapped.store(true, Ordering::Relaxed);
        }
    });
}

fn legacy_sort(pool: &WorkerPool, data: &mut [i64]) -> usize {
    let n = data.len();
    if n < 2 {
        return 0;
    }

    let cells: Vec<AtomicI64> = data.iter().map(|&x| AtomicI64::new(x)).collect();
    let swapped = CachePadded::new(AtomicBool::new(true));

    let passes = pool.install(|| {
        let mut passes = 0;
        while swapped.swap(false, Ordering::Relaxed) {
            (0..n - 1).into_par_iter().for_each(|i| {
                // Load, compare and store are separate steps on purpose.
                let left = cells[i].load(Ordering::Relaxed);
                let right = cells[i + 1].load(Ordering::Relaxed);
                if left > right {
                    cells[i].store(right, Ordering::Relaxed);
                    cells[i + 1].store(left, Ordering::Relaxed);
                    swapped.store(true, Ordering::Relaxed);
                }
            });
            passes += 1;
        }
        passes
    });

    for (slot, cell) in data.iter_mut().zip(cells) {
        *slot = cell.into_inner();
    }
    passes
}
