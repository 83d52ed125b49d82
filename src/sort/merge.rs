//! Fork-join parallel merge sort.
//!
//! Each range is split at its midpoint; both halves are sorted as two
//! independent tasks (`rayon::join`) and merged sequentially. The halves are
//! disjoint `&mut` sub-slices, so no synchronization is involved beyond the join.

use crate::concurrency::WorkerPool;
use crate::config::KernelConfig;
use crate::{Error, Result};

/// Default size below which ranges are sorted without forking.
pub const DEFAULT_CUTOFF: usize = 1024;

/// Stable parallel merge sort with a sequential cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSort {
    cutoff: usize,
}

impl Default for MergeSort {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF)
    }
}

impl From<&KernelConfig> for MergeSort {
    fn from(config: &KernelConfig) -> Self {
        Self::new(config.merge_cutoff)
    }
}

impl MergeSort {
    /// Creates a sorter that stops forking below `cutoff` elements.
    ///
    /// A cutoff of 0 or 1 forks at every level.
    pub const fn new(cutoff: usize) -> Self {
        Self { cutoff }
    }

    /// Sequential cutoff in elements.
    pub const fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Sorts the inclusive range `data[lo..=hi]` on `pool`.
    ///
    /// `lo > hi` denotes an empty range and does nothing.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `hi >= data.len()`, or if the range
    /// is empty but `lo > data.len()`.
    pub fn sort<T>(&self, pool: &WorkerPool, data: &mut [T], lo: usize, hi: usize) -> Result<()>
    where
        T: Ord + Clone + Send,
    {
        let len = data.len();
        if lo > hi {
            return if lo <= len {
                Ok(())
            } else {
                Err(Error::InvalidRange { lo, hi, len })
            };
        }
        if hi >= len {
            return Err(Error::InvalidRange { lo, hi, len });
        }

        let _span = tracing::debug_span!("merge_sort", lo, hi, cutoff = self.cutoff).entered();
        let range = &mut data[lo..=hi];
        pool.install(|| self.sort_slice(range));
        Ok(())
    }

    /// Sorts all of `data` on `pool`.
    pub fn sort_all<T>(&self, pool: &WorkerPool, data: &mut [T])
    where
        T: Ord + Clone + Send,
    {
        if let Some(hi) = data.len().checked_sub(1) {
            let _span =
                tracing::debug_span!("merge_sort", lo = 0, hi, cutoff = self.cutoff).entered();
            pool.install(|| self.sort_slice(data));
        }
    }

    fn sort_slice<T>(&self, data: &mut [T])
    where
        T: Ord + Clone + Send,
    {
        let len = data.len();
        if len < 2 {
            return;
        }

        // mid = lo + (hi - lo) / 2 with lo = 0, hi = len - 1; left half is [0, mid].
        let split = (len - 1) / 2 + 1;
        let (left, right) = data.split_at_mut(split);
        if len < self.cutoff {
            self.sort_slice(left);
            self.sort_slice(right);
        } else {
            rayon::join(|| self.sort_slice(left), || self.sort_slice(right));
        }
        merge(data, split);
    }
}

/// Merges the sorted runs `data[..split]` and `data[split..]`.
///
/// Ties take the left element first.
fn merge<T: Ord + Clone>(data: &mut [T], split: usize) {
    let mut scratch = Vec::with_capacity(data.len());
    let (mut left, mut right) = (0, split);

    while left < split && right < data.len() {
        if data[left] <= data[right] {
            scratch.push(data[left].clone());
            left += 1;
        } else {
            scratch.push(data[right].clone());
            right += 1;
        }
    }
    scratch.extend_from_slice(&data[left..split]);
    scratch.extend_from_slice(&data[right..]);

    data.clone_from_slice(&scratch);
}
