//! Single-initiator fork-join depth-first search.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use super::Graph;
use crate::concurrency::{VisitedSet, WorkerPool};
use crate::config::{DfsMode, KernelConfig};
use crate::Result;

/// Largest fork depth [`Graph::dfs`] honors; deeper settings are clamped.
///
/// Only the forking levels recurse on the worker's call stack, so this bounds
/// the stack a traversal can use regardless of graph shape.
pub const MAX_FORK_DEPTH: usize = 64;

/// Knobs for [`Graph::dfs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfsOptions {
    /// Visited-set discipline.
    pub mode: DfsMode,
    /// Recursion levels that still fork; deeper children are walked
    /// sequentially. Capped at [`MAX_FORK_DEPTH`].
    pub fork_depth: usize,
}

impl Default for DfsOptions {
    fn default() -> Self {
        Self {
            mode: DfsMode::Hardened,
            fork_depth: 16,
        }
    }
}

impl From<&KernelConfig> for DfsOptions {
    fn from(config: &KernelConfig) -> Self {
        Self {
            mode: config.dfs_mode,
            fork_depth: config.dfs_fork_depth,
        }
    }
}

impl Graph {
    /// Depth-first traversal from `start`, returning vertices in emission order.
    ///
    /// One worker of `pool` starts the walk. For the first `fork_depth` levels
    /// each visited vertex forks one task per neighbor; the other workers pick
    /// those tasks up. Below that, each task finishes its subtree with a
    /// sequential preorder walk on an explicit stack. Emission order depends
    /// on scheduling whenever the pool has more than one worker.
    ///
    /// In [`DfsMode::Hardened`] the visited check and set are a single atomic
    /// claim and every reachable vertex is emitted exactly once. In
    /// [`DfsMode::Legacy`] they are separate steps: sibling tasks that reach a
    /// shared neighbor at the same time may both emit and expand it.
    ///
    /// The empty graph yields an empty order for any `start`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidVertex`] if `start` is out of range on a
    /// non-empty graph.
    pub fn dfs(&self, pool: &WorkerPool, start: usize, options: DfsOptions) -> Result<Vec<usize>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.check_vertex(start)?;

        let options = DfsOptions {
            fork_depth: options.fork_depth.min(MAX_FORK_DEPTH),
            ..options
        };
        let _span = tracing::debug_span!(
            "dfs",
            start,
            mode = ?options.mode,
            fork_depth = options.fork_depth
        )
        .entered();
        if options.mode == DfsMode::Legacy {
            tracing::warn!("legacy dfs selected: shared neighbors may be emitted more than once");
        }

        let walk = DfsWalk {
            graph: self,
            visited: VisitedSet::new(self.vertex_count()),
            emitted: Mutex::new(Vec::with_capacity(self.vertex_count())),
            options,
        };
        pool.install(|| walk.descend(start, 0));

        let order = walk.emitted.into_inner().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(emitted = order.len(), "dfs finished");
        Ok(order)
    }
}

struct DfsWalk<'g> {
    graph: &'g Graph,
    visited: VisitedSet,
    emitted: Mutex<Vec<usize>>,
    options: DfsOptions,
}

impl DfsWalk<'_> {
    fn descend(&self, v: usize, depth: usize) {
        if depth >= self.options.fork_depth {
            self.walk_sequential(v);
            return;
        }
        if !self.claim(v) {
            return;
        }
        self.emit(v);

        let neighbors = self.graph.adjacent(v);
        if neighbors.len() > 1 {
            neighbors
                .par_iter()
                .for_each(|&w| self.descend(w, depth + 1));
        } else if let Some(&w) = neighbors.first() {
            self.descend(w, depth + 1);
        }
    }

    /// Preorder walk of everything reachable from `root` on an explicit
    /// worklist, so path length never grows the worker's call stack.
    fn walk_sequential(&self, root: usize) {
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            if self.claim(v) {
                self.emit(v);
                stack.extend(self.graph.adjacent(v).iter().rev().copied());
            }
        }
    }

    fn claim(&self, v: usize) -> bool {
        match self.options.mode {
            DfsMode::Hardened => self.visited.try_visit(v),
            DfsMode::Legacy => {
                if self.visited.is_visited(v) {
                    false
                } else {
                    self.visited.mark(v);
                    true
                }
            }
        }
    }

    fn emit(&self, v: usize) {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(v);
    }
}
