//! Frontier-based parallel breadth-first search.

use rayon::prelude::*;

use super::Graph;
use crate::concurrency::{Frontier, VisitedSet, WorkerPool};
use crate::Result;

impl Graph {
    /// Breadth-first traversal from `start`, returning vertices in visiting order.
    ///
    /// The frontier is drained one vertex at a time; each popped vertex's
    /// neighbor list is expanded by a data-parallel loop on `pool`. A neighbor
    /// that is not yet enqueued is claimed inside the frontier's critical
    /// section, which re-checks the visited set before staging it.
    ///
    /// Vertices discovered from the same parent are enqueued in the order of
    /// their first occurrence in the parent's neighbor list, so the result is
    /// the sequential BFS order for any worker count.
    ///
    /// The empty graph yields an empty order for any `start`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidVertex`] if `start` is out of range on a
    /// non-empty graph.
    pub fn bfs(&self, pool: &WorkerPool, start: usize) -> Result<Vec<usize>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.check_vertex(start)?;

        let _span = tracing::debug_span!("bfs", start, vertices = self.vertex_count()).entered();

        let visited = VisitedSet::new(self.vertex_count());
        let frontier = Frontier::new(self.vertex_count());
        frontier.seed(&visited, start);

        let order = pool.install(|| {
            let mut order = Vec::with_capacity(self.vertex_count());
            while let Some(u) = frontier.pop() {
                order.push(u);
                self.adjacent(u)
                    .par_iter()
                    .enumerate()
                    .for_each(|(slot, &v)| {
                        if !frontier.is_enqueued(v) {
                            frontier.offer(&visited, slot, v);
                        }
                    });
                let discovered = frontier.publish();
                tracing::trace!(vertex = u, discovered, "expanded");
            }
            order
        });

        tracing::debug!(visited = order.len(), "bfs finished");
        Ok(order)
    }
}
