//! Shared BFS frontier.
//!
//! The FIFO queue and the per-expansion discovery buffer sit behind one mutex.
//! Workers expanding a vertex call [`Frontier::offer`]; the critical section
//! re-checks the visited set there, so two workers that both saw a neighbor as
//! unvisited cannot both enqueue it.
//!
//! Discoveries are staged with the adjacency slot they were found at and only
//! become poppable in [`Frontier::publish`], in slot order. That keeps the pop
//! order independent of which worker reached the critical section first.
//!
//! Workers may skip the critical section for a neighbor only once it has been
//! published ([`Frontier::is_enqueued`]). A vertex that is merely staged must
//! still be offered so a duplicate at an earlier slot can lower its position.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::VisitedSet;

#[derive(Debug, Clone, Copy)]
struct Discovery {
    slot: usize,
    vertex: usize,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<usize>,
    staged: Vec<Discovery>,
}

/// FIFO of discovered-but-unexpanded vertices, shared by all workers of one BFS.
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    enqueued: VisitedSet,
}

impl Frontier {
    /// Creates an empty frontier for vertices `0..vertex_count`.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            enqueued: VisitedSet::new(vertex_count),
        }
    }

    /// Marks `start` visited and enqueues it.
    pub fn seed(&self, visited: &VisitedSet, start: usize) {
        let mut state = self.lock();
        if visited.try_visit(start) {
            self.enqueued.mark(start);
            state.queue.push_back(start);
        }
    }

    /// Returns `true` once `vertex` has been published to the queue, even if
    /// it has been popped since. Lock-free.
    #[inline]
    pub fn is_enqueued(&self, vertex: usize) -> bool {
        self.enqueued.is_visited(vertex)
    }

    /// Removes the oldest published vertex.
    pub fn pop(&self) -> Option<usize> {
        self.lock().queue.pop_front()
    }

    /// Number of published vertices waiting to be expanded.
    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Returns `true` if nothing is waiting to be expanded.
    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    /// Critical section: claims `vertex` found at adjacency position `slot`.
    ///
    /// Returns `true` iff this call discovered the vertex. If the vertex was
    /// already discovered during the current expansion, its slot is lowered to
    /// the earliest occurrence.
    pub fn offer(&self, visited: &VisitedSet, slot: usize, vertex: usize) -> bool {
        let mut state = self.lock();
        if visited.try_visit(vertex) {
            state.staged.push(Discovery { slot, vertex });
            return true;
        }
        if let Some(found) = state.staged.iter_mut().find(|d| d.vertex == vertex) {
            found.slot = found.slot.min(slot);
        }
        false
    }

    /// Appends everything staged since the last publish, ordered by slot.
    ///
    /// Returns how many vertices were appended.
    pub fn publish(&self) -> usize {
        let mut state = self.lock();
        let FrontierState { queue, staged } = &mut *state;
        staged.sort_unstable_by_key(|d| d.slot);
        let appended = staged.len();
        for d in staged.drain(..) {
            self.enqueued.mark(d.vertex);
            queue.push_back(d.vertex);
        }
        appended
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
