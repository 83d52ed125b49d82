//! Concurrency building blocks shared by the kernels.
//!
//! - [`WorkerPool`]: the explicit executor every entry point runs on
//! - [`VisitedSet`]: atomic per-vertex flags
//! - [`Frontier`]: the mutex-guarded BFS queue

pub mod frontier;
pub mod pool;
pub mod visited;

pub use frontier::Frontier;
pub use pool::WorkerPool;
pub use visited::VisitedSet;
