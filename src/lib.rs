//! # `parkernel` - Shared-Memory Parallel Traversal and Sorting
//!
//! A small kernel of parallel graph traversals and array sorts that run on an
//! explicitly passed worker pool. The interesting part is the coordination:
//! how workers share a visited set, a work queue or an array without breaking
//! the invariants of the algorithm.
//!
//! ## Parallel Patterns
//!
//! | Kernel | Pattern | Shared state | Synchronization |
//! |--------|---------|--------------|-----------------|
//! | BFS | data-parallel loop per popped vertex | visited set, frontier | frontier mutex (check-then-set inside) |
//! | DFS | recursive fork-join, single initiator | visited set | atomic claim (hardened) or none (legacy) |
//! | Bubble sort | data-parallel loop per pass | the array | disjoint pairs (odd-even) or none (legacy) |
//! | Merge sort | recursive fork-join | disjoint halves | join only |
//!
//! ### Ordering Guarantees
//! - BFS emits vertices in frontier-pop order; vertices discovered from the same
//!   parent are enqueued in adjacency order, so the order matches sequential BFS
//!   for any worker count.
//! - DFS emission order depends on scheduling.
//! - Merge sort is stable and its result is independent of scheduling.
//!
//! ### Legacy Modes
//! [`DfsMode::Legacy`] and [`BubbleMode::Legacy`] keep the unsynchronized
//! check-then-act of the classic formulations. They stay memory-safe (all
//! shared cells are atomics) but may emit a vertex twice, or misplace values,
//! once more than one worker runs. The hardened modes are the defaults.
//!
//! ## Error Model
//! Every [`Error`] is raised before a parallel region starts. Once a traversal
//! or sort begins on validated input it runs to completion.
//!
//! ## Example
//!
//! ```rust
//! use parkernel::{Graph, MergeSort, WorkerPool};
//!
//! let pool = WorkerPool::new(4).unwrap();
//!
//! let graph = Graph::from_edges(5, [(0, 1), (0, 2), (1, 3), (1, 4)]).unwrap();
//! assert_eq!(graph.bfs(&pool, 0).unwrap(), vec![0, 1, 2, 3, 4]);
//!
//! let mut values = vec![5, 2, 9, 1, 5];
//! MergeSort::default().sort_all(&pool, &mut values);
//! assert_eq!(values, vec![1, 2, 5, 5, 9]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kernel;
pub mod sort;

pub use concurrency::WorkerPool;
pub use config::{BubbleMode, DfsMode, KernelConfig};
pub use error::{Error, Result};
pub use graph::{DfsOptions, Graph, MAX_FORK_DEPTH};
pub use io::{InputProvider, OutputSink};
pub use kernel::{Kernel, Operation, OperationReport};
pub use sort::{odd_even_sort, BubbleSort, MergeSort};
