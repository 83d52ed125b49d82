//! Graph representation and parallel traversals.
//!
//! - `adjacency`: undirected adjacency-list [`Graph`] with frontier-based
//!   parallel BFS and fork-join parallel DFS

pub mod adjacency;

pub use adjacency::{DfsOptions, Graph, MAX_FORK_DEPTH};
