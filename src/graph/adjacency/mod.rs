//! Undirected adjacency-list graph.
//!
//! Vertices are `0..vertex_count`, fixed at construction. Edge insertion
//! appends to both endpoint lists, keeping self-loops and parallel edges as
//! given; traversals filter repeats through their visited set.
//!
//! Insertion needs `&mut Graph` and traversals borrow `&Graph`, so the graph is
//! frozen for as long as any traversal runs.

use crate::{Error, Result};

mod bfs;
mod dfs;

pub use dfs::{DfsOptions, MAX_FORK_DEPTH};

/// An undirected graph stored as per-vertex neighbor lists.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_edge` | \(O(1)\) amortized | Appends to two lists, no dedup |
/// | `neighbors` | \(O(1)\) | Borrowed slice |
/// | `bfs` | \(O(n + m)\) work | One parallel loop per popped vertex |
/// | `dfs` | \(O(n + m)\) work | Fork per child up to the fork depth |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    ///
    /// # Panics
    /// Panics if the vertex table cannot be allocated. Use [`Graph::try_new`]
    /// for counts that come from untrusted input.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Creates a graph with `vertex_count` vertices, reporting allocation
    /// failure instead of aborting.
    ///
    /// # Errors
    /// Returns [`Error::CapacityExceeded`] if the vertex table cannot be
    /// allocated.
    pub fn try_new(vertex_count: usize) -> Result<Self> {
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(vertex_count)
            .map_err(|_| Error::CapacityExceeded { vertex_count })?;
        adjacency.resize_with(vertex_count, Vec::new);
        Ok(Self {
            adjacency,
            edge_count: 0,
        })
    }

    /// Creates a graph and inserts `edges` in order.
    ///
    /// # Errors
    /// - [`Error::CapacityExceeded`] if the vertex table cannot be allocated
    /// - [`Error::InvalidVertex`] for the first endpoint out of range
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::try_new(vertex_count)?;
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds the undirected edge `u - v`.
    ///
    /// `v` is appended to `u`'s list and `u` to `v`'s list. Nothing is modified
    /// when either endpoint is invalid.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVertex`] if `u` or `v` is not below `vertex_count()`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edge_count += 1;
        Ok(())
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of inserted undirected edges, duplicates included.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` for the graph with zero vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns the neighbors of `vertex` in insertion order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVertex`] if `vertex` is out of range.
    pub fn neighbors(&self, vertex: usize) -> Result<&[usize]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// Returns the degree of `vertex`, a self-loop counting twice.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVertex`] if `vertex` is out of range.
    pub fn degree(&self, vertex: usize) -> Result<usize> {
        self.neighbors(vertex).map(<[usize]>::len)
    }

    #[inline]
    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    #[inline]
    pub(crate) fn adjacent(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }
}
