//! Drives the four operations against one worker pool.
//!
//! [`Kernel::run_graph`] runs BFS then DFS; [`Kernel::run_sort`] runs bubble
//! sort then merge sort, each on its own copy of the input. Every operation is
//! timed and reported separately, and a failing operation does not stop the
//! next one.

use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::concurrency::WorkerPool;
use crate::config::KernelConfig;
use crate::graph::{DfsOptions, Graph};
use crate::io::OutputSink;
use crate::sort::{BubbleSort, MergeSort};
use crate::Result;

/// The operations a [`Kernel`] can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Parallel breadth-first search.
    Bfs,
    /// Parallel depth-first search.
    Dfs,
    /// Parallel bubble sort.
    BubbleSort,
    /// Parallel merge sort.
    MergeSort,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::BubbleSort => "Bubble Sort",
            Self::MergeSort => "Merge Sort",
        })
    }
}

/// Outcome of one operation.
#[derive(Debug)]
pub struct OperationReport {
    /// Which operation ran.
    pub operation: Operation,
    /// Label written to the output sink.
    pub label: String,
    /// Wall-clock time of the algorithm itself, excluding output.
    pub elapsed: Duration,
    /// Number of values emitted, or why the operation failed.
    pub result: Result<usize>,
}

impl OperationReport {
    /// Returns `true` if the operation completed and its output was written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A configured worker pool plus the kernels that run on it.
#[derive(Debug)]
pub struct Kernel {
    config: KernelConfig,
    pool: WorkerPool,
}

impl Kernel {
    /// Builds the worker pool described by `config`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] for invalid settings or
    /// [`crate::Error::ThreadPool`] if the pool cannot be created.
    pub fn new(config: KernelConfig) -> Result<Self> {
        let pool = config.build_pool()?;
        tracing::info!(
            threads = pool.threads(),
            dfs_mode = ?config.dfs_mode,
            bubble_mode = ?config.bubble_mode,
            "kernel ready"
        );
        Ok(Self { config, pool })
    }

    /// The active configuration.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// The worker pool every operation runs on.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Runs BFS and then DFS from the configured start vertex, writing each
    /// order to `sink`.
    pub fn run_graph<W: Write>(
        &self,
        graph: &Graph,
        sink: &mut OutputSink<W>,
    ) -> Vec<OperationReport> {
        let start = self.config.start_vertex;
        let options = DfsOptions::from(&self.config);
        vec![
            run_operation(
                Operation::Bfs,
                format!("BFS traversal starting from node {start}"),
                sink,
                || graph.bfs(&self.pool, start),
            ),
            run_operation(
                Operation::Dfs,
                format!("DFS traversal starting from node {start}"),
                sink,
                || graph.dfs(&self.pool, start, options),
            ),
        ]
    }

    /// Runs bubble sort and merge sort on separate copies of `values`, writing
    /// each result to `sink`.
    ///
    /// Each copy is made before its operation's timer starts.
    pub fn run_sort<W: Write>(
        &self,
        values: &[i64],
        sink: &mut OutputSink<W>,
    ) -> Vec<OperationReport> {
        let bubble = BubbleSort::new(self.config.bubble_mode);
        let merge = MergeSort::from(&self.config);

        let mut bubbled = values.to_vec();
        let bubble_report = run_operation(
            Operation::BubbleSort,
            "Sorted array using Bubble Sort".to_string(),
            sink,
            || {
                bubble.sort(&self.pool, &mut bubbled);
                Ok(bubbled)
            },
        );

        let mut merged = values.to_vec();
        let merge_report = run_operation(
            Operation::MergeSort,
            "Sorted array using Merge Sort".to_string(),
            sink,
            || {
                merge.sort_all(&self.pool, &mut merged);
                Ok(merged)
            },
        );

        vec![bubble_report, merge_report]
    }
}

fn run_operation<T, W, F>(
    operation: Operation,
    label: String,
    sink: &mut OutputSink<W>,
    op: F,
) -> OperationReport
where
    T: fmt::Display,
    W: Write,
    F: FnOnce() -> Result<Vec<T>>,
{
    let started = Instant::now();
    let outcome = op();
    let elapsed = started.elapsed();

    let result = outcome.and_then(|values| {
        sink.emit(&label, &values)?;
        Ok(values.len())
    });

    match &result {
        Ok(emitted) => tracing::info!(%operation, emitted, ?elapsed, "operation finished"),
        Err(error) => tracing::error!(%operation, %error, "operation failed"),
    }

    OperationReport {
        operation,
        label,
        elapsed,
        result,
    }
}
