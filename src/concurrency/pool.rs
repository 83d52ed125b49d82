//! Explicit worker-pool handle.
//!
//! Every traversal and sort takes a `&WorkerPool` instead of reaching for
//! rayon's global pool, so sizing and lifetime stay with the caller.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::Result;

/// A fixed-size pool of OS worker threads.
///
/// Data-parallel loops and fork-join spawns issued inside [`WorkerPool::install`]
/// run on this pool's workers only.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Creates a pool with exactly `threads` workers.
    ///
    /// # Errors
    /// Returns [`crate::Error::ThreadPool`] if the OS refuses to spawn the workers.
    pub fn new(threads: usize) -> Result<Self> {
        Self::build(Some(threads), None)
    }

    /// Creates a pool with one worker per logical CPU.
    pub fn with_default_threads() -> Result<Self> {
        Self::build(None, None)
    }

    pub(crate) fn build(threads: Option<usize>, stack_size: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("parkernel-worker-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        if let Some(stack_size) = stack_size {
            builder = builder.stack_size(stack_size);
        }
        let pool = builder.build()?;
        tracing::debug!(threads = pool.current_num_threads(), "worker pool ready");
        Ok(Self { pool })
    }

    /// Number of workers in the pool.
    #[inline]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` on one worker of this pool and waits for it.
    ///
    /// The calling thread blocks; only the chosen worker starts executing `op`,
    /// the rest stay idle until `op` forks.
    #[inline]
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads())
            .finish()
    }
}
