//! Kernel configuration.
//!
//! Values are layered, lowest precedence first: built-in defaults, a JSON file,
//! `PARKERNEL_*` environment variables, then whatever the caller sets last
//! (the command-line driver applies its flags on top).

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::concurrency::WorkerPool;
use crate::graph::MAX_FORK_DEPTH;
use crate::{Error, Result};

/// Environment variable overriding [`KernelConfig::threads`].
pub const ENV_THREADS: &str = "PARKERNEL_THREADS";
/// Environment variable overriding [`KernelConfig::dfs_mode`].
pub const ENV_DFS_MODE: &str = "PARKERNEL_DFS_MODE";
/// Environment variable overriding [`KernelConfig::bubble_mode`].
pub const ENV_BUBBLE_MODE: &str = "PARKERNEL_BUBBLE_MODE";

/// How parallel DFS guards its visited set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DfsMode {
    /// Check-and-set is a single atomic claim: every vertex is emitted once.
    #[default]
    Hardened,
    /// Check and set are separate steps: shared neighbors may be emitted twice.
    Legacy,
}

impl FromStr for DfsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardened" => Ok(Self::Hardened),
            "legacy" => Ok(Self::Legacy),
            other => Err(Error::Config {
                message: format!("unknown dfs mode `{other}` (expected `hardened` or `legacy`)"),
            }),
        }
    }
}

/// Pass structure used by parallel bubble sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BubbleMode {
    /// Alternating even/odd passes over disjoint pairs. Always sorts.
    #[default]
    #[value(name = "odd_even", alias = "odd-even")]
    OddEven,
    /// One parallel pass over all overlapping pairs, unsynchronized swaps.
    Legacy,
}

impl FromStr for BubbleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "odd_even" => Ok(Self::OddEven),
            "legacy" => Ok(Self::Legacy),
            other => Err(Error::Config {
                message: format!("unknown bubble mode `{other}` (expected `odd_even` or `legacy`)"),
            }),
        }
    }
}

/// Tunables for the worker pool and every kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    /// Worker count. `None` means one worker per logical CPU.
    pub threads: Option<usize>,
    /// Per-worker stack size in bytes. `None` keeps rayon's default.
    pub stack_size: Option<usize>,
    /// Start vertex for both traversals.
    pub start_vertex: usize,
    /// Visited-set discipline for DFS.
    pub dfs_mode: DfsMode,
    /// Recursion levels below which DFS still forks; deeper levels run sequentially.
    /// At most [`MAX_FORK_DEPTH`].
    pub dfs_fork_depth: usize,
    /// Pass structure for bubble sort.
    pub bubble_mode: BubbleMode,
    /// Ranges shorter than this are merge sorted without forking.
    pub merge_cutoff: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            threads: None,
            stack_size: None,
            start_vertex: 0,
            dfs_mode: DfsMode::Hardened,
            dfs_fork_depth: 16,
            bubble_mode: BubbleMode::OddEven,
            merge_cutoff: 1024,
        }
    }
}

impl KernelConfig {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Applies `PARKERNEL_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using `lookup` in place of the process environment.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_THREADS) {
            let threads = raw.trim().parse::<usize>().map_err(|e| Error::Config {
                message: format!("{ENV_THREADS}=`{raw}`: {e}"),
            })?;
            self.threads = Some(threads);
        }
        if let Some(raw) = lookup(ENV_DFS_MODE) {
            self.dfs_mode = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_BUBBLE_MODE) {
            self.bubble_mode = raw.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects values no kernel can run with.
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(Error::Config {
                message: "threads must be > 0".to_string(),
            });
        }
        if self.stack_size == Some(0) {
            return Err(Error::Config {
                message: "stack_size must be > 0".to_string(),
            });
        }
        if self.dfs_fork_depth > MAX_FORK_DEPTH {
            return Err(Error::Config {
                message: format!("dfs_fork_depth must be <= {MAX_FORK_DEPTH}"),
            });
        }
        Ok(())
    }

    /// Builds the worker pool described by this configuration.
    pub fn build_pool(&self) -> Result<WorkerPool> {
        self.validate()?;
        WorkerPool::build(self.threads, self.stack_size)
    }
}
