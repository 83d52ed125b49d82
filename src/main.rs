use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parkernel::{
    BubbleMode, DfsMode, InputProvider, Kernel, KernelConfig, OperationReport, OutputSink,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "parkernel")]
#[command(about = "Parallel BFS/DFS and bubble/merge sort on a worker pool", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of worker threads (defaults to one per logical CPU)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a graph and run BFS then DFS
    Graph {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Start vertex for both traversals
        #[arg(long)]
        start: Option<usize>,

        /// Visited-set discipline for DFS
        #[arg(long, value_enum)]
        dfs_mode: Option<DfsMode>,

        /// Recursion levels at which DFS still forks
        #[arg(long)]
        fork_depth: Option<usize>,
    },
    /// Read an array and run bubble sort then merge sort
    Sort {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Pass structure for bubble sort
        #[arg(long, value_enum)]
        bubble_mode: Option<BubbleMode>,

        /// Ranges shorter than this are merge sorted without forking
        #[arg(long)]
        merge_cutoff: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkernel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KernelConfig::from_path(path)?,
        None => KernelConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(threads) = cli.threads {
        config.threads = Some(threads);
    }

    let input = match cli.command {
        Commands::Graph {
            input,
            start,
            dfs_mode,
            fork_depth,
        } => {
            if let Some(start) = start {
                config.start_vertex = start;
            }
            if let Some(mode) = dfs_mode {
                config.dfs_mode = mode;
            }
            if let Some(depth) = fork_depth {
                config.dfs_fork_depth = depth;
            }
            Phase::Graph(input)
        }
        Commands::Sort {
            input,
            bubble_mode,
            merge_cutoff,
        } => {
            if let Some(mode) = bubble_mode {
                config.bubble_mode = mode;
            }
            if let Some(cutoff) = merge_cutoff {
                config.merge_cutoff = cutoff;
            }
            Phase::Sort(input)
        }
    };

    let kernel = Kernel::new(config).context("Failed to start kernel")?;
    let stdout = io::stdout();
    let mut sink = OutputSink::new(stdout.lock());

    let reports = match input {
        Phase::Graph(path) => {
            let graph = open_input(path.as_deref())?
                .read_graph()
                .context("Failed to read graph input")?;
            kernel.run_graph(&graph, &mut sink)
        }
        Phase::Sort(path) => {
            let values = open_input(path.as_deref())?
                .read_array()
                .context("Failed to read array input")?;
            kernel.run_sort(&values, &mut sink)
        }
    };

    report_failures(&reports);
    Ok(())
}

enum Phase {
    Graph(Option<PathBuf>),
    Sort(Option<PathBuf>),
}

fn open_input(path: Option<&Path>) -> Result<InputProvider> {
    let provider = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            InputProvider::from_reader(BufReader::new(file))?
        }
        None => InputProvider::from_reader(io::stdin().lock())?,
    };
    Ok(provider)
}

fn report_failures(reports: &[OperationReport]) {
    for report in reports {
        if let Err(error) = &report.result {
            eprintln!("{} failed: {}", report.operation, error);
        }
    }
}
