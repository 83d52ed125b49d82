use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "parkernel workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the kernel benchmarks once per worker count
    Bench {
        /// Worker counts to measure
        #[arg(long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
        threads: Vec<usize>,

        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCHES: &[&str] = &["traversal_benchmark", "sort_benchmark"];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            threads,
            quick,
            report_only,
        } => {
            if !report_only {
                run_benchmarks(&threads, quick)?;
            }
            generate_report(&threads)?;
        }
    }

    Ok(())
}

fn baseline_name(threads: usize) -> String {
    format!("t{threads}")
}

fn run_benchmarks(thread_counts: &[usize], quick: bool) -> Result<()> {
    println!("Running scaling benchmarks...");

    // Build first to avoid measuring build time
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--benches", "--release"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile benchmarks");
    }

    for &threads in thread_counts {
        println!("\n>>> Benchmarking with {threads} worker(s)");
        let start = Instant::now();

        for bench in BENCHES {
            let mut cmd = Command::new("cargo");
            cmd.env("PARKERNEL_THREADS", threads.to_string());
            cmd.arg("bench").arg("--bench").arg(bench);

            // Args for the test runner (Criterion) go after --
            cmd.arg("--");
            cmd.arg("--save-baseline").arg(baseline_name(threads));

            if quick {
                cmd.arg("--measurement-time").arg("0.5");
                cmd.arg("--noplot");
                cmd.arg("--sample-size").arg("10");
            }

            let status = cmd
                .status()
                .with_context(|| format!("Failed to run {bench} with {threads} worker(s)"))?;
            if !status.success() {
                eprintln!("Warning: {bench} failed with {threads} worker(s)");
            }
        }

        println!("Finished {threads} worker(s) in {:.2?}", start.elapsed());
    }

    Ok(())
}

fn generate_report(thread_counts: &[usize]) -> Result<()> {
    println!("\n>>> Generating Report...");
    let mut results: HashMap<String, HashMap<String, f64>> = HashMap::new();

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    collect_results(criterion_dir, criterion_dir, &mut results);

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Worker Scaling Report")?;

    let mut workloads: Vec<_> = results.keys().collect();
    workloads.sort();

    let Some(&first) = thread_counts.first() else {
        return Ok(());
    };
    let reference = baseline_name(first);

    // Header
    write!(file, "| Workload |")?;
    for &threads in thread_counts {
        write!(file, " {threads}w (elem/s) | vs {first}w |")?;
    }
    writeln!(file)?;

    // Separator
    write!(file, "|---|")?;
    for _ in thread_counts {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    // Rows
    for workload in workloads {
        write!(file, "| {workload} |")?;

        let reference_ops = results
            .get(workload)
            .and_then(|m| m.get(&reference))
            .copied()
            .unwrap_or(0.0);

        for &threads in thread_counts {
            if let Some(ops) = results.get(workload).and_then(|m| m.get(&baseline_name(threads))) {
                let rel = if reference_ops > 0.0 { ops / reference_ops } else { 0.0 };
                write!(file, " {} | **{rel:.2}x** |", format_rate(*ops))?;
            } else {
                write!(file, " N/A | - |")?;
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_rate(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks `.../<group>/<function>/<baseline>/estimates.json` and records one
/// throughput figure per workload and baseline.
fn collect_results(root: &Path, dir: &Path, results: &mut HashMap<String, HashMap<String, f64>>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(root, &path, results);
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(baseline_dir) = path.parent() else { continue };
        let Some(workload_dir) = baseline_dir.parent() else { continue };
        let Some(baseline) = baseline_dir.file_name().and_then(|s| s.to_str()) else { continue };
        if !baseline.starts_with('t') || baseline == "report" {
            continue;
        }
        let Ok(relative) = workload_dir.strip_prefix(root) else { continue };
        let workload = relative.to_string_lossy().replace('\\', "/");

        // Get throughput from benchmark.json
        let mut elements = 1.0;
        let mut is_throughput = false;
        if let Some(json) = read_json(&baseline_dir.join("benchmark.json")) {
            if let Some(t) = json.get("throughput").and_then(|t| t.get("Elements")) {
                elements = t.as_f64().unwrap_or(1.0);
                is_throughput = true;
            }
        }

        let Some(json) = read_json(&path) else { continue };
        let Some(time_ns) = json
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        else {
            continue;
        };
        if time_ns <= 0.0 {
            continue;
        }

        let metric = if is_throughput {
            (elements * 1e9) / time_ns
        } else {
            1e9 / time_ns
        };
        results
            .entry(workload)
            .or_default()
            .insert(baseline.to_string(), metric);
    }
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}
