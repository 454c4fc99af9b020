use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "atomic-ops automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark every operation under every consistency model
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Run the loom model checks
    Loom {
        /// Bound on preemptions explored per execution
        #[arg(long, default_value_t = 3)]
        max_preemptions: u32,
    },
}

/// Criterion group names, strongest model first; the first is the baseline.
const MODELS: &[&str] = &[
    "sequential_consistency",
    "release_consistency",
    "relaxed_consistency",
    "unsynchronized",
];

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkInfo {
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(u64),
    Bytes(u64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Loom { max_preemptions } => run_loom(max_preemptions)?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running consistency-model benchmarks...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0")
        .args(["bench", "--bench", "model_benchmark", "--"]);

    if quick {
        cmd.args(["--measurement-time", "0.1", "--noplot", "--sample-size", "10"]);
    }

    let status = cmd.status().context("Failed to run model_benchmark")?;
    if !status.success() {
        anyhow::bail!("model_benchmark failed");
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn run_loom(max_preemptions: u32) -> Result<()> {
    let status = Command::new("cargo")
        .env("RUSTFLAGS", "--cfg loom")
        .env("LOOM_MAX_PREEMPTIONS", max_preemptions.to_string())
        .args(["test", "--release", "--test", "loom_bitmap"])
        .status()
        .context("Failed to run loom tests")?;
    if !status.success() {
        anyhow::bail!("loom tests failed");
    }
    Ok(())
}

/// Operations per second for each (operation, model) pair.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    for model in MODELS {
        let group_dir = criterion_dir.join(model);
        let entries = match fs::read_dir(&group_dir) {
            Ok(e) => e,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let op_dir = entry.path();
            let op = entry.file_name().to_string_lossy().into_owned();
            if op == "report" {
                continue;
            }
            if let Some(ops) = read_ops_per_sec(&op_dir.join("new"))? {
                results.entry(op).or_default().insert((*model).to_owned(), ops);
            }
        }
    }

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)?;

    writeln!(file, "# Consistency Model Benchmark Report")?;
    writeln!(file)?;

    write!(file, "| Operation |")?;
    for model in MODELS {
        write!(file, " {model} (Ops/s) | vs {} |", MODELS[0])?;
    }
    writeln!(file)?;

    write!(file, "|---|")?;
    for _ in MODELS {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    for (op, by_model) in &results {
        write!(file, "| {op} |")?;
        let baseline = by_model.get(MODELS[0]).copied().unwrap_or(0.0);
        for model in MODELS {
            match by_model.get(*model) {
                Some(ops) => {
                    let rel = if baseline > 0.0 { ops / baseline } else { 0.0 };
                    write!(file, " {} | **{rel:.2}x** |", format_ops(*ops))?;
                }
                None => write!(file, " N/A | - |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn read_ops_per_sec(dir: &Path) -> Result<Option<f64>> {
    let estimates_path = dir.join("estimates.json");
    let Ok(content) = fs::read_to_string(&estimates_path) else {
        return Ok(None);
    };
    let estimates: Estimates = serde_json::from_str(&content)
        .with_context(|| format!("Malformed {}", estimates_path.display()))?;

    let elements = fs::read_to_string(dir.join("benchmark.json"))
        .ok()
        .and_then(|c| serde_json::from_str::<BenchmarkInfo>(&c).ok())
        .and_then(|info| info.throughput)
        .map_or(1.0, |t| match t {
            Throughput::Elements(n) | Throughput::Bytes(n) => n as f64,
        });

    let time_ns = estimates.mean.point_estimate;
    Ok((time_ns > 0.0).then(|| elements * 1e9 / time_ns))
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}
