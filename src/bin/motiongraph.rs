use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "motiongraph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a scene at one clock value and print the snapshot as JSON.
    Eval(EvalArgs),
    /// Resolve a scene over a range of clock values and print one fingerprint per frame.
    Sweep(SweepArgs),
    /// Build a scene and report whether it is valid.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clock value in seconds.
    #[arg(long, allow_negative_numbers = true)]
    time: f64,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First clock value.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    start: f64,

    /// Last clock value (inclusive).
    #[arg(long, allow_negative_numbers = true)]
    end: f64,

    /// Clock increment between frames.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    step: f64,

    /// Resolve frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<motiongraph::Graph> {
    motiongraph::Graph::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let graph = load(&args.in_path)?;
    let report = graph.evaluate(args.time).report(&graph);
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("serialize snapshot")?;
    println!("{out}");
    Ok(())
}

const MAX_SWEEP_FRAMES: usize = 1_000_000;

/// Frame count slack so an end that is a whole number of steps away stays included.
const SWEEP_EPSILON: f64 = 1e-9;

fn sweep_times(start: f64, end: f64, step: f64) -> anyhow::Result<Vec<f64>> {
    anyhow::ensure!(
        start.is_finite() && end.is_finite(),
        "sweep bounds must be finite"
    );
    anyhow::ensure!(end >= start, "sweep end ({end}) is before start ({start})");
    anyhow::ensure!(
        step.is_finite() && step > 0.0,
        "sweep step must be positive, got {step}"
    );
    let steps = ((end - start) / step + SWEEP_EPSILON).floor();
    anyhow::ensure!(
        steps < MAX_SWEEP_FRAMES as f64,
        "sweep of {steps} steps exceeds {MAX_SWEEP_FRAMES} frames"
    );
    let n = steps as usize + 1;
    Ok((0..n).map(|i| (start + i as f64 * step).min(end)).collect())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let graph = load(&args.in_path)?;
    let times = sweep_times(args.start, args.end, args.step)?;

    let snapshots = if args.parallel {
        match args.threads {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("build rayon thread pool")?
                .install(|| graph.evaluate_many(&times)),
            None => graph.evaluate_many(&times),
        }
    } else {
        times.iter().map(|&t| graph.evaluate(t)).collect()
    };

    let mut distinct = std::collections::HashSet::new();
    for s in &snapshots {
        let fp = s.fingerprint();
        distinct.insert(fp);
        println!("{:.6} {fp}", s.time());
    }
    eprintln!(
        "{} frames, {} distinct snapshots",
        snapshots.len(),
        distinct.len()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let graph = load(&args.in_path)?;
    eprintln!(
        "ok: {} nodes, root '{}'",
        graph.len(),
        graph.node_id(graph.root())
    );
    Ok(())
}
