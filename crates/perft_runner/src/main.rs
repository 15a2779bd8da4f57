//! Perft runner CLI
//!
//! Count move-tree leaves from a position, split them by root move, or check
//! a whole suite of expected counts.

mod suite;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chess_core::{Position, START_FEN, divide, perft};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::suite::{SuiteConfig, run_suite};

fn print_usage() {
    println!("Perft Runner");
    println!();
    println!("Usage:");
    println!("  perft_runner perft <depth> [fen]");
    println!("  perft_runner divide <depth> [fen]");
    println!("  perft_runner suite <config.toml> [--report <out.json>] [--max-depth D]");
    println!();
    println!("Examples:");
    println!("  perft_runner perft 5");
    println!("  perft_runner divide 3 \"8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1\"");
    println!("  perft_runner suite crates/perft_runner/standard.toml --report perft.json");
}

/// `<depth> [fen words...]`; the FEN may be quoted or spread over six args.
fn parse_position_args(args: &[String]) -> Result<(u8, Position)> {
    let Some(depth_arg) = args.first() else {
        bail!("missing depth");
    };
    let depth: u8 = depth_arg
        .parse()
        .with_context(|| format!("invalid depth '{depth_arg}'"))?;

    let fen = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        START_FEN.to_string()
    };
    let pos = Position::from_fen(&fen).with_context(|| format!("invalid FEN '{fen}'"))?;
    Ok((depth, pos))
}

fn run_perft(args: &[String]) -> Result<()> {
    let (depth, pos) = parse_position_args(args)?;
    let start = Instant::now();
    let nodes = perft(&pos, depth);
    let elapsed = start.elapsed();

    info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft done");
    println!("{nodes}");
    Ok(())
}

fn run_divide(args: &[String]) -> Result<()> {
    let (depth, pos) = parse_position_args(args)?;
    let split = divide(&pos, depth);

    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("Moves: {}", split.len());
    println!("Nodes: {}", split.iter().map(|(_, n)| n).sum::<u64>());
    Ok(())
}

fn run_suite_cmd(args: &[String]) -> Result<()> {
    let Some(config_path) = args.first() else {
        bail!("suite requires a config file");
    };

    let mut report_path: Option<PathBuf> = None;
    let mut max_depth: Option<u8> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--report" | "-r" => {
                if i + 1 < args.len() {
                    report_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--max-depth" | "-d" => {
                if i + 1 < args.len() {
                    max_depth = Some(
                        args[i + 1]
                            .parse()
                            .with_context(|| format!("invalid max depth '{}'", args[i + 1]))?,
                    );
                    i += 1;
                }
            }
            other => bail!("unknown option '{other}'"),
        }
        i += 1;
    }

    let mut config = SuiteConfig::load(&PathBuf::from(config_path))?;
    if max_depth.is_some() {
        config.max_depth = max_depth;
    }

    info!(suite = %config.name, cases = config.cases.len(), "running suite");
    let report = run_suite(&config)?;
    info!(
        passed = report.passed,
        failed = report.failed,
        skipped = report.skipped,
        nodes = report.total_nodes,
        "suite finished"
    );

    if let Some(path) = report_path {
        report.save(&path)?;
        info!(path = %path.display(), "report written");
    }

    if !report.all_passed() {
        bail!("{} of {} perft checks failed", report.failed, report.results.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let rest = &args[2..];
    match args[1].as_str() {
        "perft" => run_perft(rest),
        "divide" => run_divide(rest),
        "suite" => run_suite_cmd(rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            bail!("unknown command '{other}'")
        }
    }
}
