use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aoc2021::{load_input, Solution, ALL_SOLUTIONS};

/// Advent of Code 2021 solutions
#[derive(Debug, Parser)]
struct Args {
    /// Days to run, all of them if omitted
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    days: Vec<u8>,

    /// Directory containing the puzzle inputs named `<day>.txt`
    #[arg(short, long, default_value = "inputs")]
    inputs: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let days: Vec<usize> = if args.days.is_empty() {
        (1..=ALL_SOLUTIONS.len()).collect()
    } else {
        args.days.iter().map(|&d| usize::from(d)).collect()
    };

    let mut total = Duration::default();
    for n in days {
        let input = load_input(&args.inputs, &format!("{}.txt", n))?;
        total += execute_day(n, ALL_SOLUTIONS[n - 1], &input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day(n: usize, f: Solution, input: &str) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (part1, part2) = f(input).with_context(|| format!("day {} failed", n))?;
    let elapsed = start.elapsed();
    info!(day = n, elapsed_us = elapsed.as_micros() as u64, "solved");

    println!("  Solution 1: {}", part1);
    println!("  Solution 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
