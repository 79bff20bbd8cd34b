pub mod grid;
mod solutions;

use std::{fmt::Display, path::Path};

use anyhow::{Context, Result};

pub use solutions::*;

/// A day's solution with both answers rendered to strings.
pub type Solution = fn(&str) -> Result<(String, String)>;

macro_rules! all_solutions {
    ($($day:ident),* $(,)?) => {
        pub const ALL_SOLUTIONS: [Solution; 25] = [$(|input: &str| erase($day(input))),*];
    };
}

all_solutions![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14, day15,
    day16, day17, day18, day19, day20, day21, day22, day23, day24, day25,
];

fn erase<S: Display, T: Display>(answers: Result<(S, T)>) -> Result<(String, String)> {
    answers.map(|(part1, part2)| (part1.to_string(), part2.to_string()))
}

pub fn load_input(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn default_input(n: usize) -> Result<String> {
    load_input(Path::new("inputs"), &format!("{}.txt", n))
}

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_u32_from_bytes(bytes: &[u8]) -> usize {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as usize;
    }
    ret
}

/// Interprets `bits` as a big-endian binary number. Accepts both ASCII digits and raw 0/1 values.
pub fn binary_to_decimal(bits: &[u8]) -> u64 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u64::from(b == b'1' || b == 1))
}

/// Parses a single line of comma-separated unsigned integers, e.g. `3,4,3,1,2`.
pub fn parse_comma_separated(input: &str) -> Result<Vec<usize>> {
    input
        .trim()
        .split(',')
        .map(|n| {
            let n = n.trim();
            anyhow::ensure!(
                !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()),
                "invalid number {:?}",
                n
            );
            Ok(parse_u32_from_bytes(n.as_bytes()))
        })
        .collect()
}
