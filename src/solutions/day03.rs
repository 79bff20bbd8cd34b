use anyhow::{ensure, Context, Result};

use crate::binary_to_decimal;

pub fn day3(input: &str) -> Result<(u64, u64)> {
    let report: Vec<&[u8]> = input.lines().map(|line| line.trim().as_bytes()).collect();
    let bits = report.first().context("empty report")?.len();
    ensure!(
        report
            .iter()
            .all(|word| word.len() == bits && word.iter().all(|b| matches!(b, b'0' | b'1'))),
        "report must consist of binary words of equal length"
    );

    let gamma: Vec<u8> = (0..bits).map(|i| most_common_bit(&report, i)).collect();
    let epsilon: Vec<u8> = gamma.iter().map(|&b| b'0' + b'1' - b).collect();
    let power_consumption = binary_to_decimal(&gamma) * binary_to_decimal(&epsilon);

    let oxygen = filter_words(&report, |bit, common| bit == common)?;
    let co2 = filter_words(&report, |bit, common| bit != common)?;
    let life_support = binary_to_decimal(oxygen) * binary_to_decimal(co2);

    Ok((power_consumption, life_support))
}

/// Ties resolve to `1`.
fn most_common_bit(words: &[&[u8]], index: usize) -> u8 {
    let ones = words.iter().filter(|word| word[index] == b'1').count();
    if 2 * ones >= words.len() {
        b'1'
    } else {
        b'0'
    }
}

fn filter_words<'a>(words: &[&'a [u8]], keep: impl Fn(u8, u8) -> bool) -> Result<&'a [u8]> {
    let mut remaining = words.to_vec();
    let bits = remaining.first().map_or(0, |word| word.len());
    for i in 0..bits {
        if remaining.len() <= 1 {
            break;
        }
        let common = most_common_bit(&remaining, i);
        // When every word shares the bit it is both the most and least common one.
        if remaining.iter().any(|word| keep(word[i], common)) {
            remaining.retain(|word| keep(word[i], common));
        }
    }
    remaining.first().copied().context("no word left after filtering")
}
