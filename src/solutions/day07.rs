use anyhow::{ensure, Result};
use num::Integer;

use crate::parse_comma_separated;

pub fn day7(input: &str) -> Result<(usize, usize)> {
    let mut positions = parse_comma_separated(input)?;
    ensure!(!positions.is_empty(), "no crabs");
    positions.sort_unstable();

    // The median minimizes the sum of distances.
    let mid = positions.len() / 2;
    let mut medians = vec![positions[mid]];
    if positions.len().is_even() {
        medians.push(positions[mid - 1]);
    }
    let part1 = min_fuel(&positions, &medians, |n| n);

    // With triangular costs the optimum lies within half a step of the mean.
    let (floor, _) = positions.iter().sum::<usize>().div_rem(&positions.len());
    let part2 = min_fuel(&positions, &[floor, floor + 1], |n| n * (n + 1) / 2);

    Ok((part1, part2))
}

fn min_fuel(positions: &[usize], targets: &[usize], cost: impl Fn(usize) -> usize) -> usize {
    targets
        .iter()
        .map(|&target| {
            positions
                .iter()
                .map(|&p| cost(p.abs_diff(target)))
                .sum()
        })
        .min()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day7() -> Result<()> {
        assert_eq!(day7("16,1,2,0,4,2,7,1,2,14\n")?, (37, 168));
        assert_eq!(day7("5\n")?, (0, 0));
        Ok(())
    }
}
