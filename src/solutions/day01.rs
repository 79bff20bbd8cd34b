use anyhow::{Context, Result};

pub fn day1(input: &str) -> Result<(usize, usize)> {
    let depths = input
        .lines()
        .map(|line| {
            line.trim()
                .parse::<u32>()
                .with_context(|| format!("invalid depth {:?}", line))
        })
        .collect::<Result<Vec<_>>>()?;

    // Comparing sums of two overlapping three-windows only depends on the elements that differ,
    // i.e. a window of four.
    Ok((count_increases(&depths, 2), count_increases(&depths, 4)))
}

fn count_increases(depths: &[u32], window: usize) -> usize {
    depths
        .windows(window)
        .filter(|w| w[window - 1] > w[0])
        .count()
}
