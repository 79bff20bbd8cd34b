use std::collections::VecDeque;

use anyhow::{ensure, Result};

use crate::grid::Grid;

fn low_points(heights: &Grid<u8>) -> Vec<(usize, usize)> {
    heights
        .positions()
        .filter(|&(r, c)| {
            heights
                .neighbors4(r, c)
                .all(|n| heights[n] > heights[(r, c)])
        })
        .collect()
}

/// Grows a basin from every seed through cells lower than 9.
fn basin_sizes(heights: &Grid<u8>, seeds: &[(usize, usize)]) -> Vec<usize> {
    let mut visited = heights.map(|&h| h == 9);
    let mut queue = VecDeque::new();

    seeds
        .iter()
        .map(|&seed| {
            let mut size = 0;
            queue.push_back(seed);
            while let Some(pos) = queue.pop_front() {
                if visited[pos] {
                    continue;
                }
                visited[pos] = true;
                size += 1;
                queue.extend(heights.neighbors4(pos.0, pos.1).filter(|&n| !visited[n]));
            }
            size
        })
        .collect()
}

pub fn day9(input: &str) -> Result<(usize, usize)> {
    let heights = Grid::parse_digits(input)?;

    let lows = low_points(&heights);
    let risk = lows.iter().map(|&p| heights[p] as usize + 1).sum();

    let mut basins = basin_sizes(&heights, &lows);
    ensure!(basins.len() >= 3, "fewer than three basins");
    basins.sort_unstable_by(|a, b| b.cmp(a));

    Ok((risk, basins[..3].iter().product()))
}
