use anyhow::{Context, Result};
use petgraph::{
    algo::dijkstra,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::grid::Grid;

/// Lowest total risk from the top left to the bottom right corner. Every edge weighs the risk of
/// the cell it enters.
fn least_risky_path(risks: &Grid<u8>) -> Result<u32> {
    let idx = |(r, c): (usize, usize)| NodeIndex::new(r * risks.width() + c);

    let mut graph = DiGraph::<(), u32>::with_capacity(risks.len(), 4 * risks.len());
    for _ in 0..risks.len() {
        graph.add_node(());
    }
    for pos in risks.positions() {
        for n in risks.neighbors4(pos.0, pos.1) {
            graph.add_edge(idx(pos), idx(n), u32::from(risks[n]));
        }
    }

    let start = idx((0, 0));
    let goal = idx((risks.height() - 1, risks.width() - 1));
    let costs = dijkstra(&graph, start, Some(goal), |e| *e.weight());
    costs.get(&goal).copied().context("destination unreachable")
}

/// Tiles the cavern 5x5; each tile step adds one to the risk, wrapping 9 back to 1.
fn grow(risks: &Grid<u8>) -> Result<Grid<u8>> {
    let (width, height) = (risks.width() * 5, risks.height() * 5);
    let mut cells = Vec::with_capacity(width * height);
    for r in 0..height {
        for c in 0..width {
            let base = risks[(r % risks.height(), c % risks.width())];
            let offset = (r / risks.height() + c / risks.width()) as u8;
            cells.push((base + offset + 8) % 9 + 1);
        }
    }
    Grid::new(width, height, cells)
}

pub fn day15(input: &str) -> Result<(u32, u32)> {
    let risks = Grid::parse_digits(input)?;
    Ok((least_risky_path(&risks)?, least_risky_path(&grow(&risks)?)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day15() -> Result<()> {
        let example = indoc! {"
            1163751742
            1381373672
            2136511328
            3694931569
            7463417111
            1319128137
            1359912421
            3125421639
            1293138521
            2311944581
        "};
        assert_eq!(day15(example)?, (40, 315));
        Ok(())
    }

    #[test]
    fn tiles_wrap_around() -> Result<()> {
        let grown = grow(&Grid::parse_digits("8\n")?)?;
        assert_eq!(grown.rows().next(), Some(&[8, 9, 1, 2, 3][..]));
        assert_eq!(grown[(4, 4)], 7);
        Ok(())
    }
}
