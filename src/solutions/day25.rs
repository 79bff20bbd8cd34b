use anyhow::{bail, ensure, Result};

use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    East,
    South,
}

struct SeaFloor(Grid<Cell>);

impl SeaFloor {
    /// Moves one herd simultaneously, returning how many sea cucumbers moved.
    fn move_herd(&mut self, herd: Cell) -> usize {
        let (width, height) = (self.0.width(), self.0.height());
        let target = |(r, c): (usize, usize)| match herd {
            Cell::East => (r, (c + 1) % width),
            _ => ((r + 1) % height, c),
        };

        let movers: Vec<(usize, usize)> = self
            .0
            .positions()
            .filter(|&pos| self.0[pos] == herd && self.0[target(pos)] == Cell::Empty)
            .collect();
        for &pos in &movers {
            self.0[pos] = Cell::Empty;
            self.0[target(pos)] = herd;
        }
        movers.len()
    }

    fn step(&mut self) -> usize {
        self.move_herd(Cell::East) + self.move_herd(Cell::South)
    }
}

pub fn day25(input: &str) -> Result<(usize, &'static str)> {
    let mut floor = SeaFloor(Grid::parse(input, |b| match b {
        b'.' => Ok(Cell::Empty),
        b'>' => Ok(Cell::East),
        b'v' => Ok(Cell::South),
        _ => bail!("invalid sea floor {:?}", b as char),
    })?);

    let mut steps = 1;
    while floor.step() > 0 {
        steps += 1;
        ensure!(steps < 1_000_000, "sea cucumbers never settle");
    }

    // The last day has a single puzzle.
    Ok((steps, "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day25() -> Result<()> {
        let example = indoc! {"
            v...>>.vv>
            .vv>>.vv..
            >>.>v>...v
            >>v>>.>.v.
            v>v.vv.v..
            >.>>..v...
            .vv..>.>v.
            v.v..>>v.v
            ....v..v.>
        "};
        assert_eq!(day25(example)?, (58, "-"));
        Ok(())
    }

    #[test]
    fn blocked_herds() -> Result<()> {
        // A south-facing cucumber in a single row can never move, so it blocks the east herd.
        assert_eq!(day25(">..>.v\n")?.0, 4);
        assert_eq!(day25(">.v\n")?.0, 2);
        assert_eq!(day25("v\n.\n>\n")?.0, 2);
        assert_eq!(day25(">>\n")?.0, 1);
        Ok(())
    }

    #[test]
    fn herds_move_in_order() -> Result<()> {
        let start = indoc! {"
            ..........
            .>v....v..
            .......>..
            ..........
        "};
        let mut floor = SeaFloor(Grid::parse(start, |b| {
            Ok(match b {
                b'>' => Cell::East,
                b'v' => Cell::South,
                _ => Cell::Empty,
            })
        })?);
        assert_eq!(floor.step(), 3);
        let rows: Vec<String> = floor
            .0
            .rows()
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Cell::East => '>',
                        Cell::South => 'v',
                        Cell::Empty => '.',
                    })
                    .collect()
            })
            .collect();
        assert_eq!(
            rows,
            ["..........", ".>........", "..v....v>.", ".........."]
        );
        Ok(())
    }
}
