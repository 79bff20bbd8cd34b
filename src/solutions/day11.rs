use anyhow::{ensure, Result};

use crate::grid::Grid;

struct Cavern {
    energy: Grid<u8>,
    flashes: usize,
}

impl Cavern {
    /// Advances one step and returns how many octopuses flashed.
    fn step(&mut self) -> usize {
        let mut flashing = Vec::new();
        for pos in self.energy.positions() {
            self.energy[pos] += 1;
            if self.energy[pos] == 10 {
                flashing.push(pos);
            }
        }

        let mut flashed = 0;
        while let Some((r, c)) = flashing.pop() {
            flashed += 1;
            for n in self.energy.neighbors8(r, c).collect::<Vec<_>>() {
                self.energy[n] += 1;
                if self.energy[n] == 10 {
                    flashing.push(n);
                }
            }
        }

        for level in self.energy.cells_mut() {
            if *level > 9 {
                *level = 0;
            }
        }
        self.flashes += flashed;
        flashed
    }
}

pub fn day11(input: &str) -> Result<(usize, usize)> {
    let energy = Grid::parse_digits(input)?;
    let mut cavern = Cavern { energy, flashes: 0 };

    let mut flashes_after_100 = 0;
    let mut step = 0;
    let synchronized = loop {
        step += 1;
        let flashed = cavern.step();
        if step == 100 {
            flashes_after_100 = cavern.flashes;
        }
        if flashed == cavern.energy.len() {
            break step;
        }
        ensure!(step < 1_000_000, "octopuses never synchronize");
    };

    // Synchronizing before step 100 keeps everything flashing in lockstep.
    if step < 100 {
        for _ in step..100 {
            cavern.step();
        }
        flashes_after_100 = cavern.flashes;
    }

    Ok((flashes_after_100, synchronized))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day11() -> Result<()> {
        let example = indoc! {"
            5483143223
            2745854711
            5264556173
            6141336146
            6357385478
            4167524645
            2176841721
            6882881134
            4846848554
            5283751526
        "};
        assert_eq!(day11(example)?, (1656, 195));
        Ok(())
    }

    #[test]
    fn small_cascade() -> Result<()> {
        let mut cavern = Cavern {
            energy: Grid::parse_digits("11111\n19991\n19191\n19991\n11111\n")?,
            flashes: 0,
        };
        assert_eq!(cavern.step(), 9);
        assert_eq!(
            cavern.energy.to_string(),
            "34543\n40004\n50005\n40004\n34543\n"
        );
        Ok(())
    }
}
