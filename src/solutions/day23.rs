use std::{cmp::Reverse, collections::BinaryHeap};

use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashMap;
use tracing::debug;

const EMPTY: u8 = b'.';

/// Lines inserted below the first room row once the diagram is unfolded.
const FOLDED_LINES: [&str; 2] = ["  #D#C#B#A#", "  #D#B#A#C#"];

fn energy(amphipod: u8) -> u32 {
    10u32.pow(u32::from(amphipod - b'A'))
}

/// Where the rooms are; shared by every state of one burrow.
struct Layout {
    hallway: usize,
    /// Hallway position right above each room, room `k` belongs to amphipod `b'A' + k`.
    entrances: Vec<usize>,
    depth: usize,
}

/// Hallway cells followed by the rooms, each listed from top to bottom.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Burrow(Vec<u8>);

impl Layout {
    fn parse(input: &str) -> Result<(Self, Burrow)> {
        let lines: Vec<&[u8]> = input.lines().map(str::as_bytes).collect();
        ensure!(lines.len() >= 4, "burrow diagram too short");

        let hallway = lines[1].iter().filter(|&&c| c != b'#').count();
        let hallway_cells = lines[1].get(1..=hallway).context("malformed hallway")?;

        let entrances: Vec<usize> = (1..=hallway)
            .filter(|&col| lines[2].get(col).map_or(false, |&c| c != b'#' && c != b' '))
            .map(|col| col - 1)
            .collect();
        ensure!(
            !entrances.is_empty() && entrances.len() <= 4,
            "expected between one and four rooms"
        );

        let room_rows: Vec<&[u8]> = lines[2..]
            .iter()
            .copied()
            .take_while(|line| line.get(entrances[0] + 1).map_or(false, |&c| c != b'#'))
            .collect();
        let depth = room_rows.len();

        let mut cells = hallway_cells.to_vec();
        cells.resize(hallway + entrances.len() * depth, EMPTY);
        for (k, &x) in entrances.iter().enumerate() {
            for (y, row) in room_rows.iter().enumerate() {
                cells[hallway + k * depth + y] = *row.get(x + 1).context("room row too short")?;
            }
        }
        let kinds = b'A'..b'A' + entrances.len() as u8;
        ensure!(
            cells.iter().all(|c| *c == EMPTY || kinds.contains(c)),
            "unexpected characters in the burrow"
        );
        for kind in kinds {
            let count = cells.iter().filter(|&&c| c == kind).count();
            ensure!(count == depth, "expected {} amphipods of type {}", depth, kind as char);
        }

        Ok((
            Self {
                hallway,
                entrances,
                depth,
            },
            Burrow(cells),
        ))
    }

    fn room<'a>(&self, burrow: &'a Burrow, k: usize) -> &'a [u8] {
        let start = self.hallway + k * self.depth;
        &burrow.0[start..start + self.depth]
    }

    fn has_stranger(&self, burrow: &Burrow, k: usize) -> bool {
        let owner = b'A' + k as u8;
        self.room(burrow, k).iter().any(|&c| c != EMPTY && c != owner)
    }

    fn is_organized(&self, burrow: &Burrow) -> bool {
        (0..self.entrances.len()).all(|k| {
            let owner = b'A' + k as u8;
            self.room(burrow, k).iter().all(|&c| c == owner)
        })
    }

    /// Hallway cells strictly after `from` up to and including `to` are free.
    fn path_clear(&self, burrow: &Burrow, from: usize, to: usize) -> bool {
        let range = if from < to { from + 1..to + 1 } else { to..from };
        burrow.0[range].iter().all(|&c| c == EMPTY)
    }

    fn moves(&self, burrow: &Burrow) -> Vec<(Burrow, u32)> {
        let mut moves = Vec::new();

        // Hallway to room
        for h in 0..self.hallway {
            let amphipod = burrow.0[h];
            if amphipod == EMPTY {
                continue;
            }
            let k = usize::from(amphipod - b'A');
            let x = self.entrances[k];
            if self.has_stranger(burrow, k) || !self.path_clear(burrow, h, x) {
                continue;
            }
            let free = self.room(burrow, k).iter().filter(|&&c| c == EMPTY).count();
            let mut next = burrow.clone();
            next.0[h] = EMPTY;
            next.0[self.hallway + k * self.depth + free - 1] = amphipod;
            let steps = (free + h.abs_diff(x)) as u32;
            moves.push((next, steps * energy(amphipod)));
        }

        // Room to hallway
        for (k, &x) in self.entrances.iter().enumerate() {
            if !self.has_stranger(burrow, k) {
                continue;
            }
            let Some(y) = self.room(burrow, k).iter().position(|&c| c != EMPTY) else {
                continue;
            };
            let amphipod = self.room(burrow, k)[y];
            for h in (0..self.hallway).filter(|h| !self.entrances.contains(h)) {
                if burrow.0[h] != EMPTY || !self.path_clear(burrow, x, h) {
                    continue;
                }
                let mut next = burrow.clone();
                next.0[self.hallway + k * self.depth + y] = EMPTY;
                next.0[h] = amphipod;
                let steps = (y + 1 + x.abs_diff(h)) as u32;
                moves.push((next, steps * energy(amphipod)));
            }
        }

        moves
    }

    /// Dijkstra over burrow states.
    fn organize(&self, start: Burrow) -> Result<u32> {
        let mut costs: FxHashMap<Burrow, u32> = FxHashMap::default();
        let mut queue = BinaryHeap::new();
        costs.insert(start.clone(), 0);
        queue.push(Reverse((0, start)));

        while let Some(Reverse((cost, burrow))) = queue.pop() {
            if costs.get(&burrow).map_or(false, |&best| best < cost) {
                continue;
            }
            if self.is_organized(&burrow) {
                debug!(states = costs.len(), cost, "burrow organized");
                return Ok(cost);
            }
            for (next, step_cost) in self.moves(&burrow) {
                let total = cost + step_cost;
                if costs.get(&next).map_or(true, |&best| total < best) {
                    costs.insert(next.clone(), total);
                    queue.push(Reverse((total, next)));
                }
            }
        }

        bail!("the amphipods cannot be organized")
    }
}

fn unfold(input: &str) -> String {
    let mut lines: Vec<&str> = input.lines().collect();
    let at = 3.min(lines.len());
    lines.splice(at..at, FOLDED_LINES);
    lines.join("\n")
}

pub fn day23(input: &str) -> Result<(u32, u32)> {
    let (layout, burrow) = Layout::parse(input)?;
    let folded = layout.organize(burrow)?;

    let (layout, burrow) = Layout::parse(&unfold(input))?;
    let unfolded = layout.organize(burrow)?;

    Ok((folded, unfolded))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        #############
        #...........#
        ###B#C#B#D###
          #A#D#C#A#
          #########
    "};

    #[test]
    fn test_day23() -> Result<()> {
        assert_eq!(day23(EXAMPLE)?, (12521, 44169));
        Ok(())
    }

    #[test]
    fn parse_layout() -> Result<()> {
        let (layout, burrow) = Layout::parse(EXAMPLE)?;
        assert_eq!(layout.hallway, 11);
        assert_eq!(layout.entrances, vec![2, 4, 6, 8]);
        assert_eq!(layout.depth, 2);
        assert_eq!(&burrow.0[11..], b"BACDBCDA");

        let (layout, _) = Layout::parse(&unfold(EXAMPLE))?;
        assert_eq!(layout.depth, 4);
        Ok(())
    }

    #[test]
    fn organized_burrow_costs_nothing() -> Result<()> {
        let organized = indoc! {"
            #############
            #...........#
            ###A#B#C#D###
              #A#B#C#D#
              #########
        "};
        let (layout, burrow) = Layout::parse(organized)?;
        assert_eq!(layout.organize(burrow)?, 0);
        Ok(())
    }

    #[test]
    fn single_move() -> Result<()> {
        let almost = indoc! {"
            #############
            #.........A.#
            ###.#B#C#D###
              #A#B#C#D#
              #########
        "};
        let (layout, burrow) = Layout::parse(almost)?;
        assert_eq!(layout.organize(burrow)?, 8);
        Ok(())
    }
}
