use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Player {
    position: u32,
    score: u32,
}

impl Player {
    fn new(position: u32) -> Self {
        Self { position, score: 0 }
    }

    fn advance(self, steps: u32) -> Self {
        let position = (self.position + steps - 1) % 10 + 1;
        Self {
            position,
            score: self.score + position,
        }
    }
}

fn deterministic_game(mut active: Player, mut waiting: Player) -> u32 {
    let mut rolls = 0;
    loop {
        // The next three rolls of the 100-sided die are rolls+1, rolls+2 and rolls+3.
        let steps = (0..3).map(|i| (rolls + i) % 100 + 1).sum();
        rolls += 3;
        active = active.advance(steps);
        if active.score >= 1000 {
            return waiting.score * rolls;
        }
        std::mem::swap(&mut active, &mut waiting);
    }
}

/// Sums of three Dirac dice and the number of universes producing them.
const OUTCOMES: [(u32, u64); 7] = [(3, 1), (4, 3), (5, 6), (6, 7), (7, 6), (8, 3), (9, 1)];

/// Universes in which the active and the waiting player win, respectively.
fn dirac_game(
    active: Player,
    waiting: Player,
    memo: &mut FxHashMap<(Player, Player), (u64, u64)>,
) -> (u64, u64) {
    if let Some(&wins) = memo.get(&(active, waiting)) {
        return wins;
    }

    let mut wins = (0, 0);
    for (sum, universes) in OUTCOMES {
        let moved = active.advance(sum);
        if moved.score >= 21 {
            wins.0 += universes;
        } else {
            let (waiting_wins, moved_wins) = dirac_game(waiting, moved, memo);
            wins.0 += universes * moved_wins;
            wins.1 += universes * waiting_wins;
        }
    }

    memo.insert((active, waiting), wins);
    wins
}

pub fn day21(input: &str) -> Result<(u32, u64)> {
    let positions = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (_, position) = line
                .split_once(':')
                .with_context(|| format!("malformed player {:?}", line))?;
            let position: u32 = position.trim().parse()?;
            ensure!((1..=10).contains(&position), "invalid position {}", position);
            Ok(position)
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(positions.len() == 2, "expected two players");
    let (a, b) = (Player::new(positions[0]), Player::new(positions[1]));

    let mut memo = FxHashMap::default();
    let (a_wins, b_wins) = dirac_game(a, b, &mut memo);

    Ok((deterministic_game(a, b), a_wins.max(b_wins)))
}
