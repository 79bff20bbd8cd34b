use anyhow::{ensure, Context, Result};
use rustc_hash::FxHashMap;

struct Polymer {
    template: Vec<u8>,
    rules: FxHashMap<[u8; 2], u8>,
}

impl Polymer {
    fn parse(input: &str) -> Result<Self> {
        let (template, rules) = input.split_once("\n\n").context("missing insertion rules")?;
        let template = template.trim().as_bytes().to_vec();
        ensure!(!template.is_empty(), "empty template");

        let rules = rules
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let rule = line.trim().as_bytes();
                match rule {
                    [a, b, b' ', b'-', b'>', b' ', c] => Ok(([*a, *b], *c)),
                    _ => anyhow::bail!("malformed rule {:?}", line),
                }
            })
            .collect::<Result<_>>()?;

        Ok(Self { template, rules })
    }

    /// Most common minus least common element after `steps` insertion rounds. Only pair counts
    /// are tracked; every element except the first one is the second half of exactly one pair.
    fn evolve(&self, steps: usize) -> Result<u64> {
        let mut pairs: FxHashMap<[u8; 2], u64> = FxHashMap::default();
        for w in self.template.windows(2) {
            *pairs.entry([w[0], w[1]]).or_default() += 1;
        }

        for _ in 0..steps {
            let mut next = FxHashMap::default();
            for (pair, n) in pairs {
                let inserted = *self
                    .rules
                    .get(&pair)
                    .with_context(|| format!("no rule for {}", String::from_utf8_lossy(&pair)))?;
                *next.entry([pair[0], inserted]).or_default() += n;
                *next.entry([inserted, pair[1]]).or_default() += n;
            }
            pairs = next;
        }

        let mut counts = [0u64; 256];
        counts[self.template[0] as usize] += 1;
        for ([_, second], n) in pairs {
            counts[second as usize] += n;
        }
        let present = counts.iter().filter(|&&n| n > 0);
        let max = present.clone().max().copied().unwrap_or(0);
        let min = present.min().copied().unwrap_or(0);
        Ok(max - min)
    }
}

pub fn day14(input: &str) -> Result<(u64, u64)> {
    let polymer = Polymer::parse(&input.replace("\r\n", "\n"))?;
    Ok((polymer.evolve(10)?, polymer.evolve(40)?))
}
