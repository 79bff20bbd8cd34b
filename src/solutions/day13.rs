use anyhow::{bail, Context, Result};
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;

#[derive(Clone, Copy, Debug)]
enum Fold {
    Left(u32),
    Up(u32),
}

impl Fold {
    /// Returns `None` for dots whose mirror image would fall off the paper.
    fn apply(self, (x, y): (u32, u32)) -> Option<(u32, u32)> {
        match self {
            Fold::Left(line) if x > line => Some((line.checked_mul(2)?.checked_sub(x)?, y)),
            Fold::Up(line) if y > line => Some((x, line.checked_mul(2)?.checked_sub(y)?)),
            _ => Some((x, y)),
        }
    }
}

fn render(dots: &FxHashSet<(u32, u32)>) -> String {
    let width = dots.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let height = dots.iter().map(|&(_, y)| y).max().unwrap_or(0);
    let mut picture = String::new();
    for y in 0..=height {
        picture.push('\n');
        for x in 0..=width {
            picture.push(if dots.contains(&(x, y)) { '█' } else { ' ' });
        }
    }
    picture
}

pub fn day13(input: &str) -> Result<(usize, String)> {
    let mut lines = input.lines();
    let mut dots: FxHashSet<(u32, u32)> = FxHashSet::default();
    for line in lines.by_ref().take_while(|line| !line.trim().is_empty()) {
        let (x, y) = line
            .trim()
            .split_once(',')
            .with_context(|| format!("malformed dot {:?}", line))?;
        dots.insert((x.parse()?, y.parse()?));
    }

    let fold_re = Regex::new("fold along ([xy])=([0-9]+)")?;
    let folds = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let caps = fold_re
                .captures(line)
                .with_context(|| format!("malformed fold {:?}", line))?;
            let coordinate: u32 = caps[2].parse()?;
            Ok(match &caps[1] {
                "x" => Fold::Left(coordinate),
                "y" => Fold::Up(coordinate),
                axis => bail!("unknown axis {}", axis),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut after_first = None;
    for fold in folds {
        dots = dots
            .into_iter()
            .map(|dot| fold.apply(dot))
            .collect::<Option<_>>()
            .with_context(|| format!("{:?} moves dots off the paper", fold))?;
        debug!(?fold, dots = dots.len(), "folded");
        after_first.get_or_insert(dots.len());
    }

    Ok((after_first.context("no folds")?, render(&dots)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day13() -> Result<()> {
        let example = indoc! {"
            6,10
            0,14
            9,10
            0,3
            10,4
            4,11
            6,0
            6,12
            4,1
            0,13
            10,12
            3,4
            3,0
            8,4
            1,10
            2,14
            8,10
            9,0

            fold along y=7
            fold along x=5
        "};
        let (part1, part2) = day13(example)?;
        assert_eq!(part1, 17);
        assert_eq!(part2, "\n█████\n█   █\n█   █\n█   █\n█████");
        Ok(())
    }

    #[test]
    fn fold_out_of_range() {
        assert!(day13("0,0\n9,0\n\nfold along x=2\n").is_err());
        assert!(day13("0,0\n").is_err());
        assert!(day13("0,4294967295\n\nfold along y=3000000000\n").is_err());
    }
}
