use anyhow::{ensure, Result};
use regex::Regex;

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: (i32, i32),
    to: (i32, i32),
}

impl Segment {
    fn is_diagonal(&self) -> bool {
        self.from.0 != self.to.0 && self.from.1 != self.to.1
    }

    fn points(&self) -> impl Iterator<Item = (i32, i32)> {
        let step = (
            (self.to.0 - self.from.0).signum(),
            (self.to.1 - self.from.1).signum(),
        );
        let len = (self.to.0 - self.from.0)
            .abs()
            .max((self.to.1 - self.from.1).abs());
        let from = self.from;
        (0..=len).map(move |i| (from.0 + i * step.0, from.1 + i * step.1))
    }
}

struct Canvas {
    width: usize,
    counts: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            counts: vec![0; width * height],
        }
    }

    fn draw(&mut self, segment: &Segment) {
        for (x, y) in segment.points() {
            let cell = &mut self.counts[y as usize * self.width + x as usize];
            *cell = cell.saturating_add(1);
        }
    }

    fn overlaps(&self) -> usize {
        self.counts.iter().filter(|&&n| n >= 2).count()
    }
}

pub fn day5(input: &str) -> Result<(usize, usize)> {
    let re = Regex::new("^([0-9]+),([0-9]+) -> ([0-9]+),([0-9]+)$")?;
    let segments = input
        .lines()
        .map(|line| {
            let caps = re
                .captures(line.trim())
                .ok_or_else(|| anyhow::anyhow!("malformed segment {:?}", line))?;
            let n = |i: usize| caps[i].parse::<i32>();
            let segment = Segment {
                from: (n(1)?, n(2)?),
                to: (n(3)?, n(4)?),
            };
            let (dx, dy) = (segment.to.0 - segment.from.0, segment.to.1 - segment.from.1);
            ensure!(
                dx == 0 || dy == 0 || dx.abs() == dy.abs(),
                "segment {:?} is neither straight nor diagonal",
                line
            );
            Ok(segment)
        })
        .collect::<Result<Vec<_>>>()?;

    let width = segments.iter().map(|s| s.from.0.max(s.to.0)).max().unwrap_or(0) as usize + 1;
    let height = segments.iter().map(|s| s.from.1.max(s.to.1)).max().unwrap_or(0) as usize + 1;
    let mut canvas = Canvas::new(width, height);

    // Draw straight lines first so both answers come from a single canvas.
    for segment in segments.iter().filter(|s| !s.is_diagonal()) {
        canvas.draw(segment);
    }
    let part1 = canvas.overlaps();
    for segment in segments.iter().filter(|s| s.is_diagonal()) {
        canvas.draw(segment);
    }

    Ok((part1, canvas.overlaps()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day5() -> Result<()> {
        let example = indoc! {"
            0,9 -> 5,9
            8,0 -> 0,8
            9,4 -> 3,4
            2,2 -> 2,1
            7,0 -> 7,4
            6,4 -> 2,0
            0,9 -> 2,9
            3,4 -> 1,4
            0,0 -> 8,8
            5,5 -> 8,2
        "};
        assert_eq!(day5(example)?, (5, 12));
        Ok(())
    }

    #[test]
    fn rejects_skewed_segments() {
        assert!(day5("0,0 -> 2,1\n").is_err());
    }
}
