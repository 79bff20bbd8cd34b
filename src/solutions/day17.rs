use std::ops::RangeInclusive;

use anyhow::{ensure, Context, Result};
use rayon::prelude::*;
use regex::Regex;

struct TargetArea {
    x: RangeInclusive<i32>,
    y: RangeInclusive<i32>,
}

impl TargetArea {
    fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(r"x=(-?[0-9]+)\.\.(-?[0-9]+), y=(-?[0-9]+)\.\.(-?[0-9]+)")?;
        let caps = re.captures(input).context("invalid target area definition")?;
        let n = |i: usize| caps[i].parse::<i32>();
        let (x0, x1, y0, y1) = (n(1)?, n(2)?, n(3)?, n(4)?);
        ensure!(0 < x0 && x0 <= x1, "target area needs to be right of the origin");
        ensure!(y0 <= y1 && y1 < 0, "target area needs to be below the origin");
        Ok(Self {
            x: x0..=x1,
            y: y0..=y1,
        })
    }

    /// Any faster upwards shot comes back down through y = 0 with a speed that skips the area.
    fn max_y_velocity(&self) -> i32 {
        -self.y.start() - 1
    }

    fn hits(&self, mut vx: i32, mut vy: i32) -> bool {
        let (mut x, mut y) = (0, 0);
        while x <= *self.x.end() && y >= *self.y.start() {
            if self.x.contains(&x) && self.y.contains(&y) {
                return true;
            }
            x += vx;
            y += vy;
            vx -= vx.signum();
            vy -= 1;
        }
        false
    }
}

pub fn day17(input: &str) -> Result<(i32, usize)> {
    let target = TargetArea::parse(input)?;

    let vy_max = target.max_y_velocity();
    let highest = vy_max * (vy_max + 1) / 2;

    let vy_range = *target.y.start()..=vy_max;
    let hits = (0..=*target.x.end())
        .into_par_iter()
        .map(|vx| {
            vy_range
                .clone()
                .filter(|&vy| target.hits(vx, vy))
                .count()
        })
        .sum();

    Ok((highest, hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day17() -> Result<()> {
        assert_eq!(day17("target area: x=20..30, y=-10..-5\n")?, (45, 112));
        Ok(())
    }

    #[test]
    fn trajectories() -> Result<()> {
        let target = TargetArea::parse("target area: x=20..30, y=-10..-5")?;
        assert!(target.hits(7, 2));
        assert!(target.hits(6, 3));
        assert!(target.hits(9, 0));
        assert!(!target.hits(17, -4));
        assert!(target.hits(6, 9));
        Ok(())
    }

    #[test]
    fn rejects_target_above_origin() {
        assert!(day17("target area: x=20..30, y=5..10").is_err());
    }
}
