use anyhow::{bail, ensure, Context, Result};
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cuboid {
    min: [i64; 3],
    max: [i64; 3],
}

impl Cuboid {
    fn volume(&self) -> i64 {
        (0..3).map(|i| self.max[i] - self.min[i] + 1).product()
    }

    fn intersection(&self, other: &Cuboid) -> Option<Cuboid> {
        let mut result = *self;
        for i in 0..3 {
            result.min[i] = self.min[i].max(other.min[i]);
            result.max[i] = self.max[i].min(other.max[i]);
            if result.min[i] > result.max[i] {
                return None;
            }
        }
        Some(result)
    }

    fn is_initialization(&self) -> bool {
        (0..3).all(|i| self.min[i] >= -50 && self.max[i] <= 50)
    }
}

struct Step {
    on: bool,
    cuboid: Cuboid,
}

/// Signed volume accounting: every step cancels its overlap with everything counted so far, so
/// overlapping regions are neither counted twice nor turned off twice.
fn reboot<'a>(steps: impl Iterator<Item = &'a Step>) -> i64 {
    let mut zones: Vec<(Cuboid, i64)> = Vec::new();
    for step in steps {
        let overlaps: Vec<_> = zones
            .iter()
            .filter_map(|(zone, sign)| Some((step.cuboid.intersection(zone)?, -sign)))
            .collect();
        zones.extend(overlaps);
        if step.on {
            zones.push((step.cuboid, 1));
        }
    }
    zones.iter().map(|(zone, sign)| sign * zone.volume()).sum()
}

pub fn day22(input: &str) -> Result<(i64, i64)> {
    let re = Regex::new(
        r"^(on|off) x=(-?[0-9]+)\.\.(-?[0-9]+),y=(-?[0-9]+)\.\.(-?[0-9]+),z=(-?[0-9]+)\.\.(-?[0-9]+)$",
    )?;
    let steps = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let caps = re
                .captures(line.trim())
                .with_context(|| format!("malformed step {:?}", line))?;
            let mut bounds = [0i64; 6];
            for (i, bound) in bounds.iter_mut().enumerate() {
                *bound = caps[i + 2].parse()?;
            }
            let cuboid = Cuboid {
                min: [bounds[0], bounds[2], bounds[4]],
                max: [bounds[1], bounds[3], bounds[5]],
            };
            ensure!(
                (0..3).all(|i| cuboid.min[i] <= cuboid.max[i]),
                "empty cuboid in {:?}",
                line
            );
            let on = match &caps[1] {
                "on" => true,
                "off" => false,
                other => bail!("unknown switch {:?}", other),
            };
            Ok(Step { on, cuboid })
        })
        .collect::<Result<Vec<_>>>()?;

    let initialization = reboot(steps.iter().filter(|s| s.cuboid.is_initialization()));
    Ok((initialization, reboot(steps.iter())))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day22() -> Result<()> {
        let example = indoc! {"
            on x=10..12,y=10..12,z=10..12
            on x=11..13,y=11..13,z=11..13
            off x=9..11,y=9..11,z=9..11
            on x=10..10,y=10..10,z=10..10
        "};
        assert_eq!(day22(example)?, (39, 39));

        let outside = format!("{}on x=100..101,y=100..101,z=100..101\n", example);
        assert_eq!(day22(&outside)?, (39, 47));
        Ok(())
    }

    #[test]
    fn intersection() {
        let a = Cuboid {
            min: [0, 0, 0],
            max: [2, 2, 2],
        };
        let b = Cuboid {
            min: [2, 1, -5],
            max: [4, 4, 0],
        };
        assert_eq!(
            a.intersection(&b),
            Some(Cuboid {
                min: [2, 1, 0],
                max: [2, 2, 0]
            })
        );
        assert_eq!(
            a.intersection(&Cuboid {
                min: [3, 0, 0],
                max: [4, 1, 1]
            }),
            None
        );
    }
}
