use anyhow::{ensure, Result};

use crate::parse_comma_separated;

const REPRODUCTION_TIME: usize = 7;
const CHILDHOOD: usize = 2;

/// Number of fish per remaining days to reproduction.
struct School([u64; REPRODUCTION_TIME + CHILDHOOD]);

impl School {
    fn next_day(&mut self) {
        let parents = self.0[0];
        self.0.rotate_left(1);
        self.0[REPRODUCTION_TIME - 1] += parents;
    }

    fn size(&self) -> u64 {
        self.0.iter().sum()
    }
}

pub fn day6(input: &str) -> Result<(u64, u64)> {
    let mut school = School([0; REPRODUCTION_TIME + CHILDHOOD]);
    for timer in parse_comma_separated(input)? {
        ensure!(timer < school.0.len(), "invalid timer {}", timer);
        school.0[timer] += 1;
    }

    for _ in 0..80 {
        school.next_day();
    }
    let part1 = school.size();
    for _ in 80..256 {
        school.next_day();
    }

    Ok((part1, school.size()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day6() -> Result<()> {
        assert_eq!(day6("3,4,3,1,2\n")?, (5934, 26984457539));
        Ok(())
    }

    #[test]
    fn eighteen_days() {
        let mut school = School([0, 1, 1, 2, 1, 0, 0, 0, 0]);
        for _ in 0..18 {
            school.next_day();
        }
        assert_eq!(school.size(), 26);
    }
}
