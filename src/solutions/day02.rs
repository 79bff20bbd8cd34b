use std::str::FromStr;

use anyhow::{bail, Context, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (direction, distance) = s
            .trim()
            .split_once(' ')
            .with_context(|| format!("malformed command {:?}", s))?;
        let distance = distance
            .parse()
            .with_context(|| format!("invalid distance in {:?}", s))?;
        Ok(match direction {
            "forward" => Command::Forward(distance),
            "down" => Command::Down(distance),
            "up" => Command::Up(distance),
            _ => bail!("unknown direction {:?}", direction),
        })
    }
}

#[derive(Default)]
struct Submarine {
    horizontal: i64,
    depth: i64,
    aim: i64,
}

impl Submarine {
    fn position(&self) -> i64 {
        self.horizontal * self.depth
    }

    fn steer(&mut self, command: Command) {
        match command {
            Command::Forward(n) => self.horizontal += n,
            Command::Down(n) => self.depth += n,
            Command::Up(n) => self.depth -= n,
        }
    }

    fn steer_with_aim(&mut self, command: Command) {
        match command {
            Command::Forward(n) => {
                self.horizontal += n;
                self.depth += self.aim * n;
            }
            Command::Down(n) => self.aim += n,
            Command::Up(n) => self.aim -= n,
        }
    }
}

pub fn day2(input: &str) -> Result<(i64, i64)> {
    let course = input
        .lines()
        .map(str::parse)
        .collect::<Result<Vec<Command>>>()?;

    let mut simple = Submarine::default();
    let mut aimed = Submarine::default();
    for &command in &course {
        simple.steer(command);
        aimed.steer_with_aim(command);
    }

    Ok((simple.position(), aimed.position()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day2() -> Result<()> {
        let example = indoc! {"
            forward 5
            down 5
            forward 8
            up 3
            down 8
            forward 2
        "};
        assert_eq!(day2(example)?, (150, 900));
        assert!(day2("sideways 3\n").is_err());
        assert!(day2("forward\n").is_err());
        Ok(())
    }
}
