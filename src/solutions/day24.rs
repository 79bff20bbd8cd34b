use std::str::FromStr;

use anyhow::{bail, ensure, Context, Error, Result};
use regex::Regex;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operand {
    Register(usize),
    Literal(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Instruction {
    Inp(usize),
    Add(usize, Operand),
    Mul(usize, Operand),
    Div(usize, Operand),
    Mod(usize, Operand),
    Eql(usize, Operand),
}

fn register(s: &str) -> Result<usize> {
    match s {
        "w" => Ok(0),
        "x" => Ok(1),
        "y" => Ok(2),
        "z" => Ok(3),
        _ => bail!("unknown register {:?}", s),
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let op = parts.next().context("empty instruction")?;
        let a = register(parts.next().context("missing register")?)?;
        if op == "inp" {
            return Ok(Instruction::Inp(a));
        }

        let b = parts.next().context("missing operand")?;
        let b = match b.parse() {
            Ok(literal) => Operand::Literal(literal),
            Err(_) => Operand::Register(register(b)?),
        };
        Ok(match op {
            "add" => Instruction::Add(a, b),
            "mul" => Instruction::Mul(a, b),
            "div" => Instruction::Div(a, b),
            "mod" => Instruction::Mod(a, b),
            "eql" => Instruction::Eql(a, b),
            _ => bail!("unknown instruction {:?}", s),
        })
    }
}

/// Executes `program` on `input`, returning the registers w, x, y and z.
fn run(program: &[Instruction], input: &[i64]) -> Result<[i64; 4]> {
    let mut regs = [0i64; 4];
    let mut input = input.iter();
    for &instruction in program {
        let value = move |operand| match operand {
            Operand::Register(r) => regs[r],
            Operand::Literal(n) => n,
        };
        match instruction {
            Instruction::Inp(a) => regs[a] = *input.next().context("input exhausted")?,
            Instruction::Add(a, b) => regs[a] += value(b),
            Instruction::Mul(a, b) => regs[a] *= value(b),
            Instruction::Div(a, b) => {
                let b = value(b);
                ensure!(b != 0, "division by zero");
                regs[a] /= b;
            }
            Instruction::Mod(a, b) => {
                let b = value(b);
                ensure!(regs[a] >= 0 && b > 0, "invalid modulo {} % {}", regs[a], b);
                regs[a] %= b;
            }
            Instruction::Eql(a, b) => regs[a] = i64::from(regs[a] == value(b)),
        }
    }
    Ok(regs)
}

/// The part of a MONAD block that differs between the 14 digits.
#[derive(Clone, Copy, Debug)]
struct Block {
    pops: bool,
    x_add: i64,
    y_add: i64,
}

fn parse_blocks(input: &str) -> Result<Vec<Block>> {
    let number = Regex::new("-?[0-9]+")?;
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    ensure!(
        lines.len() % 18 == 0 && lines.iter().step_by(18).all(|&l| l == "inp w"),
        "program does not consist of 18-instruction MONAD blocks"
    );

    lines
        .chunks(18)
        .map(|block| {
            let constant = |i: usize| -> Result<i64> {
                let m = number
                    .find(block[i])
                    .with_context(|| format!("no constant in {:?}", block[i]))?;
                Ok(m.as_str().parse()?)
            };
            let pops = match constant(4)? {
                1 => false,
                26 => true,
                d => bail!("unexpected `div z {}`", d),
            };
            Ok(Block {
                pops,
                x_add: constant(5)?,
                y_add: constant(15)?,
            })
        })
        .collect()
}

/// Every pop block has to cancel the digit pushed by its matching push block:
/// `digits[pop] = digits[push] + offset`.
fn constraints(blocks: &[Block]) -> Result<Vec<(usize, usize, i64)>> {
    let mut stack = Vec::new();
    let mut pairs = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        if block.pops {
            let (push, y_add) = stack.pop().context("pop without matching push")?;
            pairs.push((push, i, y_add + block.x_add));
        } else {
            ensure!(block.x_add >= 10, "push block {} may not push", i);
            stack.push((i, block.y_add));
        }
    }
    ensure!(stack.is_empty(), "unmatched push blocks");
    Ok(pairs)
}

fn model_number(pairs: &[(usize, usize, i64)], digits: usize, largest: bool) -> Result<i64> {
    let mut number = vec![0; digits];
    for &(push, pop, offset) in pairs {
        ensure!(offset.abs() <= 8, "digits {} and {} cannot differ by {}", push, pop, offset);
        let push_digit = if largest {
            (9 - offset).min(9)
        } else {
            (1 - offset).max(1)
        };
        number[push] = push_digit;
        number[pop] = push_digit + offset;
    }
    Ok(number.iter().fold(0, |acc, d| acc * 10 + d))
}

fn digits(n: i64) -> Vec<i64> {
    n.to_string()
        .bytes()
        .map(|b| i64::from(b - b'0'))
        .collect()
}

const MODEL_DIGITS: usize = 14;

pub fn day24(input: &str) -> Result<(i64, i64)> {
    let program = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Instruction>>>()?;
    let blocks = parse_blocks(input)?;
    ensure!(
        blocks.len() == MODEL_DIGITS,
        "MONAD reads {} digits, expected {}",
        blocks.len(),
        MODEL_DIGITS
    );
    let pairs = constraints(&blocks)?;
    debug!(?pairs, "digit constraints");

    let largest = model_number(&pairs, blocks.len(), true)?;
    let smallest = model_number(&pairs, blocks.len(), false)?;
    for n in [largest, smallest] {
        let [.., z] = run(&program, &digits(n))?;
        ensure!(z == 0, "MONAD rejects {}", n);
    }

    Ok((largest, smallest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(pops: bool, x_add: i64, y_add: i64) -> String {
        format!(
            "inp w\nmul x 0\nadd x z\nmod x 26\ndiv z {}\nadd x {}\neql x w\neql x 0\n\
             mul y 0\nadd y 25\nmul y x\nadd y 1\nmul z y\nmul y 0\nadd y w\nadd y {}\n\
             mul y x\nadd z y\n",
            if pops { 26 } else { 1 },
            x_add,
            y_add
        )
    }

    fn parse(program: &str) -> Result<Vec<Instruction>> {
        program.lines().map(str::parse).collect()
    }

    #[test]
    fn test_day24() -> Result<()> {
        // Seven push/pop pairs whose digits differ by these offsets.
        let offsets = [3, -2, 0, 5, -8, 1, -1];
        let y_adds = [5, 8, 1, 12, 3, 7, 10];
        let program: String = offsets
            .iter()
            .zip(y_adds)
            .map(|(&offset, y_add)| block(false, 11, y_add) + &block(true, offset - y_add, 0))
            .collect();

        assert_eq!(day24(&program)?, (69979949918998, 14311116911221));
        Ok(())
    }

    #[test]
    fn nested_pairs() -> Result<()> {
        let program = [
            block(false, 12, 4),
            block(false, 10, 2),
            block(true, -5, 9),
            block(true, -1, 3),
        ]
        .concat();
        let pairs = constraints(&parse_blocks(&program)?)?;
        assert_eq!(pairs, vec![(1, 2, -3), (0, 3, 3)]);
        assert_eq!(model_number(&pairs, 4, true)?, 6969);
        assert_eq!(model_number(&pairs, 4, false)?, 1414);
        Ok(())
    }

    #[test]
    fn alu() -> Result<()> {
        let negate = parse("inp x\nmul x -1\n")?;
        assert_eq!(run(&negate, &[7])?[1], -7);

        let compare = parse("inp z\ninp x\nmul z 3\neql z x\n")?;
        assert_eq!(run(&compare, &[2, 6])?[3], 1);
        assert_eq!(run(&compare, &[2, 5])?[3], 0);

        let binary = parse(
            "inp w\nadd z w\nmod z 2\ndiv w 2\nadd y w\nmod y 2\ndiv w 2\nadd x w\nmod x 2\n\
             div w 2\nmod w 2\n",
        )?;
        assert_eq!(run(&binary, &[11])?, [1, 0, 1, 1]);

        assert!(run(&negate, &[]).is_err());
        assert!("jmp x 1".parse::<Instruction>().is_err());
        Ok(())
    }

    #[test]
    fn impossible_offsets() {
        let mut program = block(false, 11, 9) + &block(true, 5, 0);
        for _ in 0..6 {
            program += &(block(false, 11, 1) + &block(true, -1, 0));
        }
        assert!(day24(&program).is_err());
    }

    #[test]
    fn requires_fourteen_digits() {
        assert!(day24("").is_err());
        let short = block(false, 11, 1) + &block(true, -1, 0);
        assert!(day24(&short).is_err());
    }
}
