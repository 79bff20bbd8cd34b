use std::{
    fmt::{self, Display},
    ops::Add,
    str::FromStr,
};

use anyhow::{bail, ensure, Context, Error, Result};
use rayon::prelude::*;

/// A regular number together with the number of pairs it is nested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Element {
    value: u32,
    depth: u8,
}

/// Snailfish numbers are stored as their regular numbers in reading order. The tree shape is
/// fully determined by the depths.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Number(Vec<Element>);

impl Number {
    fn explode(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|e| e.depth > 4) else {
            return false;
        };
        let (left, right) = (self.0[i], self.0[i + 1]);
        if i > 0 {
            self.0[i - 1].value += left.value;
        }
        if let Some(next) = self.0.get_mut(i + 2) {
            next.value += right.value;
        }
        self.0[i] = Element {
            value: 0,
            depth: left.depth - 1,
        };
        self.0.remove(i + 1);
        true
    }

    fn split(&mut self) -> bool {
        let Some(i) = self.0.iter().position(|e| e.value >= 10) else {
            return false;
        };
        let Element { value, depth } = self.0[i];
        self.0[i] = Element {
            value: value / 2,
            depth: depth + 1,
        };
        self.0.insert(
            i + 1,
            Element {
                value: value - value / 2,
                depth: depth + 1,
            },
        );
        true
    }

    fn reduce(&mut self) {
        while self.explode() || self.split() {}
    }

    /// Shift-reduce over the flat representation: two neighbours on the same depth on top of the
    /// stack are always the two halves of one pair.
    fn magnitude(&self) -> u32 {
        let mut stack: Vec<Element> = Vec::with_capacity(self.0.len());
        for &e in &self.0 {
            stack.push(e);
            while let [.., a, b] = stack[..] {
                if a.depth != b.depth || a.depth == 0 {
                    break;
                }
                stack.truncate(stack.len() - 2);
                stack.push(Element {
                    value: 3 * a.value + 2 * b.value,
                    depth: a.depth - 1,
                });
            }
        }
        stack.first().map_or(0, |e| e.value)
    }

    fn write_at(&self, f: &mut fmt::Formatter<'_>, idx: &mut usize, depth: u8) -> fmt::Result {
        let e = self.0[*idx];
        if e.depth == depth {
            *idx += 1;
            return write!(f, "{}", e.value);
        }
        write!(f, "[")?;
        self.write_at(f, idx, depth + 1)?;
        write!(f, ",")?;
        self.write_at(f, idx, depth + 1)?;
        write!(f, "]")
    }
}

impl Add for &Number {
    type Output = Number;

    fn add(self, other: &Number) -> Number {
        let mut sum = Number(
            self.0
                .iter()
                .chain(&other.0)
                .map(|e| Element {
                    value: e.value,
                    depth: e.depth + 1,
                })
                .collect(),
        );
        sum.reduce();
        sum
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut elements = Vec::new();
        // Children seen so far in every open pair; the bottom entry counts top-level items.
        let mut open: Vec<u8> = vec![0];
        let mut bytes = s.trim().bytes().peekable();
        while let Some(b) = bytes.next() {
            match b {
                b'[' => {
                    ensure!(open.len() <= MAX_DEPTH, "{:?} is nested too deeply", s);
                    open.push(0);
                }
                b']' => {
                    ensure!(open.len() > 1, "unbalanced brackets in {:?}", s);
                    let children = open.pop().unwrap_or_default();
                    ensure!(children == 2, "pair with {} elements in {:?}", children, s);
                    add_child(&mut open, s)?;
                }
                b',' => {
                    ensure!(
                        open.len() > 1 && open.last() == Some(&1),
                        "misplaced comma in {:?}",
                        s
                    );
                }
                b'0'..=b'9' => {
                    let mut value = u32::from(b - b'0');
                    while let Some(d @ b'0'..=b'9') = bytes.peek().copied() {
                        value = value
                            .checked_mul(10)
                            .and_then(|v| v.checked_add(u32::from(d - b'0')))
                            .with_context(|| format!("regular number too large in {:?}", s))?;
                        bytes.next();
                    }
                    let depth = u8::try_from(open.len() - 1)?;
                    elements.push(Element { value, depth });
                    add_child(&mut open, s)?;
                }
                _ => bail!("unexpected {:?} in {:?}", b as char, s),
            }
        }
        ensure!(open == [1], "malformed number {:?}", s);
        Ok(Number(elements))
    }
}

/// Pairs nested deeper than this can not be parsed. One level beyond four keeps pairs that are
/// about to explode representable.
const MAX_DEPTH: usize = 5;

fn add_child(open: &mut [u8], s: &str) -> Result<()> {
    if let Some(children) = open.last_mut() {
        *children += 1;
        ensure!(*children <= 2, "too many elements in {:?}", s);
    }
    Ok(())
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_at(f, &mut 0, 0)
    }
}

pub fn day18(input: &str) -> Result<(u32, u32)> {
    let numbers = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Number>>>()?;
    ensure!(!numbers.is_empty(), "no numbers");
    ensure!(
        numbers
            .iter()
            .all(|n| n.0.iter().all(|e| e.depth <= 4 && e.value < 10)),
        "homework numbers must already be reduced"
    );

    let sum = numbers[1..]
        .iter()
        .fold(numbers[0].clone(), |acc, n| &acc + n);

    let largest = (0..numbers.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let numbers = &numbers;
            (0..numbers.len())
                .filter(move |&j| j != i)
                .map(move |j| (&numbers[i] + &numbers[j]).magnitude())
        })
        .max()
        .unwrap_or(0);

    Ok((sum.magnitude(), largest))
}
