use anyhow::{ensure, Context, Result};
use regex::Regex;

use crate::{parse_comma_separated, parse_u32_from_bytes};

struct Board {
    size: usize,
    numbers: Vec<usize>,
    marked: Vec<bool>,
    won: bool,
}

impl Board {
    fn new(numbers: Vec<usize>, size: usize) -> Self {
        Self {
            size,
            marked: vec![false; numbers.len()],
            numbers,
            won: false,
        }
    }

    /// Marks `draw` and returns the score if this completes a row or column.
    fn mark(&mut self, draw: usize) -> Option<usize> {
        let idx = self.numbers.iter().position(|&n| n == draw)?;
        self.marked[idx] = true;

        let (row, col) = (idx / self.size, idx % self.size);
        let row_complete = (0..self.size).all(|c| self.marked[row * self.size + c]);
        let col_complete = (0..self.size).all(|r| self.marked[r * self.size + col]);
        if !row_complete && !col_complete {
            return None;
        }

        self.won = true;
        let unmarked: usize = self
            .numbers
            .iter()
            .zip(&self.marked)
            .filter(|(_, marked)| !**marked)
            .map(|(n, _)| n)
            .sum();
        Some(unmarked * draw)
    }
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let (draws, boards) = input.split_once('\n').context("missing boards")?;
    let draws = parse_comma_separated(draws)?;

    let integers = Regex::new("[0-9]+")?;
    let rows: Vec<Vec<usize>> = boards
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            integers
                .find_iter(line)
                .map(|m| parse_u32_from_bytes(m.as_str().as_bytes()))
                .collect()
        })
        .collect();
    let size = rows.first().context("no boards")?.len();
    ensure!(
        size > 0 && rows.len() % size == 0 && rows.iter().all(|row| row.len() == size),
        "boards must be square"
    );
    let mut boards: Vec<Board> = rows
        .chunks(size)
        .map(|chunk| Board::new(chunk.concat(), size))
        .collect();

    let mut scores = Vec::new();
    for draw in draws {
        for board in boards.iter_mut().filter(|board| !board.won) {
            if let Some(score) = board.mark(draw) {
                scores.push(score);
            }
        }
        if boards.iter().all(|board| board.won) {
            break;
        }
    }

    let first = *scores.first().context("no board wins")?;
    let last = *scores.last().context("no board wins")?;
    Ok((first, last))
}
