use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
};

use anyhow::{bail, ensure, Result};
use memchr::memchr;

/// Dense row-major 2D grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

const NEIGHBORS_4: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        ensure!(
            cells.len() == width * height,
            "{} cells do not fill a {}x{} grid",
            cells.len(),
            width,
            height
        );
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses one row per line, mapping every byte through `cell`. All lines must have the same
    /// width; trailing empty lines are ignored.
    pub fn parse(input: &str, mut cell: impl FnMut(u8) -> Result<T>) -> Result<Self> {
        let input = input.trim_end();
        let bytes = input.as_bytes();
        let first_end = memchr(b'\n', bytes).unwrap_or(bytes.len());
        let width = bytes[..first_end]
            .strip_suffix(b"\r")
            .map_or(first_end, <[u8]>::len);
        ensure!(width > 0, "empty grid");

        let mut cells = Vec::with_capacity(bytes.len());
        let mut height = 0;
        for line in input.lines() {
            let line = line.trim_end_matches('\r');
            ensure!(
                line.len() == width,
                "line {} has width {}, expected {}",
                height + 1,
                line.len(),
                width
            );
            for &b in line.as_bytes() {
                cells.push(cell(b)?);
            }
            height += 1;
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: isize, col: isize) -> Option<&T> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(&self.cells[row as usize * self.width + col as usize])
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    pub fn neighbors4(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors(row, col, &NEIGHBORS_4)
    }

    pub fn neighbors8(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors(row, col, &NEIGHBORS_8)
    }

    fn neighbors<'a>(
        &'a self,
        row: usize,
        col: usize,
        offsets: &'static [(isize, isize)],
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        offsets.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.height && c < self.width).then_some((r, c))
        })
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<u8> {
    pub fn parse_digits(input: &str) -> Result<Self> {
        Self::parse(input, |b| match b {
            b'0'..=b'9' => Ok(b - b'0'),
            _ => bail!("invalid digit {:?}", b as char),
        })
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(col < self.width);
        &self.cells[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(col < self.width);
        &mut self.cells[row * self.width + col]
    }
}

impl Display for Grid<u8> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn parse_and_index() -> Result<()> {
        let grid = Grid::parse_digits(indoc! {"
            123
            456
        "})?;
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid[(1, 2)], 6);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(1, 0), Some(&4));
        assert_eq!(grid.to_string(), "123\n456\n");
        Ok(())
    }

    #[test]
    fn crlf_lines() -> Result<()> {
        let grid = Grid::parse_digits("12\r\n34\r\n")?;
        assert_eq!(grid.cells(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn ragged_lines_are_rejected() {
        assert!(Grid::parse_digits("123\n45\n").is_err());
        assert!(Grid::parse_digits("12a\n").is_err());
    }

    #[test]
    fn neighborhoods() -> Result<()> {
        let grid = Grid::parse_digits("123\n456\n789\n")?;
        assert_eq!(grid.neighbors4(0, 0).collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
        assert_eq!(grid.neighbors8(1, 1).count(), 8);
        assert_eq!(grid.neighbors8(2, 2).count(), 3);
        Ok(())
    }
}
