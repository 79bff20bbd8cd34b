use anyhow::{bail, ensure, Context, Result};

use crate::grid::Grid;

fn pixel(b: u8) -> Result<bool> {
    match b {
        b'#' => Ok(true),
        b'.' => Ok(false),
        _ => bail!("invalid pixel {:?}", b as char),
    }
}

/// A finite image on an infinite background of uniform pixels.
struct Image {
    pixels: Grid<bool>,
    background: bool,
}

impl Image {
    fn lit(&self) -> usize {
        self.pixels.cells().iter().filter(|&&p| p).count()
    }

    fn get(&self, row: isize, col: isize) -> bool {
        self.pixels.get(row, col).copied().unwrap_or(self.background)
    }

    /// Runs every pixel through the lookup table; the image grows by one pixel on each side.
    fn enhance(&self, algorithm: &[bool; 512]) -> Result<Image> {
        let (width, height) = (self.pixels.width() + 2, self.pixels.height() + 2);
        let mut cells = Vec::with_capacity(width * height);
        for r in 0..height as isize {
            for c in 0..width as isize {
                let mut idx = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        idx = idx << 1 | usize::from(self.get(r + dr - 1, c + dc - 1));
                    }
                }
                cells.push(algorithm[idx]);
            }
        }

        let background = algorithm[if self.background { 511 } else { 0 }];
        Ok(Image {
            pixels: Grid::new(width, height, cells)?,
            background,
        })
    }
}

pub fn day20(input: &str) -> Result<(usize, usize)> {
    let input = input.replace("\r\n", "\n");
    let (algorithm, image) = input.split_once("\n\n").context("missing image")?;
    let algorithm: Vec<bool> = algorithm
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(pixel)
        .collect::<Result<_>>()?;
    let algorithm: [bool; 512] = algorithm
        .try_into()
        .map_err(|a: Vec<bool>| {
            anyhow::anyhow!("algorithm has {} entries, expected 512", a.len())
        })?;

    let mut image = Image {
        pixels: Grid::parse(image, pixel)?,
        background: false,
    };

    let mut part1 = 0;
    for step in 1..=50 {
        image = image.enhance(&algorithm)?;
        if step == 2 {
            part1 = image.lit();
        }
    }
    ensure!(!image.background, "infinitely many pixels are lit");

    Ok((part1, image.lit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day20() -> Result<()> {
        let example = indoc! {"
            ..#.#..#####.#.#.#.###.##.....###.##.#..###.####..#####..#....#..#..##..###..######.###...####..#..#####..##..#.#####...##.#.#..#.##..#.#......#.###.######.###.####...#.##.##..#..#..#####.....#.#....###..#.##......#.....#..#..#..##..#...##.######.####.####.#.#...#.......#..#.#.#...####.##.#......#..#...##.#.##..#...##.#.##..###.#......#.#.......#.#.#.####.###.##...#.....####.#..#..#.##.#....##..#.####....##...##..#...#......#.#.......#.......##..####..#...#.#.#...##..#.#..###..#####........#..####......#..#

            #..#.
            #....
            ##..#
            ..#..
            ..###
        "};
        assert_eq!(day20(example)?, (35, 3351));
        Ok(())
    }

    /// Lookup table with `rule` applied to every 3x3 neighbourhood index.
    fn algorithm(rule: impl Fn(usize) -> bool) -> String {
        (0..512).map(|i| if rule(i) { '#' } else { '.' }).collect()
    }

    #[test]
    fn dilation() -> Result<()> {
        let input = format!("{}\n\n...\n.#.\n...\n", algorithm(|i| i != 0));
        // The lit region grows by one pixel in every direction per step.
        assert_eq!(day20(&input)?, (25, 101 * 101));
        Ok(())
    }

    #[test]
    fn flickering_background() -> Result<()> {
        // Inverting the center pixel also inverts the background on every step.
        let input = format!("{}\n\n#..\n.#.\n..#\n", algorithm(|i| i & 0b10000 == 0));
        assert_eq!(day20(&input)?, (3, 3));
        Ok(())
    }

    #[test]
    fn enhancement_grows_image() -> Result<()> {
        let table: [bool; 512] = std::array::from_fn(|i| i & 0b10000 != 0);
        let image = Image {
            pixels: Grid::parse("#.\n.#\n", pixel)?,
            background: false,
        };
        let enhanced = image.enhance(&table)?;
        assert_eq!((enhanced.pixels.width(), enhanced.pixels.height()), (4, 4));
        assert_eq!(enhanced.lit(), 2);
        assert!(enhanced.get(1, 1) && enhanced.get(2, 2) && !enhanced.get(1, 2));
        Ok(())
    }

    #[test]
    fn rejects_short_algorithm() {
        assert!(day20("#.#\n\n#\n").is_err());
    }
}
