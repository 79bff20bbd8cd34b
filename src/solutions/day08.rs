use anyhow::{bail, ensure, Context, Result};

/// A set of lit segments, bit 0 = `a` ... bit 6 = `g`.
type Pattern = u8;

fn parse_pattern(s: &str) -> Result<Pattern> {
    s.bytes().try_fold(0, |acc, b| match b {
        b'a'..=b'g' => Ok(acc | 1 << (b - b'a')),
        _ => bail!("invalid segment {:?}", b as char),
    })
}

fn segments(p: Pattern) -> u32 {
    p.count_ones()
}

fn contains(p: Pattern, other: Pattern) -> bool {
    p & other == other
}

struct Display {
    patterns: Vec<Pattern>,
    outputs: Vec<Pattern>,
}

impl Display {
    fn parse(line: &str) -> Result<Self> {
        let (patterns, outputs) = line
            .split_once('|')
            .with_context(|| format!("missing output in {:?}", line))?;
        let patterns = patterns
            .split_whitespace()
            .map(parse_pattern)
            .collect::<Result<Vec<_>>>()?;
        let outputs = outputs
            .split_whitespace()
            .map(parse_pattern)
            .collect::<Result<Vec<_>>>()?;
        ensure!(patterns.len() == 10, "expected ten unique patterns");
        Ok(Self { patterns, outputs })
    }

    fn unique(&self, len: u32) -> Result<Pattern> {
        let mut matching = self.patterns.iter().filter(|&&p| segments(p) == len);
        match (matching.next(), matching.next()) {
            (Some(&p), None) => Ok(p),
            _ => bail!("no unique pattern with {} segments", len),
        }
    }

    fn decode(&self) -> Result<usize> {
        let one = self.unique(2)?;
        let four = self.unique(4)?;

        let mut lut = [None; 128];
        for &p in &self.patterns {
            let digit = match segments(p) {
                2 => 1,
                3 => 7,
                4 => 4,
                7 => 8,
                5 if contains(p, one) => 3,
                5 if segments(p & four) == 3 => 5,
                5 => 2,
                6 if contains(p, four) => 9,
                6 if contains(p, one) => 0,
                6 => 6,
                n => bail!("pattern with {} segments", n),
            };
            lut[p as usize] = Some(digit);
        }

        self.outputs.iter().try_fold(0, |acc, &p| {
            let digit = lut[p as usize].context("output pattern not among the unique patterns")?;
            Ok(acc * 10 + digit)
        })
    }
}

pub fn day8(input: &str) -> Result<(usize, usize)> {
    let displays = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(Display::parse)
        .collect::<Result<Vec<_>>>()?;

    let easy_digits = displays
        .iter()
        .flat_map(|d| &d.outputs)
        .filter(|&&p| matches!(segments(p), 2 | 3 | 4 | 7))
        .count();

    let sum = displays
        .iter()
        .map(Display::decode)
        .sum::<Result<usize>>()?;

    Ok((easy_digits, sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day8() -> Result<()> {
        let example = indoc! {"
            be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe
            edbfga begcd cbg gc gcadebf fbgde acbgfd abcde gfcbed gfec | fcgedb cgb dgebacf gc
            fgaebd cg bdaec gdafb agbcfd gdcbef bgcad gfac gcb cdgabef | cg cg fdcagb cbg
            fbegcd cbd adcefb dageb afcb bc aefdc ecdab fgdeca fcdbega | efabcd cedba gadfec cb
            aecbfdg fbg gf bafeg dbefa fcge gcbea fcaegb dgceab fcbdga | gecf egdcabf bgf bfgea
            fgeab ca afcebg bdacfeg cfaedg gcfdb baec bfadeg bafgc acf | gebdcfa ecba ca fadegcb
            dbcfg fgd bdegcaf fgec aegbdf ecdfab fbedc dacgb gdcebf gf | cefg dcbef fcge gbcadfe
            bdfegc cbegaf gecbf dfcage bdacg ed bedf ced adcbefg gebcd | ed bcgafe cdgba cbgef
            egadfb cdbfeg cegd fecab cgb gbdefca cg fgcdab egfdb bfceg | gbdfcae bgc cg cgb
            gcafb gcf dcaebfg ecagb gf abcdeg gaef cafbge fdbac fegbdc | fgae cfgab fg bagce
        "};
        assert_eq!(day8(example)?, (26, 61229));
        Ok(())
    }

    #[test]
    fn single_display() -> Result<()> {
        let example = indoc! {"
            acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf
        "};
        assert_eq!(day8(example)?, (0, 5353));

        let easy = indoc! {"
            acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | ab dab eafb acedgfb
        "};
        assert_eq!(day8(easy)?, (4, 1748));
        Ok(())
    }

    #[test]
    fn rejects_unknown_segments() {
        assert!(day8("xyz | ab\n").is_err());
    }
}
