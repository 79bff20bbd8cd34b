use aho_corasick::AhoCorasick;
use anyhow::{bail, Result};

enum Line {
    Corrupted(u64),
    Incomplete(u64),
    Complete,
}

fn corruption_score(c: char) -> Option<u64> {
    match c {
        ')' => Some(3),
        ']' => Some(57),
        '}' => Some(1197),
        '>' => Some(25137),
        _ => None,
    }
}

/// Removes matched chunks until nothing changes; what remains is either a corrupted line or the
/// unmatched opening characters.
fn check(chunks: &AhoCorasick, line: &str) -> Result<Line> {
    let mut reduced = line.trim().to_string();
    loop {
        let next = chunks.replace_all(&reduced, &["", "", "", ""]);
        if next.len() == reduced.len() {
            break;
        }
        reduced = next;
    }

    if let Some(score) = reduced.chars().find_map(corruption_score) {
        return Ok(Line::Corrupted(score));
    }
    if reduced.is_empty() {
        return Ok(Line::Complete);
    }

    let mut score = 0;
    for c in reduced.chars().rev() {
        score = score * 5
            + match c {
                '(' => 1,
                '[' => 2,
                '{' => 3,
                '<' => 4,
                _ => bail!("illegal character {:?}", c),
            };
    }
    Ok(Line::Incomplete(score))
}

pub fn day10(input: &str) -> Result<(u64, u64)> {
    let chunks = AhoCorasick::new(["()", "[]", "{}", "<>"])?;

    let mut syntax_error_score = 0;
    let mut completion_scores = Vec::new();
    for line in input.lines() {
        match check(&chunks, line)? {
            Line::Corrupted(score) => syntax_error_score += score,
            Line::Incomplete(score) => completion_scores.push(score),
            Line::Complete => {}
        }
    }

    completion_scores.sort_unstable();
    let middle = completion_scores
        .get(completion_scores.len() / 2)
        .copied()
        .unwrap_or(0);

    Ok((syntax_error_score, middle))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day10() -> Result<()> {
        let example = indoc! {"
            [({(<(())[]>[[{[]{<()<>>
            [(()[<>])]({[<{<<[]>>(
            {([(<{}[<>[]}>{[]{[(<()>
            (((({<>}<{<{<>}{[]{[]{}
            [[<[([]))<([[{}[[()]]]
            [{[{({}]{}}([{[{{{}}([]
            {<[[]]>}<{[{[{[]{()[[[]
            [<(<(<(<{}))><([]([]()
            <{([([[(<>()){}]>(<<{{
            <{([{{}}[<[[[<>{}]]]>[]]
        "};
        assert_eq!(day10(example)?, (26397, 288957));
        Ok(())
    }

    #[test]
    fn single_lines() -> Result<()> {
        let chunks = AhoCorasick::new(["()", "[]", "{}", "<>"])?;
        assert!(matches!(check(&chunks, "<{}>")?, Line::Complete));
        assert!(matches!(check(&chunks, "<([]{)>")?, Line::Corrupted(3)));
        assert!(matches!(check(&chunks, "<{([{{}}[<[[[<>{}]]]>[]]")?, Line::Incomplete(294)));
        assert!(check(&chunks, "(a").is_err());
        Ok(())
    }
}
