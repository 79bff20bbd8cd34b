use anyhow::{ensure, Context, Result};
use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cave {
    Start,
    End,
    Big,
    /// Small caves carry a bit in the visited mask.
    Small(u64),
}

struct CaveSystem {
    graph: UnGraph<Cave, ()>,
    start: NodeIndex,
}

fn intern<'a>(
    graph: &mut UnGraph<Cave, ()>,
    caves: &mut IndexMap<&'a str, NodeIndex>,
    small_caves: &mut u32,
    name: &'a str,
) -> Result<NodeIndex> {
    if let Some(&idx) = caves.get(name) {
        return Ok(idx);
    }
    let cave = match name {
        "start" => Cave::Start,
        "end" => Cave::End,
        _ if name.chars().all(|c| c.is_ascii_uppercase()) => Cave::Big,
        _ => {
            ensure!(*small_caves < 64, "too many small caves");
            *small_caves += 1;
            Cave::Small(1 << (*small_caves - 1))
        }
    };
    let idx = graph.add_node(cave);
    caves.insert(name, idx);
    Ok(idx)
}

impl CaveSystem {
    fn parse(input: &str) -> Result<Self> {
        let mut graph = UnGraph::new_undirected();
        let mut caves: IndexMap<&str, NodeIndex> = IndexMap::new();
        let mut small_caves = 0;

        for line in input.lines().filter(|line| !line.trim().is_empty()) {
            let (a, b) = line
                .trim()
                .split_once('-')
                .with_context(|| format!("malformed passage {:?}", line))?;
            let a = intern(&mut graph, &mut caves, &mut small_caves, a)?;
            let b = intern(&mut graph, &mut caves, &mut small_caves, b)?;
            ensure!(
                graph[a] != Cave::Big || graph[b] != Cave::Big,
                "two connected big caves allow infinitely many paths"
            );
            graph.add_edge(a, b, ());
        }

        let start = *caves.get("start").context("no start cave")?;
        ensure!(caves.contains_key("end"), "no end cave");
        Ok(Self { graph, start })
    }

    fn count_paths(&self, allow_revisit: bool) -> usize {
        self.paths_from(self.start, 0, allow_revisit)
    }

    fn paths_from(&self, cave: NodeIndex, visited: u64, can_revisit: bool) -> usize {
        self.graph
            .neighbors(cave)
            .map(|next| match self.graph[next] {
                Cave::Start => 0,
                Cave::End => 1,
                Cave::Big => self.paths_from(next, visited, can_revisit),
                Cave::Small(bit) if visited & bit == 0 => {
                    self.paths_from(next, visited | bit, can_revisit)
                }
                Cave::Small(_) if can_revisit => self.paths_from(next, visited, false),
                Cave::Small(_) => 0,
            })
            .sum()
    }
}

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let caves = CaveSystem::parse(input)?;
    Ok((caves.count_paths(false), caves.count_paths(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day12() -> Result<()> {
        let small = indoc! {"
            start-A
            start-b
            A-c
            A-b
            b-d
            A-end
            b-end
        "};
        assert_eq!(day12(small)?, (10, 36));

        let larger = indoc! {"
            dc-end
            HN-start
            start-kj
            dc-start
            dc-HN
            LN-dc
            HN-end
            kj-sa
            kj-HN
            kj-dc
        "};
        assert_eq!(day12(larger)?, (19, 103));
        Ok(())
    }

    #[test]
    fn missing_end() {
        assert!(day12("start-a\n").is_err());
    }
}
