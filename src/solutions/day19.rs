use std::collections::VecDeque;

use anyhow::{bail, ensure, Context, Result};
use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

type Point = Vector3<i32>;
type Rotation = Matrix3<i32>;

const MIN_OVERLAP: usize = 12;
/// Number of beacon pairs among `MIN_OVERLAP` shared beacons.
const MIN_SHARED_DISTANCES: usize = MIN_OVERLAP * (MIN_OVERLAP - 1) / 2;

/// The 24 proper rotations built from pairs of perpendicular signed axes.
fn orientations() -> Vec<Rotation> {
    let axes = [
        Point::x(),
        -Point::x(),
        Point::y(),
        -Point::y(),
        Point::z(),
        -Point::z(),
    ];
    let mut rotations = Vec::with_capacity(24);
    for x in &axes {
        for y in axes.iter().filter(|y| x.dot(*y) == 0) {
            rotations.push(Rotation::from_columns(&[*x, *y, x.cross(y)]));
        }
    }
    rotations
}

fn squared_distance(a: &Point, b: &Point) -> i64 {
    (a - b).iter().map(|&c| i64::from(c) * i64::from(c)).sum()
}

fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a - b).iter().map(|c| c.abs()).sum()
}

struct Scanner {
    id: usize,
    beacons: Vec<Point>,
    /// Sorted squared distances between all pairs of beacons. These do not depend on the
    /// orientation of the scanner.
    fingerprint: Vec<i64>,
}

impl Scanner {
    fn new(id: usize, beacons: Vec<Point>) -> Self {
        let mut fingerprint = Vec::with_capacity(beacons.len() * beacons.len() / 2);
        for (i, a) in beacons.iter().enumerate() {
            for b in &beacons[i + 1..] {
                fingerprint.push(squared_distance(a, b));
            }
        }
        fingerprint.sort_unstable();
        Self {
            id,
            beacons,
            fingerprint,
        }
    }

    fn shared_distances(&self, other: &Scanner) -> usize {
        let (a, b) = (&self.fingerprint, &other.fingerprint);
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        shared
    }

    /// Finds the rotation and offset mapping this scanner's beacons onto at least
    /// `MIN_OVERLAP` of the `reference` beacons.
    fn align(&self, reference: &[Point], rotations: &[Rotation]) -> Option<(Rotation, Point)> {
        let mut offsets: FxHashMap<Point, usize> = FxHashMap::default();
        for rotation in rotations {
            offsets.clear();
            for beacon in &self.beacons {
                let rotated = rotation * beacon;
                for anchor in reference {
                    let count = offsets.entry(anchor - rotated).or_default();
                    *count += 1;
                    if *count >= MIN_OVERLAP {
                        return Some((*rotation, anchor - rotated));
                    }
                }
            }
        }
        None
    }
}

fn parse_scanners(input: &str) -> Result<Vec<Scanner>> {
    let header = Regex::new("^--- scanner ([0-9]+) ---$")?;
    let input = input.replace("\r\n", "\n");
    input
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .enumerate()
        .map(|(i, block)| {
            let mut lines = block.trim().lines();
            let title = lines.next().unwrap_or_default();
            let caps = header
                .captures(title.trim())
                .with_context(|| format!("malformed scanner header {:?}", title))?;
            let id: usize = caps[1].parse()?;
            ensure!(id == i, "scanner {} listed at position {}", id, i);

            let beacons = lines
                .map(|line| {
                    let coords = line
                        .trim()
                        .split(',')
                        .map(str::parse)
                        .collect::<Result<Vec<i32>, _>>()?;
                    match coords[..] {
                        [x, y, z] => Ok(Point::new(x, y, z)),
                        _ => bail!("malformed beacon {:?}", line),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Scanner::new(id, beacons))
        })
        .collect()
}

pub fn day19(input: &str) -> Result<(usize, i32)> {
    let scanners = parse_scanners(input)?;
    ensure!(!scanners.is_empty(), "no scanners");
    let rotations = orientations();

    // Beacons in the coordinate system of scanner 0, and the scanner position within it.
    let mut located: Vec<Option<(Vec<Point>, Point)>> = vec![None; scanners.len()];
    located[0] = Some((scanners[0].beacons.clone(), Point::zeros()));
    let mut queue = VecDeque::from([0]);

    while let Some(reference) = queue.pop_front() {
        let Some((reference_beacons, _)) = located[reference].clone() else {
            continue;
        };
        let unaligned: Vec<usize> = (0..scanners.len())
            .filter(|&i| located[i].is_none())
            .collect();

        let alignments: Vec<_> = unaligned
            .par_iter()
            .filter(|&&i| {
                scanners[i].shared_distances(&scanners[reference]) >= MIN_SHARED_DISTANCES
            })
            .filter_map(|&i| {
                scanners[i]
                    .align(&reference_beacons, &rotations)
                    .map(|transform| (i, transform))
            })
            .collect();

        for (i, (rotation, offset)) in alignments {
            debug!(
                scanner = scanners[i].id,
                reference = scanners[reference].id,
                "found scanner-to-scanner transformation"
            );
            let beacons = scanners[i]
                .beacons
                .iter()
                .map(|b| rotation * b + offset)
                .collect();
            located[i] = Some((beacons, offset));
            queue.push_back(i);
        }
        debug!(
            remaining = located.iter().filter(|l| l.is_none()).count(),
            "still need to find transformations"
        );
    }

    let located = located
        .into_iter()
        .enumerate()
        .map(|(i, l)| l.with_context(|| format!("scanner {} could not be aligned", i)))
        .collect::<Result<Vec<_>>>()?;

    let beacons: FxHashSet<Point> = located
        .iter()
        .flat_map(|(beacons, _)| beacons.iter().copied())
        .collect();

    let positions: Vec<Point> = located.iter().map(|&(_, position)| position).collect();
    let max_distance = positions
        .iter()
        .flat_map(|a| positions.iter().map(move |b| manhattan_distance(a, b)))
        .max()
        .unwrap_or(0);

    Ok((beacons.len(), max_distance))
}
