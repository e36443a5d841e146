//! Greedy matching-block sequence matcher.
//!
//! Finds the longest common contiguous run, then recurses on both sides of it.
//! Ties go to the run that starts earliest in `a`, then earliest in `b`. When
//! `b` has at least 200 items, elements making up more than 1% of it are left
//! out of the match index ("popular" elements) and only picked up when they
//! extend a match.

use std::collections::HashMap;
use std::hash::Hash;

use super::{DiffKind, DiffOp};

const POPULAR_MIN_LEN: usize = 200;

/// A run of `size` equal items at `a[a..a + size]` and `b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest run inside `a[alo..ahi]` and `b[blo..bhi]`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_a, mut best_b, mut best_size) = (alo, blo, 0);
        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_runs = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = j
                        .checked_sub(1)
                        .and_then(|p| run_ending_at.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let length = previous + 1;
                    next_runs.insert(j, length);
                    if length > best_size {
                        best_a = i + 1 - length;
                        best_b = j + 1 - length;
                        best_size = length;
                    }
                }
            }
            run_ending_at = next_runs;
        }

        while best_a > alo && best_b > blo && self.a[best_a - 1] == self.b[best_b - 1] {
            best_a -= 1;
            best_b -= 1;
            best_size += 1;
        }
        while best_a + best_size < ahi
            && best_b + best_size < bhi
            && self.a[best_a + best_size] == self.b[best_b + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_a,
            b: best_b,
            size: best_size,
        }
    }

    /// Non-overlapping matching runs in ascending order, adjacent runs merged,
    /// terminated by a zero-sized sentinel at `(a.len(), b.len())`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }
            if alo < found.a && blo < found.b {
                pending.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                pending.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
            blocks.push(found);
        }
        blocks.sort_by_key(|block| (block.a, block.b));

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            if let Some(last) = merged.last_mut() {
                if last.a + last.size == block.a && last.b + last.size == block.b {
                    last.size += block.size;
                    continue;
                }
            }
            merged.push(block);
        }
        merged.push(Match {
            a: self.a.len(),
            b: self.b.len(),
            size: 0,
        });
        merged
    }

    /// `2 * matched / (len(a) + len(b))`, or 1.0 when both are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|block| block.size).sum();
        2.0 * matched as f64 / total as f64
    }

    /// Edit script turning `a` into `b`.
    pub fn opcodes(&self) -> Vec<DiffOp> {
        let (mut i, mut j) = (0, 0);
        let mut ops = Vec::new();
        for block in self.matching_blocks() {
            let kind = match (i < block.a, j < block.b) {
                (true, true) => Some(DiffKind::Replace),
                (true, false) => Some(DiffKind::Delete),
                (false, true) => Some(DiffKind::Insert),
                (false, false) => None,
            };
            if let Some(kind) = kind {
                ops.push(DiffOp::new(kind, i..block.a, j..block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                ops.push(DiffOp::new(DiffKind::Equal, block.a..i, block.b..j));
            }
        }
        ops
    }
}
