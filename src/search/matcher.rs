//! Character-level sequence similarity based on longest matching blocks.
//!
//! `ratio` is `2 * M / T`, where `M` counts characters in matching blocks
//! and `T` is the combined length of both inputs. Blocks are found by
//! taking the longest common run, then recursing on the pieces to its left
//! and right.

use std::{cmp::Ordering, collections::HashMap};

use thiserror::Error;

/// Second sequences at least this long drop their popular characters from
/// match seeding.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Invalid parameters for [`CloseMatches`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("match count must be positive, got {0}")]
    InvalidCount(usize),
    #[error("cutoff must lie within [0.0, 1.0], got {0}")]
    InvalidCutoff(f64),
}

/// Similarity of `a` against `b` on a 0..=1 scale.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    Matcher::new(&b).ratio(&a)
}

/// Bounded, thresholded "close matches" search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseMatches {
    limit: usize,
    cutoff: f64,
}

impl CloseMatches {
    /// Five suggestions at a 0.6 cutoff.
    pub const DEFAULT: Self = Self {
        limit: 5,
        cutoff: 0.6,
    };

    pub fn new(limit: usize, cutoff: f64) -> Result<Self, MatchError> {
        if limit == 0 {
            return Err(MatchError::InvalidCount(limit));
        }
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(MatchError::InvalidCutoff(cutoff));
        }
        Ok(Self { limit, cutoff })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Candidates scoring at least `cutoff` against `word`, best first.
    ///
    /// Equal scores are ordered by descending candidate text.
    pub fn find<'c, I>(&self, word: &str, candidates: I) -> Vec<&'c str>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let word: Vec<char> = word.chars().collect();
        let matcher = Matcher::new(&word);

        let mut scored: Vec<(f64, &'c str)> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let chars: Vec<char> = candidate.chars().collect();
                let score = matcher.ratio(&chars);
                (score >= self.cutoff).then_some((score, candidate))
            })
            .collect();

        scored.sort_by(|x, y| {
            y.0.partial_cmp(&x.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| y.1.cmp(x.1))
        });
        scored.truncate(self.limit);
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

impl Default for CloseMatches {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Matcher with a fixed second sequence, reused across many first sequences.
struct Matcher<'b> {
    b: &'b [char],
    positions: HashMap<char, Vec<usize>>,
}

impl<'b> Matcher<'b> {
    fn new(b: &'b [char]) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            positions.entry(*ch).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let popular = b.len() / 100 + 1;
            positions.retain(|_, found| found.len() <= popular);
        }
        Self { b, positions }
    }

    fn ratio(&self, a: &[char]) -> f64 {
        let total = a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched(a) as f64 / total as f64
    }

    fn matched(&self, a: &[char]) -> usize {
        let mut pending = vec![(0, a.len(), 0, self.b.len())];
        let mut total = 0;
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.longest_match(a, alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            total += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }
        total
    }

    /// Longest block of `a[alo..ahi]` equal to a block of `b[blo..bhi]`,
    /// earliest in `a` first, then earliest in `b`.
    fn longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut run_ending: HashMap<usize, usize> = HashMap::new();

        for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_runs = HashMap::new();
            if let Some(found) = self.positions.get(ch) {
                for &j in found {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = j
                        .checked_sub(1)
                        .and_then(|p| run_ending.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let size = previous + 1;
                    next_runs.insert(j, size);
                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            run_ending = next_runs;
        }

        // Popular characters never seed a run but may still extend one.
        while best_i > alo && best_j > blo && a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}
