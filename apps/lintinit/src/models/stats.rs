//! Style statistics accumulated over a scanned corpus.
//!
//! Each file produces its own `StyleStatistic`; partials are combined with
//! `merge`, which is commutative and associative, so the order in which
//! files are processed never changes the result.

use super::{IndentUnit, LineBreak, QuoteStyle};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Counts per observed candidate value for one style dimension.
pub struct Tally<T: Ord> {
    counts: BTreeMap<T, usize>,
}

impl<T: Ord> Default for Tally<T> {
    fn default() -> Self {
        Tally {
            counts: BTreeMap::new(),
        }
    }
}

impl<T: Ord + Copy> Tally<T> {
    pub fn record(&mut self, value: T) {
        self.record_n(value, 1);
    }

    pub fn record_n(&mut self, value: T, n: usize) {
        if n > 0 {
            *self.counts.entry(value).or_insert(0) += n;
        }
    }

    pub fn count(&self, value: T) -> usize {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn merge(mut self, other: Tally<T>) -> Tally<T> {
        for (value, n) in other.counts {
            *self.counts.entry(value).or_insert(0) += n;
        }
        self
    }

    /// The candidate whose count exceeds all other candidates combined.
    ///
    /// Returns `None` for an empty tally or when no candidate holds a strict
    /// majority of observations.
    pub fn dominant(&self) -> Option<T> {
        let total = self.total();
        self.counts
            .iter()
            .find(|(_, n)| **n * 2 > total)
            .map(|(k, _)| *k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Whether a statement ends with an explicit semicolon.
pub enum Semicolons {
    Always,
    Never,
}

impl Semicolons {
    pub fn as_str(self) -> &'static str {
        match self {
            Semicolons::Always => "always",
            Semicolons::Never => "never",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-dimension tallies for a whole corpus (or a single file).
pub struct StyleStatistic {
    pub quotes: Tally<QuoteStyle>,
    pub semicolons: Tally<Semicolons>,
    pub indent: Tally<IndentUnit>,
    pub line_breaks: Tally<LineBreak>,
    /// Files that were parsed and counted.
    pub files: usize,
}

impl StyleStatistic {
    pub fn merge(self, other: StyleStatistic) -> StyleStatistic {
        StyleStatistic {
            quotes: self.quotes.merge(other.quotes),
            semicolons: self.semicolons.merge(other.semicolons),
            indent: self.indent.merge(other.indent),
            line_breaks: self.line_breaks.merge(other.line_breaks),
            files: self.files + other.files,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
            && self.semicolons.is_empty()
            && self.indent.is_empty()
            && self.line_breaks.is_empty()
    }
}
