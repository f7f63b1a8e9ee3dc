use wrr_common::{WrrError, WrrResult};

use crate::entry::Entry;
use crate::source::RandomSource;
use crate::store::Selector;

/// How a drawn value is mapped to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Front-to-back scan, used below the size threshold.
    Linear,
    /// Binary search over the descending thresholds.
    Binary,
}

impl Selector {
    /// Draw one entry using the thread-local RNG.
    pub fn next(&self) -> WrrResult<&Entry> {
        self.next_with(&mut rand::thread_rng())
    }

    /// Draw one entry using `source`.
    ///
    /// Each entry is returned with probability `weight / total_weight`.
    /// When every weight is zero, entries are picked uniformly instead.
    pub fn next_with<R: RandomSource>(&self, source: &mut R) -> WrrResult<&Entry> {
        if self.entries.is_empty() {
            return Err(WrrError::EmptySelector);
        }

        if self.total_weight == 0 {
            let index = source.below(self.entries.len() as u64) as usize;
            return self.entries.get(index).ok_or(WrrError::NoMatch(0));
        }

        let drawn = source.below(self.total_weight);
        self.entry_for(drawn)
    }

    /// The entry whose interval `[threshold, threshold + weight)` contains
    /// `drawn`.
    pub fn entry_for(&self, drawn: u64) -> WrrResult<&Entry> {
        if self.entries.is_empty() {
            return Err(WrrError::EmptySelector);
        }
        if drawn >= self.total_weight {
            return Err(WrrError::NoMatch(drawn));
        }

        let index = match self.strategy() {
            Strategy::Linear => self.scan(drawn),
            Strategy::Binary => self.search(drawn),
        };
        index
            .map(|i| &self.entries[i])
            .ok_or(WrrError::NoMatch(drawn))
    }

    /// The lookup the current entry count uses.
    pub fn strategy(&self) -> Strategy {
        if self.entries.len() < self.size_threshold {
            Strategy::Linear
        } else {
            Strategy::Binary
        }
    }

    // Entries are in descending threshold order, so the first one at or
    // below `drawn` holds the greatest such threshold.
    fn scan(&self, drawn: u64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.threshold <= drawn)
    }

    fn search(&self, drawn: u64) -> Option<usize> {
        let index = self
            .entries
            .partition_point(|entry| entry.threshold > drawn);
        (index < self.entries.len()).then_some(index)
    }
}
