use std::collections::btree_map::{self, BTreeMap};

use tracing::debug;
use wrr_common::{SelectorConfig, WrrError, WrrResult, DEFAULT_SIZE_THRESHOLD};

use crate::entry::{Candidate, Entry};

/// A weighted random selector.
///
/// Entries are kept ordered by descending key, which is also descending
/// threshold. Every mutation rebuilds the whole list and only commits it
/// once validation has passed, so a rejected mutation leaves the selector
/// untouched.
///
/// `Selector` has no internal synchronization. Callers sharing one across
/// threads must serialize mutations themselves or publish clones, e.g. via
/// [`SharedSelector`](crate::SharedSelector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub(crate) entries: Vec<Entry>,
    pub(crate) total_weight: u64,
    pub(crate) size_threshold: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self::with_size_threshold(DEFAULT_SIZE_THRESHOLD)
    }
}

impl Selector {
    /// Build a selector from configuration.
    pub fn new(config: &SelectorConfig) -> WrrResult<Self> {
        let mut selector = Self::with_size_threshold(config.effective_size_threshold());
        selector.replace_all(config.entries.iter().map(Candidate::from))?;
        Ok(selector)
    }

    /// An empty selector. A threshold of zero selects the default.
    pub fn with_size_threshold(size_threshold: usize) -> Self {
        let size_threshold = if size_threshold == 0 {
            DEFAULT_SIZE_THRESHOLD
        } else {
            size_threshold
        };
        Self {
            entries: Vec::new(),
            total_weight: 0,
            size_threshold,
        }
    }

    /// Replace every entry with `candidates`.
    ///
    /// An empty batch is accepted and changes nothing. A batch containing an
    /// empty value or two candidates with the same key is rejected as a
    /// whole.
    pub fn replace_all<I>(&mut self, candidates: I) -> WrrResult<()>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut candidates = candidates.into_iter().peekable();
        if candidates.peek().is_none() {
            return Ok(());
        }
        self.rebuild(candidates)
    }

    /// Add a single entry. Fails with `KeyExists` if its key is taken.
    pub fn add(&mut self, candidate: Candidate) -> WrrResult<()> {
        let entry = candidate.into_entry()?;
        if self.contains_key(&entry.key) {
            return Err(WrrError::KeyExists(entry.key));
        }

        let mut combined: Vec<Candidate> = self.entries.iter().map(Candidate::from).collect();
        combined.push(Candidate::from(&entry));
        self.rebuild(combined)
    }

    /// Replace the value and weight of the entry sharing `candidate`'s key.
    ///
    /// Updating a key that is not present is a no-op.
    pub fn update(&mut self, candidate: Candidate) -> WrrResult<()> {
        let entry = candidate.into_entry()?;
        if !self.contains_key(&entry.key) {
            return Ok(());
        }

        let merged: Vec<Candidate> = self
            .entries
            .iter()
            .map(|current| {
                if current.key == entry.key {
                    Candidate::from(&entry)
                } else {
                    Candidate::from(current)
                }
            })
            .collect();
        self.rebuild(merged)
    }

    /// Remove the entry stored under `key`. Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &str) -> WrrResult<()> {
        if !self.contains_key(key) {
            return Ok(());
        }

        let kept: Vec<Candidate> = self
            .entries
            .iter()
            .filter(|entry| entry.key != key)
            .map(Candidate::from)
            .collect();
        self.rebuild(kept)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_weight = 0;
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn size_threshold(&self) -> usize {
        self.size_threshold
    }

    /// Stored entries in descending key order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// An owned copy of the stored entries.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Validate, sort and re-threshold `candidates`, then commit.
    ///
    /// Unlike [`replace_all`](Self::replace_all) an empty batch clears the
    /// selector, which is what removing the last entry needs.
    fn rebuild<I>(&mut self, candidates: I) -> WrrResult<()>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut by_key: BTreeMap<String, Entry> = BTreeMap::new();
        for candidate in candidates {
            let entry = candidate.into_entry().map_err(|e| {
                debug!(error = %e, "rejected entry batch");
                e
            })?;
            match by_key.entry(entry.key.clone()) {
                btree_map::Entry::Occupied(occupied) => {
                    debug!(key = %occupied.key(), "rejected entry batch with duplicate key");
                    return Err(WrrError::DuplicateKey(occupied.key().clone()));
                }
                btree_map::Entry::Vacant(vacant) => {
                    vacant.insert(entry);
                }
            }
        }

        // BTreeMap iterates in ascending key order.
        let mut total_weight = 0u64;
        let mut entries: Vec<Entry> = by_key
            .into_values()
            .map(|mut entry| {
                entry.threshold = total_weight;
                total_weight += u64::from(entry.weight);
                entry
            })
            .collect();
        entries.reverse();

        self.entries = entries;
        self.total_weight = total_weight;

        debug!(
            count = self.entries.len(),
            total_weight = self.total_weight,
            "rebuilt selector entries"
        );
        Ok(())
    }
}
