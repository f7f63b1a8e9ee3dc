use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::debug;
use wrr_common::{SelectorConfig, WrrResult};

use crate::entry::{Candidate, Entry};
use crate::source::RandomSource;
use crate::store::Selector;

/// A [`Selector`] that can be read and updated from many threads.
///
/// Readers load the current snapshot through `ArcSwap` and never block.
/// Writers are serialized, apply their change to a private clone and
/// publish it only if the change succeeded, so readers always see either
/// the old or the new entry list in full.
pub struct SharedSelector {
    current: ArcSwap<Selector>,
    writer: Mutex<()>,
}

impl SharedSelector {
    pub fn new(selector: Selector) -> Self {
        Self {
            current: ArcSwap::from_pointee(selector),
            writer: Mutex::new(()),
        }
    }

    pub fn from_config(config: &SelectorConfig) -> WrrResult<Self> {
        Ok(Self::new(Selector::new(config)?))
    }

    /// The currently published snapshot.
    pub fn load(&self) -> Arc<Selector> {
        self.current.load_full()
    }

    /// Draw one entry from the current snapshot using the thread-local RNG.
    pub fn next(&self) -> WrrResult<Entry> {
        self.current.load().next().cloned()
    }

    pub fn next_with<R: RandomSource>(&self, source: &mut R) -> WrrResult<Entry> {
        self.current.load().next_with(source).cloned()
    }

    pub fn replace_all(&self, candidates: Vec<Candidate>) -> WrrResult<()> {
        self.mutate(|selector| selector.replace_all(candidates))
    }

    pub fn add(&self, candidate: Candidate) -> WrrResult<()> {
        self.mutate(|selector| selector.add(candidate))
    }

    pub fn update(&self, candidate: Candidate) -> WrrResult<()> {
        self.mutate(|selector| selector.update(candidate))
    }

    pub fn remove(&self, key: &str) -> WrrResult<()> {
        self.mutate(|selector| selector.remove(key))
    }

    pub fn clear(&self) {
        // Clearing cannot fail.
        let _ = self.mutate(|selector| {
            selector.clear();
            Ok(())
        });
    }

    fn mutate<F>(&self, apply: F) -> WrrResult<()>
    where
        F: FnOnce(&mut Selector) -> WrrResult<()>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = Selector::clone(&self.current.load());
        apply(&mut next)?;
        self.current.store(Arc::new(next));

        debug!("published new selector snapshot");
        Ok(())
    }
}

impl Default for SharedSelector {
    fn default() -> Self {
        Self::new(Selector::default())
    }
}
