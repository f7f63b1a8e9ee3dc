//! Weighted random selection over a keyed set of entries.
//!
//! A [`Selector`] holds entries sorted by key, each tagged with the running
//! sum of the weights before it (its *threshold*). A draw picks a uniform
//! integer in `[0, total_weight)` and returns the entry whose interval
//! contains it, so every entry is returned with probability
//! `weight / total_weight`:
//!
//! - **Linear scan** for small selectors (fewer entries than the size
//!   threshold, 10 by default).
//! - **Binary search** over the descending thresholds otherwise.
//!
//! Both lookups return the same entry for the same drawn value. Randomness
//! comes from any [`RandomSource`], which every `rand` RNG implements.
//!
//! `Selector` is a plain value without internal locking. [`SharedSelector`]
//! wraps one in an `ArcSwap` for lock-free reads from many threads.

pub mod draw;
pub mod entry;
pub mod shared;
pub mod source;
pub mod store;

pub use draw::Strategy;
pub use entry::{Candidate, Entry};
pub use shared::SharedSelector;
pub use source::RandomSource;
pub use store::Selector;
pub use wrr_common::{WrrError, WrrResult};
