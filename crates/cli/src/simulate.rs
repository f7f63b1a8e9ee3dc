use std::collections::HashMap;

use serde::Serialize;
use wrr_selector::{RandomSource, Selector, Strategy, WrrResult};

/// Outcome of a batch of draws against one selector.
#[derive(Debug, Serialize)]
pub struct Report {
    pub draws: u64,
    pub seed: Option<u64>,
    pub total_weight: u64,
    pub strategy: &'static str,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub key: String,
    pub value: String,
    pub weight: u32,
    pub count: u64,
    pub observed_share: f64,
    pub expected_share: f64,
}

/// Draw `draws` times from `selector` and tally the results per key.
pub fn run<R: RandomSource>(
    selector: &Selector,
    draws: u64,
    seed: Option<u64>,
    source: &mut R,
) -> WrrResult<Report> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for _ in 0..draws {
        let entry = selector.next_with(source)?;
        *counts.entry(entry.key()).or_insert(0) += 1;
    }

    let total_weight = selector.total_weight();
    let count = selector.count() as f64;
    let entries = selector
        .entries()
        .iter()
        .rev()
        .map(|entry| {
            let hits = counts.get(entry.key()).copied().unwrap_or(0);
            let expected_share = if total_weight == 0 {
                1.0 / count
            } else {
                f64::from(entry.weight()) / total_weight as f64
            };
            EntryReport {
                key: entry.key().to_string(),
                value: entry.value().to_string(),
                weight: entry.weight(),
                count: hits,
                observed_share: hits as f64 / draws as f64,
                expected_share,
            }
        })
        .collect();

    Ok(Report {
        draws,
        seed,
        total_weight,
        strategy: match selector.strategy() {
            Strategy::Linear => "linear",
            Strategy::Binary => "binary",
        },
        entries,
    })
}
