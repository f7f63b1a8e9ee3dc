use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wrr_common::{EntryConfig, SelectorConfig};
use wrr_selector::{Candidate, Selector, Strategy, WrrError};

fn selector_with(size_threshold: usize, weights: &[(&str, u32)]) -> Selector {
    let mut selector = Selector::with_size_threshold(size_threshold);
    selector
        .replace_all(weights.iter().map(|(key, weight)| Candidate::new(*key, *weight)))
        .unwrap();
    selector
}

fn assert_invariants(selector: &Selector) {
    let entries = selector.entries();
    assert_eq!(selector.count(), entries.len());

    let sum: u64 = entries.iter().map(|e| u64::from(e.weight())).sum();
    assert_eq!(selector.total_weight(), sum);

    for pair in entries.windows(2) {
        assert!(pair[0].key() > pair[1].key(), "keys must be unique and descending");
        assert!(pair[0].threshold() >= pair[1].threshold());
    }

    for entry in entries {
        let before: u64 = entries
            .iter()
            .filter(|other| other.key() < entry.key())
            .map(|other| u64::from(other.weight()))
            .sum();
        assert_eq!(entry.threshold(), before, "threshold of {}", entry.key());
    }

    if let Some(last) = entries.last() {
        assert_eq!(last.threshold(), 0);
    }
}

#[test]
fn test_invariants_hold_across_mutations() {
    let mut selector = selector_with(
        10,
        &[("delta", 4), ("alpha", 1), ("charlie", 0), ("bravo", 7)],
    );
    assert_invariants(&selector);

    selector.add(Candidate::new("echo", 3)).unwrap();
    assert_invariants(&selector);

    selector
        .update(Candidate::new("bravo-2", 0).with_key("bravo"))
        .unwrap();
    assert_invariants(&selector);

    selector.remove("alpha").unwrap();
    assert_invariants(&selector);

    assert!(selector.add(Candidate::new("echo", 1)).is_err());
    assert_invariants(&selector);

    assert_eq!(selector.count(), 4);
    assert_eq!(selector.total_weight(), 7);
}

#[test]
fn test_new_from_config() {
    let config = SelectorConfig {
        size_threshold: 0,
        entries: vec![
            EntryConfig {
                key: Some("primary".into()),
                value: "10.0.0.1:8080".into(),
                weight: 3,
            },
            EntryConfig {
                key: None,
                value: "10.0.0.2:8080".into(),
                weight: 1,
            },
        ],
    };
    let selector = Selector::new(&config).unwrap();

    assert_eq!(selector.size_threshold(), 10);
    assert_eq!(selector.get("primary").unwrap().value(), "10.0.0.1:8080");
    assert!(selector.contains_key("10.0.0.2:8080"));
    assert_invariants(&selector);
}

#[test]
fn test_draw_probability_law() {
    let selector = selector_with(10, &[("a", 10), ("b", 20), ("c", 30)]);
    let mut rng = StdRng::seed_from_u64(20_240_601);

    let draws = 100_000;
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for _ in 0..draws {
        *counts.entry(selector.next_with(&mut rng).unwrap().key()).or_insert(0) += 1;
    }

    // Chi-squared with 2 degrees of freedom; 13.8 is the 0.999 quantile.
    let chi_squared: f64 = [("a", 10.0), ("b", 20.0), ("c", 30.0)]
        .iter()
        .map(|(key, weight)| {
            let expected = draws as f64 * weight / 60.0;
            let observed = counts[key] as f64;
            (observed - expected).powi(2) / expected
        })
        .sum();
    assert!(chi_squared < 13.8, "chi-squared {}", chi_squared);
}

#[test]
fn test_strategy_equivalence() {
    let weights: Vec<(String, u32)> = (0..40u32)
        .map(|i| (format!("shard-{:03}", i), (i * 13 + 5) % 9))
        .collect();
    let refs: Vec<(&str, u32)> = weights.iter().map(|(k, w)| (k.as_str(), *w)).collect();

    let linear = selector_with(1_000, &refs);
    let binary = selector_with(2, &refs);
    assert_eq!(linear.strategy(), Strategy::Linear);
    assert_eq!(binary.strategy(), Strategy::Binary);
    assert_eq!(linear.entries(), binary.entries());

    for drawn in 0..linear.total_weight() {
        let a = linear.entry_for(drawn).unwrap();
        let b = binary.entry_for(drawn).unwrap();
        assert_eq!(a, b, "drawn value {}", drawn);
        assert!(a.covers(drawn));
    }

    // Same seeded stream through both strategies.
    let mut rng_a = StdRng::seed_from_u64(9);
    let mut rng_b = StdRng::seed_from_u64(9);
    for _ in 0..5_000 {
        assert_eq!(
            linear.next_with(&mut rng_a).unwrap(),
            binary.next_with(&mut rng_b).unwrap()
        );
    }
}

#[test]
fn test_idempotent_removal() {
    let mut selector = selector_with(10, &[("a", 1), ("b", 2)]);
    let before = selector.clone();

    selector.remove("missing").unwrap();
    assert_eq!(selector, before);
}

#[test]
fn test_empty_selector_then_single_entry() {
    let mut selector = Selector::default();
    assert_eq!(selector.next().unwrap_err(), WrrError::EmptySelector);

    selector.add(Candidate::new("solo", 10)).unwrap();
    for _ in 0..1_000 {
        assert_eq!(selector.next().unwrap().key(), "solo");
    }
}

#[test]
fn test_zero_weight_uniformity() {
    let selector = selector_with(10, &[("x", 0), ("y", 0)]);
    let mut rng = StdRng::seed_from_u64(77);

    let mut x = 0u32;
    for _ in 0..10_000 {
        if selector.next_with(&mut rng).unwrap().key() == "x" {
            x += 1;
        }
    }
    assert!((4_700..=5_300).contains(&x), "x drawn {} times", x);
}

#[test]
fn test_rejection_atomicity() {
    let mut selector = selector_with(10, &[("a", 1), ("b", 2), ("c", 3)]);
    let entries = selector.snapshot();
    let total = selector.total_weight();
    let count = selector.count();

    let err = selector
        .replace_all(vec![
            Candidate::new("p", 1),
            Candidate::new("q", 1),
            Candidate::new("p", 5),
        ])
        .unwrap_err();

    assert_eq!(err, WrrError::DuplicateKey("p".into()));
    assert_eq!(selector.entries(), entries.as_slice());
    assert_eq!(selector.total_weight(), total);
    assert_eq!(selector.count(), count);
}
