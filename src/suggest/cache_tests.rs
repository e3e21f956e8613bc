//! Tests for the query cache

use super::*;
use crate::suggest::Suggestion;
use proptest::prelude::*;

fn term(raw: &str) -> SearchTerm {
    SearchTerm::parse(raw).unwrap()
}

fn list(names: &[&str]) -> Suggestions {
    names.iter().map(|n| Suggestion::new(*n)).collect()
}

#[test]
fn test_huge_capacity_does_not_preallocate() {
    let mut cache = QueryCache::new(usize::MAX);
    cache.put(term("main"), list(&["MAIN ST"]));

    assert_eq!(cache.capacity(), usize::MAX);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&term("main")));

    let shared = SharedCache::new(1_000_000_000_000_000_000);
    shared.put(term("oak"), list(&["OAK ST"]));
    assert_eq!(shared.len(), 1);
}

#[test]
fn test_get_missing_returns_none() {
    let cache = QueryCache::new(3);
    assert!(cache.get(&term("main")).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_put_then_get_preserves_order() {
    let mut cache = QueryCache::new(3);
    cache.put(term("ma"), list(&["MARKET ST", "MAIN ST", "MAPLE AVE"]));

    let cached = cache.get(&term("MA")).unwrap();
    let names: Vec<&str> = cached.iter().map(|s| s.street_name.as_str()).collect();
    assert_eq!(names, vec!["MARKET ST", "MAIN ST", "MAPLE AVE"]);
}

#[test]
fn test_overflow_evicts_only_first_inserted() {
    let mut cache = QueryCache::new(3);
    cache.put(term("a"), list(&["A ST"]));
    cache.put(term("b"), list(&["B ST"]));
    cache.put(term("c"), list(&["C ST"]));
    cache.put(term("d"), list(&["D ST"]));

    assert_eq!(cache.len(), 3);
    assert!(!cache.contains(&term("a")));
    assert!(cache.contains(&term("b")));
    assert!(cache.contains(&term("c")));
    assert!(cache.contains(&term("d")));
}

#[test]
fn test_reading_does_not_protect_from_eviction() {
    let mut cache = QueryCache::new(2);
    cache.put(term("a"), list(&["A ST"]));
    cache.put(term("b"), list(&["B ST"]));

    // A read does not promote "a"
    assert!(cache.get(&term("a")).is_some());

    cache.put(term("c"), list(&["C ST"]));
    assert!(!cache.contains(&term("a")));
    assert!(cache.contains(&term("b")));
}

#[test]
fn test_reput_replaces_value_without_refreshing_position() {
    let mut cache = QueryCache::new(2);
    cache.put(term("a"), list(&["A ST"]));
    cache.put(term("b"), list(&["B ST"]));
    cache.put(term("a"), list(&["A AVE"]));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&term("a")).unwrap()[0].street_name, "A AVE");

    cache.put(term("c"), list(&["C ST"]));
    assert!(!cache.contains(&term("a")), "re-put must not refresh order");
    assert!(cache.contains(&term("b")));
}

#[test]
fn test_clear_empties_cache() {
    let mut cache = QueryCache::new(3);
    cache.put(term("a"), list(&["A ST"]));
    cache.put(term("b"), list(&["B ST"]));
    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.get(&term("a")).is_none());

    // Order bookkeeping is reset too
    cache.put(term("c"), list(&["C ST"]));
    cache.put(term("d"), list(&["D ST"]));
    cache.put(term("e"), list(&["E ST"]));
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_zero_capacity_stores_nothing() {
    let mut cache = QueryCache::new(0);
    cache.put(term("a"), list(&["A ST"]));
    assert!(cache.is_empty());
}

#[test]
fn test_default_capacity() {
    assert_eq!(QueryCache::default().capacity(), DEFAULT_CACHE_CAPACITY);
}

#[test]
fn test_shared_handles_see_same_entries() {
    let cache = SharedCache::new(4);
    let other = cache.clone();

    cache.put(term("main"), list(&["MAIN ST"]));
    assert!(other.contains(&term("MAIN")));
    assert_eq!(other.len(), 1);

    other.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = SharedCache::new(8);
    let writer = cache.clone();

    std::thread::spawn(move || {
        writer.put(term("oak"), list(&["OAK ST"]));
    })
    .join()
    .unwrap();

    assert!(cache.contains(&term("oak")));
}

// Feature: query-cache, Property: capacity bound
// *For any* sequence of inserts the cache never holds more than its capacity,
// and after inserting capacity + 1 distinct keys exactly the first one is gone.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_size_never_exceeds_capacity(
        capacity in 1usize..=8,
        keys in prop::collection::vec("[A-E]{1,2}", 0..40)
    ) {
        let mut cache = QueryCache::new(capacity);
        for key in &keys {
            cache.put(term(key), list(&["X ST"]));
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn prop_overflow_evicts_exactly_first(capacity in 1usize..=16) {
        let mut cache = QueryCache::new(capacity);
        let keys: Vec<String> = (0..=capacity).map(|i| format!("K{}", i)).collect();
        for key in &keys {
            cache.put(term(key), list(&["X ST"]));
        }

        prop_assert!(!cache.contains(&term(&keys[0])));
        for key in &keys[1..] {
            prop_assert!(cache.contains(&term(key)), "{} should remain", key);
        }
    }
}
