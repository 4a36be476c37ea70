//! Tests for `retrieval` module

use super::item::{now_secs, MemoryItem, Tier};
use super::retrieval::RetrievalEngine;
use super::scoring::ScoringConfig;
use super::store::MemoryStore;

fn plain_item(id: &str, importance: f32) -> MemoryItem {
    MemoryItem::new(id, format!("content {id}"), Tier::Immediate).with_importance(importance)
}

/// Scoring that ignores recency, so scores are stable across wall-clock
/// seconds within a test.
fn recency_free_engine() -> RetrievalEngine {
    RetrievalEngine::new(ScoringConfig::new(0.6, 0.0, 0.4, 0.0).unwrap())
}

#[test]
fn test_retrieve_returns_top_k() {
    let store = MemoryStore::new(Tier::Immediate);
    for i in 0..10 {
        store.insert(plain_item(&format!("item-{i}"), 0.1 * i as f32));
    }

    let engine = recency_free_engine();
    let results = engine.retrieve("query", &[], &[&store], 3);

    assert_eq!(results.len(), 3);
    // Highest importance first
    assert_eq!(results[0].item.id, "item-9");
}

#[test]
fn test_retrieve_fewer_candidates_than_top_k() {
    let store = MemoryStore::new(Tier::Immediate);
    store.insert(plain_item("only", 0.5));

    let engine = recency_free_engine();
    let results = engine.retrieve("query", &[], &[&store], 10);
    assert_eq!(results.len(), 1);
}

#[test]
fn test_retrieve_top_k_zero_is_empty() {
    let store = MemoryStore::new(Tier::Immediate);
    store.insert(plain_item("a", 0.5));

    let engine = recency_free_engine();
    assert!(engine.retrieve("query", &[], &[&store], 0).is_empty());
}

#[test]
fn test_retrieve_empty_stores_is_empty() {
    let store = MemoryStore::new(Tier::Immediate);
    let engine = recency_free_engine();
    assert!(engine.retrieve("query", &[], &[&store], 5).is_empty());
    assert!(engine.retrieve("query", &[], &[], 5).is_empty());
}

#[test]
fn test_retrieve_sorted_by_non_increasing_score() {
    let store = MemoryStore::new(Tier::Immediate);
    for (id, importance) in [("a", 0.3), ("b", 0.9), ("c", 0.1), ("d", 0.7)] {
        store.insert(plain_item(id, importance));
    }

    let engine = recency_free_engine();
    let results = engine.retrieve("query", &[], &[&store], 10);

    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(results[0].item.id, "b");
}

/// Test: equal scores keep scan order (stable sort)
#[test]
fn test_retrieve_ties_keep_scan_order() {
    let first = MemoryStore::new(Tier::Immediate);
    let second = MemoryStore::new(Tier::Episodic);

    // No embeddings, equal importance: every score is identical
    first.insert(plain_item("a1", 0.5));
    first.insert(plain_item("a2", 0.5));
    second.insert(MemoryItem::new("b1", "tied", Tier::Episodic).with_importance(0.5));

    let engine = recency_free_engine();
    let results = engine.retrieve("query", &[], &[&first, &second], 10);

    let ids: Vec<&str> = results.iter().map(|r| r.item.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "b1"]);
}

/// Test: retrieval alone never mutates access metadata
#[test]
fn test_retrieve_does_not_touch_access_metadata() {
    let store = MemoryStore::new(Tier::Immediate);
    store.insert(plain_item("a", 0.5).with_embedding(vec![0.1, 0.2]));

    let engine = RetrievalEngine::new(ScoringConfig::default());
    let _ = engine.retrieve("query", &[0.1, 0.2], &[&store], 5);
    let _ = engine.retrieve("query", &[0.1, 0.2], &[&store], 5);

    let untouched = store.peek("a").unwrap();
    assert_eq!(untouched.access_count, 0);
    assert_eq!(untouched.last_accessed, untouched.created_at);
}

/// Test: identical inputs yield identical output across repeated calls
#[test]
fn test_retrieve_is_idempotent() {
    let store = MemoryStore::new(Tier::Immediate);
    for (id, importance) in [("a", 0.2), ("b", 0.8), ("c", 0.5)] {
        store.insert(plain_item(id, importance).with_embedding(vec![0.3, 0.7]));
    }

    let engine = recency_free_engine();
    let first = engine.retrieve("query", &[0.5, 0.5], &[&store], 3);
    let second = engine.retrieve("query", &[0.5, 0.5], &[&store], 3);

    assert_eq!(first.len(), second.len());
    for (x, y) in first.iter().zip(second.iter()) {
        assert_eq!(x.item.id, y.item.id);
        assert_eq!(x.score, y.score);
    }
}

/// Test: embeddings rank above the neutral fallback when they match the query
#[test]
fn test_retrieve_similarity_drives_ranking() {
    let store = MemoryStore::new(Tier::Semantic);
    store.insert(
        MemoryItem::new("matching", "close to query", Tier::Semantic)
            .with_importance(0.5)
            .with_embedding(vec![0.1, 0.2, 0.9]),
    );
    store.insert(
        MemoryItem::new("neutral", "no embedding", Tier::Semantic).with_importance(0.5),
    );

    let engine = recency_free_engine();
    // dot = 0.86 > neutral 0.5, everything else equal
    let results = engine.retrieve("query", &[0.1, 0.2, 0.9], &[&store], 2);
    assert_eq!(results[0].item.id, "matching");
}

// ============================================================================
// mark_accessed
// ============================================================================

#[test]
fn test_mark_accessed_touches_items() {
    let store = MemoryStore::new(Tier::Immediate);
    store.insert(plain_item("a", 0.5));
    store.insert(plain_item("b", 0.5));

    let engine = recency_free_engine();
    let touched = engine.mark_accessed(&[&store], &["a", "b", "missing"]);

    assert_eq!(touched, 2);
    assert_eq!(store.peek("a").unwrap().access_count, 1);
    assert_eq!(store.peek("b").unwrap().access_count, 1);
}

#[test]
fn test_mark_accessed_stops_at_first_owning_store() {
    let first = MemoryStore::new(Tier::Immediate);
    let second = MemoryStore::new(Tier::Episodic);
    first.insert(plain_item("a", 0.5));

    let engine = recency_free_engine();
    let touched = engine.mark_accessed(&[&first, &second], &["a"]);

    assert_eq!(touched, 1);
    assert_eq!(first.peek("a").unwrap().access_count, 1);
}

// ============================================================================
// Property-based tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn importance_strategy() -> impl Strategy<Value = f32> {
        0.0f32..=1.0
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: result size is always min(top_k, candidate count)
        #[test]
        fn prop_result_size_bounded(
            importances in proptest::collection::vec(importance_strategy(), 0..40),
            top_k in 0usize..50
        ) {
            let store = MemoryStore::new(Tier::Immediate);
            for (i, importance) in importances.iter().enumerate() {
                store.insert(plain_item(&format!("item-{i}"), *importance));
            }

            let engine = recency_free_engine();
            let results = engine.retrieve("query", &[], &[&store], top_k);
            prop_assert_eq!(results.len(), top_k.min(importances.len()));
        }

        /// Property: scores are sorted non-increasing
        #[test]
        fn prop_results_sorted(
            importances in proptest::collection::vec(importance_strategy(), 0..40)
        ) {
            let store = MemoryStore::new(Tier::Immediate);
            for (i, importance) in importances.iter().enumerate() {
                store.insert(plain_item(&format!("item-{i}"), *importance));
            }

            let engine = recency_free_engine();
            let results = engine.retrieve("query", &[], &[&store], importances.len());
            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        /// Property: retrieval is deterministic for identical inputs
        #[test]
        fn prop_retrieval_deterministic(
            importances in proptest::collection::vec(importance_strategy(), 0..30),
            top_k in 0usize..30
        ) {
            let store = MemoryStore::new(Tier::Immediate);
            for (i, importance) in importances.iter().enumerate() {
                store.insert(plain_item(&format!("item-{i}"), *importance));
            }

            let engine = recency_free_engine();
            let first: Vec<String> = engine
                .retrieve("query", &[], &[&store], top_k)
                .into_iter()
                .map(|r| r.item.id)
                .collect();
            let second: Vec<String> = engine
                .retrieve("query", &[], &[&store], top_k)
                .into_iter()
                .map(|r| r.item.id)
                .collect();
            prop_assert_eq!(first, second);
        }

        /// Property: recency stays within (0, 1] for any idle time
        #[test]
        fn prop_recency_bounded(idle_hours in 0i64..100_000) {
            let config = ScoringConfig::default();
            let now = now_secs();
            let item = MemoryItem::new("a", "aging", Tier::Immediate)
                .with_timestamps(0, 0);
            let recency = config.recency(&item, (idle_hours * 3_600).min(now));
            prop_assert!(recency > 0.0);
            prop_assert!(recency <= 1.0);
        }
    }
}
