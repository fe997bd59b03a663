//! Tests for the fan-out engine

use super::*;
use crate::error::Error;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// select_latest
// ============================================================================

#[derive(Debug, PartialEq)]
struct Child {
    id: u64,
    updated_tsecs: i64,
}

#[test]
fn test_select_latest_picks_max() {
    let children = vec![
        Child {
            id: 1,
            updated_tsecs: 50,
        },
        Child {
            id: 2,
            updated_tsecs: 200,
        },
        Child {
            id: 3,
            updated_tsecs: 100,
        },
    ];

    let latest = select_latest(&children, |c| c.updated_tsecs).unwrap();
    assert_eq!(latest.id, 2);
}

#[test]
fn test_select_latest_tie_resolves_to_first_in_input_order() {
    let children = vec![
        Child {
            id: 1,
            updated_tsecs: 200,
        },
        Child {
            id: 2,
            updated_tsecs: 200,
        },
        Child {
            id: 3,
            updated_tsecs: 100,
        },
    ];

    let latest = select_latest(&children, |c| c.updated_tsecs).unwrap();
    assert_eq!(latest.id, 1);
}

#[test]
fn test_select_latest_empty_is_none() {
    let children: Vec<Child> = Vec::new();
    assert!(select_latest(&children, |c| c.updated_tsecs).is_none());
}

// ============================================================================
// fan_out
// ============================================================================

#[test]
fn test_fan_out_preserves_input_order() {
    let items = vec![3u64, 1, 2];

    let results = tokio_test::block_on(async {
        fan_out(&items, |n| async move {
            // Later inputs finish first; pairing must still follow input order
            tokio::time::sleep(Duration::from_millis(*n * 5)).await;
            Ok::<u64, Error>(*n * 10)
        })
        .await
    })
    .unwrap();

    assert_eq!(results, vec![30, 10, 20]);
}

#[tokio::test]
async fn test_fan_out_empty_input() {
    let items: Vec<u64> = Vec::new();
    let results = fan_out(&items, |n| async move { Ok::<u64, Error>(*n) })
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_fan_out_aggregates_failures() {
    let items = vec![1u64, 2, 3, 4];

    let err = fan_out(&items, |n| async move {
        if *n % 2 == 0 {
            Err(Error::http_status(500, format!("item {n}")))
        } else {
            Ok(*n)
        }
    })
    .await
    .unwrap_err();

    match err {
        Error::Batch {
            failed,
            total,
            source,
        } => {
            assert_eq!(failed, 2);
            assert_eq!(total, 4);
            // First error in input order: item 2
            assert!(source.to_string().contains("item 2"));
        }
        other => panic!("expected Batch, got {other}"),
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Resolves even numbers to their double, odds to nothing
struct EvenResolver;

#[async_trait]
impl ItemResolver for EvenResolver {
    type Parent = u64;
    type Resolved = u64;

    async fn resolve(&self, parent: &u64) -> crate::error::Result<Option<u64>> {
        Ok((*parent % 2 == 0).then_some(*parent * 2))
    }
}

/// Echoes its input and counts calls
struct CountingFetcher {
    calls: AtomicUsize,
    fail_on: Option<u64>,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    fn failing_on(value: u64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Some(value),
        }
    }
}

#[async_trait]
impl ItemFetcher for CountingFetcher {
    type Input = u64;
    type Payload = u64;

    async fn fetch(&self, input: &u64) -> crate::error::Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(*input) {
            return Err(Error::http_status(500, "fetch failed"));
        }
        Ok(*input + 1)
    }
}

#[tokio::test]
async fn test_pipeline_filters_unresolved_parents() {
    let pipeline = Pipeline::new(EvenResolver, CountingFetcher::new());
    let parents = vec![1u64, 2, 3, 4];

    let run = pipeline.run(&parents).await.unwrap();

    assert_eq!(run.parents, 4);
    assert_eq!(run.resolved, 2);
    assert_eq!(run.skipped, 2);
    // 2 -> 4 -> 5, 4 -> 8 -> 9
    assert_eq!(run.payloads, vec![5, 9]);
}

#[tokio::test]
async fn test_pipeline_fetch_failure_aborts_run() {
    let fetcher = CountingFetcher::failing_on(8);
    let pipeline = Pipeline::new(EvenResolver, fetcher);
    let parents = vec![2u64, 4];

    let err = pipeline.run(&parents).await.unwrap_err();
    assert!(matches!(err, Error::Batch { failed: 1, total: 2, .. }));
}

#[tokio::test]
async fn test_pipeline_fetches_once_per_resolved_item() {
    let pipeline = Pipeline::new(EvenResolver, CountingFetcher::new());
    let parents = vec![1u64, 2, 3, 4, 5, 6];

    pipeline.run(&parents).await.unwrap();
    assert_eq!(pipeline.fetcher.calls.load(Ordering::SeqCst), 3);
}
