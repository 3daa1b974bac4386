//! Engine tests: concurrent requests, ordering of commits, shutdown.

mod common;

use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::app::wait_for_len;
use common::fixtures::{small_config, wrap_config, SMALL_BATCH};
use thatcolor::error::EngineError;
use thatcolor::services::{ColorEngine, SegmentState};

async fn small_engine() -> Arc<ColorEngine> {
    let options = small_config()
        .engine_options()
        .expect("valid test configuration");
    Arc::new(
        ColorEngine::initialize(options)
            .await
            .expect("engine starts"),
    )
}

async fn wait_idle(engine: &ColorEngine, segment: usize) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while engine.outstanding(segment).unwrap() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Timed out waiting for worker to go idle");
}

#[tokio::test]
async fn test_concurrent_requests_match_sequential_order() {
    let engine = small_engine().await;
    let segment = 0;
    let batches = engine.batch_count(segment).unwrap().min(3);
    assert!(batches > 1, "test needs more than one batch");

    let mut tasks = Vec::new();
    for _ in 0..batches {
        let engine = engine.clone();
        tasks.push(tokio::spawn(async move {
            engine.request_next_batch(segment).unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let expected: Vec<_> = (0..batches)
        .flat_map(|index| engine.orderer().compute_batch(segment, index).unwrap())
        .collect();

    let snapshot = wait_for_len(&engine, segment, expected.len()).await;
    assert_eq!(snapshot.batch_count(), batches);
    assert_eq!(snapshot.to_vec(), expected);
}

#[tokio::test]
async fn test_segments_progress_independently() {
    let engine = small_engine().await;

    engine.request_next_batch(2).unwrap();
    wait_for_len(&engine, 2, SMALL_BATCH.min(engine.segment_len(2).unwrap())).await;
    wait_idle(&engine, 2).await;

    assert!(engine.snapshot(0).unwrap().is_empty());
    assert!(engine.snapshot(1).unwrap().is_empty());
    assert_eq!(engine.state(0).unwrap(), SegmentState::Idle);
}

#[tokio::test]
async fn test_requests_past_the_end_are_ignored() {
    let engine = small_engine().await;
    let segment = 1;
    let batches = engine.batch_count(segment).unwrap();
    let total = engine.segment_len(segment).unwrap();

    for _ in 0..batches + 2 {
        engine.request_next_batch(segment).unwrap();
    }

    let snapshot = wait_for_len(&engine, segment, total).await;
    wait_idle(&engine, segment).await;

    let snapshot_after = engine.snapshot(segment).unwrap();
    assert_eq!(snapshot.len(), total);
    assert_eq!(snapshot_after.len(), total);
    assert_eq!(snapshot_after.batch_count(), batches);

    // Every color of the segment appears exactly once
    let mut colors = snapshot_after.to_vec();
    colors.sort_by_key(|c| c.to_hex());
    colors.dedup();
    assert_eq!(colors.len(), total);

    // Fully committed: prefetch has nothing left to ask for
    assert!(!engine.prefetch(segment, total, 1000).unwrap());
}

#[tokio::test]
async fn test_on_update_sees_growing_snapshots() {
    let engine = small_engine().await;
    let segment = 0;
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    let handle = engine
        .on_update(segment, move |snapshot| {
            sink.lock().unwrap().push(snapshot.len());
        })
        .unwrap();

    for _ in 0..3 {
        engine.request_next_batch(segment).unwrap();
    }
    let final_len = wait_for_len(&engine, segment, 3 * SMALL_BATCH).await.len();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if seen.lock().unwrap().last() == Some(&final_len) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Callback never saw the final snapshot");
    handle.abort();

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "went backwards: {seen:?}");
    assert!(seen.iter().all(|len| len % SMALL_BATCH == 0));
}

#[tokio::test]
async fn test_prefetch_guard_and_threshold() {
    let engine = small_engine().await;
    let threshold = engine.prefetch_threshold();

    assert!(engine.prefetch(0, 0, threshold).unwrap());
    // First request still outstanding or just committed; never doubles up
    if engine.outstanding(0).unwrap() > 0 {
        assert!(!engine.prefetch(0, 0, threshold).unwrap());
    }

    wait_for_len(&engine, 0, SMALL_BATCH).await;
    wait_idle(&engine, 0).await;

    // Far from the end
    assert!(!engine.prefetch(0, 0, 0).unwrap());
    // Within the threshold of the committed end
    assert!(engine.prefetch(0, SMALL_BATCH - 1, threshold).unwrap());
    wait_for_len(&engine, 0, 2 * SMALL_BATCH).await;
}

#[tokio::test]
async fn test_unknown_segment_errors() {
    let engine = small_engine().await;
    let count = engine.segment_count();

    assert!(matches!(
        engine.request_next_batch(count),
        Err(EngineError::UnknownSegment { segment, segment_count }) if segment == count && segment_count == count
    ));
    assert!(engine.prefetch(count, 0, 10).is_err());
    assert!(engine.subscribe(count).is_err());
    assert!(engine.on_update(count, |_| {}).is_err());
    assert!(engine.segment_len(count).is_err());
}

#[tokio::test]
async fn test_dropping_engine_ends_subscriptions() {
    let engine = small_engine().await;
    let mut rx = engine.subscribe(0).unwrap();
    let handle = engine.on_update(0, |_| {}).unwrap();

    drop(engine);

    // Workers exit and drop their accumulators, closing the channel
    let closed = tokio::time::timeout(Duration::from_secs(5), async {
        while rx.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok(), "watch channel stayed open");

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("update task kept running")
        .unwrap();
}

#[tokio::test]
async fn test_wrap_table_engine_serves_eight_segments() {
    let options = wrap_config().engine_options().unwrap();
    let engine = ColorEngine::initialize(options).await.unwrap();
    assert_eq!(engine.segment_count(), 8);

    let total: usize = (0..8).map(|s| engine.segment_len(s).unwrap()).sum();
    assert_eq!(total, engine.orderer().cube_len());

    engine.warm_up();
    for segment in 0..8 {
        let expected = engine.segment_len(segment).unwrap().min(32);
        wait_for_len(&engine, segment, expected).await;
    }
}
