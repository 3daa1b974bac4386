//! Incremental ordering engine.
//!
//! [`ColorEngine::initialize`] builds the shared [`PerceptualOrderer`] and
//! starts one worker task per hue segment. Each worker drains its own
//! request queue in order, runs every batch on the blocking pool and commits
//! the result to the segment's [`SortAccumulator`]. Segments progress in
//! parallel; batches within a segment never overlap.

use perceptual_color::{OrderOptions, PerceptualOrderer};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use utoipa::ToSchema;

use super::accumulator::{CommitOutcome, SortAccumulator, SortedSequence};
use crate::error::EngineError;

/// Default distance from the end of a sequence at which
/// [`ColorEngine::prefetch`] asks for the next batch.
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 300;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub order: OrderOptions,
    pub prefetch_threshold: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            order: OrderOptions::default(),
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
        }
    }
}

/// Whether a segment's worker is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SegmentState {
    Idle,
    Computing,
}

/// Per-segment counters shared between the handle and its worker.
#[derive(Debug, Default)]
struct WorkerStatus {
    /// Requests queued or in flight
    outstanding: AtomicUsize,
    computing: AtomicBool,
}

#[derive(Debug)]
struct SegmentHandle {
    accumulator: Arc<SortAccumulator>,
    requests: mpsc::UnboundedSender<()>,
    status: Arc<WorkerStatus>,
}

/// Handle to a running engine.
///
/// Dropping the handle closes every request queue. Workers finish the batch
/// they are computing and exit.
#[derive(Debug)]
pub struct ColorEngine {
    orderer: Arc<PerceptualOrderer>,
    segments: Vec<SegmentHandle>,
    prefetch_threshold: usize,
}

impl ColorEngine {
    /// Validate `options`, pre-sort the color space and start the workers.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn initialize(options: EngineOptions) -> Result<Self, EngineError> {
        let EngineOptions {
            order,
            prefetch_threshold,
        } = options;

        let started = std::time::Instant::now();
        let orderer = tokio::task::spawn_blocking(move || PerceptualOrderer::new(order))
            .await
            .map_err(|e| EngineError::Task(e.to_string()))??;
        let orderer = Arc::new(orderer);

        tracing::info!(
            colors = orderer.cube_len(),
            segments = orderer.segment_count(),
            batch_size = orderer.batch_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Color space initialized"
        );

        let segments = (0..orderer.segment_count())
            .map(|segment| {
                let accumulator = Arc::new(SortAccumulator::new(segment));
                let status = Arc::new(WorkerStatus::default());
                let (requests, rx) = mpsc::unbounded_channel();

                tokio::spawn(run_worker(
                    segment,
                    orderer.clone(),
                    accumulator.clone(),
                    status.clone(),
                    rx,
                ));

                SegmentHandle {
                    accumulator,
                    requests,
                    status,
                }
            })
            .collect();

        Ok(Self {
            orderer,
            segments,
            prefetch_threshold,
        })
    }

    fn handle(&self, segment: usize) -> Result<&SegmentHandle, EngineError> {
        self.segments
            .get(segment)
            .ok_or(EngineError::UnknownSegment {
                segment,
                segment_count: self.segments.len(),
            })
    }

    /// Ask for one more batch of `segment`.
    ///
    /// Returns immediately. Requests are served in order; a request beyond
    /// the last batch is ignored by the worker.
    pub fn request_next_batch(&self, segment: usize) -> Result<(), EngineError> {
        let handle = self.handle(segment)?;
        handle.status.outstanding.fetch_add(1, Ordering::SeqCst);
        Self::enqueue(handle, segment)
    }

    /// Send one unit of demand whose `outstanding` slot is already taken.
    fn enqueue(handle: &SegmentHandle, segment: usize) -> Result<(), EngineError> {
        if handle.requests.send(()).is_err() {
            handle.status.outstanding.fetch_sub(1, Ordering::SeqCst);
            return Err(EngineError::Task(format!("worker for segment {segment} stopped")));
        }
        tracing::debug!(segment, "Batch requested");
        Ok(())
    }

    /// Request the next batch if a consumer showing `visible_index` is
    /// within `threshold` colors of the committed end.
    ///
    /// Nothing is requested while another request for the segment is still
    /// outstanding, or once every batch has been committed. Returns whether
    /// a request was made.
    pub fn prefetch(
        &self,
        segment: usize,
        visible_index: usize,
        threshold: usize,
    ) -> Result<bool, EngineError> {
        let handle = self.handle(segment)?;

        // Claim the empty slot before looking at progress. Workers commit
        // before releasing their slot, so a successful claim sees every
        // earlier commit.
        if handle
            .status
            .outstanding
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(false);
        }

        let exhausted =
            handle.accumulator.next_batch_index() >= self.orderer.batch_count(segment);
        let committed = handle.accumulator.snapshot().len();
        if exhausted || visible_index.saturating_add(threshold) < committed {
            handle.status.outstanding.fetch_sub(1, Ordering::SeqCst);
            return Ok(false);
        }

        Self::enqueue(handle, segment)?;
        Ok(true)
    }

    /// Request the first batch of every segment that has nothing yet.
    pub fn warm_up(&self) {
        for (segment, handle) in self.segments.iter().enumerate() {
            if handle.accumulator.next_batch_index() == 0
                && handle.status.outstanding.load(Ordering::SeqCst) == 0
                && self.orderer.batch_count(segment) > 0
            {
                // Every index here is valid
                let _ = self.request_next_batch(segment);
            }
        }
    }

    pub fn snapshot(&self, segment: usize) -> Result<SortedSequence, EngineError> {
        Ok(self.handle(segment)?.accumulator.snapshot())
    }

    pub fn subscribe(
        &self,
        segment: usize,
    ) -> Result<watch::Receiver<SortedSequence>, EngineError> {
        Ok(self.handle(segment)?.accumulator.subscribe())
    }

    /// Invoke `callback` with every new snapshot of `segment`.
    ///
    /// Calls happen one at a time on a dedicated task, in commit order. A
    /// slow callback may skip intermediate snapshots but never sees an older
    /// one after a newer one. The task ends when the engine is dropped or
    /// the returned handle is aborted.
    pub fn on_update<F>(&self, segment: usize, mut callback: F) -> Result<JoinHandle<()>, EngineError>
    where
        F: FnMut(SortedSequence) + Send + 'static,
    {
        let mut rx = self.subscribe(segment)?;
        Ok(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                callback(snapshot);
            }
        }))
    }

    pub fn state(&self, segment: usize) -> Result<SegmentState, EngineError> {
        let handle = self.handle(segment)?;
        Ok(if handle.status.computing.load(Ordering::SeqCst) {
            SegmentState::Computing
        } else {
            SegmentState::Idle
        })
    }

    /// Requests queued or in flight for `segment`.
    pub fn outstanding(&self, segment: usize) -> Result<usize, EngineError> {
        Ok(self.handle(segment)?.status.outstanding.load(Ordering::SeqCst))
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Colors `segment` holds once fully ordered.
    pub fn segment_len(&self, segment: usize) -> Result<usize, EngineError> {
        self.handle(segment)?;
        Ok(self.orderer.segment_len(segment))
    }

    pub fn batch_count(&self, segment: usize) -> Result<usize, EngineError> {
        self.handle(segment)?;
        Ok(self.orderer.batch_count(segment))
    }

    pub fn prefetch_threshold(&self) -> usize {
        self.prefetch_threshold
    }

    pub fn orderer(&self) -> &Arc<PerceptualOrderer> {
        &self.orderer
    }
}

async fn run_worker(
    segment: usize,
    orderer: Arc<PerceptualOrderer>,
    accumulator: Arc<SortAccumulator>,
    status: Arc<WorkerStatus>,
    mut requests: mpsc::UnboundedReceiver<()>,
) {
    tracing::debug!(segment, "Worker started");

    while requests.recv().await.is_some() {
        let batch_index = accumulator.next_batch_index();
        if batch_index >= orderer.batch_count(segment) {
            tracing::debug!(segment, batch = batch_index, "No batches left, ignoring request");
            status.outstanding.fetch_sub(1, Ordering::SeqCst);
            continue;
        }

        status.computing.store(true, Ordering::SeqCst);
        let job = orderer.clone();
        let result =
            tokio::task::spawn_blocking(move || job.compute_batch(segment, batch_index)).await;

        match result {
            Ok(Some(colors)) => match accumulator.commit(batch_index, colors) {
                CommitOutcome::Committed { batches, len } => {
                    tracing::info!(segment, batch = batch_index, batches, len, "Committed batch");
                }
                outcome => {
                    tracing::warn!(segment, batch = batch_index, ?outcome, "Batch not committed");
                }
            },
            Ok(None) => {
                tracing::debug!(segment, batch = batch_index, "Batch out of range");
            }
            Err(e) => {
                tracing::error!(segment, batch = batch_index, error = %e, "Batch computation failed");
            }
        }

        status.computing.store(false, Ordering::SeqCst);
        status.outstanding.fetch_sub(1, Ordering::SeqCst);
    }

    tracing::debug!(segment, "Worker stopped");
}
