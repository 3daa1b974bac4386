//! Append-only accumulation of ordered batches.
//!
//! Each segment owns one [`SortAccumulator`]. Workers hand it finished
//! batches; readers take [`SortedSequence`] snapshots or subscribe to a
//! `watch` channel that carries every new snapshot.

use perceptual_color::Srgb;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Immutable snapshot of a segment's committed colors.
///
/// Batches are shared, so cloning a snapshot copies one pointer per batch.
/// A later snapshot always starts with every color of an earlier one.
#[derive(Debug, Clone, Default)]
pub struct SortedSequence {
    batches: Vec<Arc<[Srgb]>>,
    len: usize,
}

impl SortedSequence {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of committed batches.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn batches(&self) -> &[Arc<[Srgb]>] {
        &self.batches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Srgb> + '_ {
        self.batches.iter().flat_map(|batch| batch.iter())
    }

    pub fn get(&self, index: usize) -> Option<Srgb> {
        let (batch, within) = self.locate(index)?;
        self.batches[batch].get(within).copied()
    }

    /// Up to `limit` colors starting at `offset`.
    pub fn slice(&self, offset: usize, limit: usize) -> Vec<Srgb> {
        let Some((batch, within)) = self.locate(offset) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(limit.min(self.len - offset));
        let mut skip = within;
        for colors in &self.batches[batch..] {
            if out.len() == limit {
                break;
            }
            let take = (limit - out.len()).min(colors.len() - skip);
            out.extend_from_slice(&colors[skip..skip + take]);
            skip = 0;
        }
        out
    }

    /// Batch holding color `index` and the position inside it.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len {
            return None;
        }
        let mut start = 0;
        for (batch, colors) in self.batches.iter().enumerate() {
            if index < start + colors.len() {
                return Some((batch, index - start));
            }
            start += colors.len();
        }
        None
    }

    pub fn to_vec(&self) -> Vec<Srgb> {
        self.iter().copied().collect()
    }

    fn push(&mut self, batch: Vec<Srgb>) {
        self.len += batch.len();
        self.batches.push(batch.into());
    }
}

/// Result of handing a batch to [`SortAccumulator::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The batch (and `batches - 1` deferred successors) became visible.
    Committed { batches: usize, len: usize },
    /// The batch arrived ahead of a predecessor and is held back.
    Deferred,
    /// The batch index was already committed; the batch was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct Cursor {
    next_batch: usize,
    deferred: BTreeMap<usize, Vec<Srgb>>,
}

/// Single writer for one segment's sequence.
///
/// Batches become visible strictly in index order. A batch that finishes
/// early waits until every predecessor has been committed.
#[derive(Debug)]
pub struct SortAccumulator {
    segment: usize,
    cursor: Mutex<Cursor>,
    sender: watch::Sender<SortedSequence>,
}

impl SortAccumulator {
    pub fn new(segment: usize) -> Self {
        let (sender, _) = watch::channel(SortedSequence::default());
        Self {
            segment,
            cursor: Mutex::new(Cursor::default()),
            sender,
        }
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Commit batch `batch_index`.
    pub fn commit(&self, batch_index: usize, colors: Vec<Srgb>) -> CommitOutcome {
        let mut guard = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let cursor = &mut *guard;

        if batch_index < cursor.next_batch || cursor.deferred.contains_key(&batch_index) {
            tracing::debug!(segment = self.segment, batch = batch_index, "Dropping stale batch");
            return CommitOutcome::Stale;
        }
        if batch_index > cursor.next_batch {
            tracing::debug!(
                segment = self.segment,
                batch = batch_index,
                waiting_for = cursor.next_batch,
                "Deferring out-of-order batch"
            );
            cursor.deferred.insert(batch_index, colors);
            return CommitOutcome::Deferred;
        }

        let mut sequence = self.sender.borrow().clone();
        sequence.push(colors);
        cursor.next_batch += 1;
        let mut batches = 1;

        while let Some(next) = cursor.deferred.remove(&cursor.next_batch) {
            sequence.push(next);
            cursor.next_batch += 1;
            batches += 1;
        }

        let len = sequence.len();
        self.sender.send_replace(sequence);
        CommitOutcome::Committed { batches, len }
    }

    /// Index of the next batch that would be committed in order.
    pub fn next_batch_index(&self) -> usize {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_batch
    }

    pub fn snapshot(&self) -> SortedSequence {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SortedSequence> {
        self.sender.subscribe()
    }
}
