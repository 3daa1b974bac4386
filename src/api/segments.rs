//! Ordered color sequences, one per hue segment.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::services::{ColorEngine, SegmentState};

/// Largest page served by [`handle_segment_colors`].
pub const MAX_PAGE: usize = 10_000;

/// Progress of one segment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SegmentSummary {
    pub segment: usize,
    /// Colors committed so far
    pub committed: usize,
    /// Colors in the segment once fully ordered
    pub total: usize,
    pub batches_committed: usize,
    pub batch_count: usize,
    pub state: SegmentState,
}

impl SegmentSummary {
    pub fn collect(engine: &ColorEngine, segment: usize) -> Result<Self, ApiError> {
        let snapshot = engine.snapshot(segment)?;
        Ok(Self {
            segment,
            committed: snapshot.len(),
            total: engine.segment_len(segment)?,
            batches_committed: snapshot.batch_count(),
            batch_count: engine.batch_count(segment)?,
            state: engine.state(segment)?,
        })
    }
}

/// Query parameters for a page of colors
#[derive(Debug, Deserialize, IntoParams)]
pub struct ColorsQuery {
    /// First color index (default 0)
    #[serde(default)]
    pub offset: usize,
    /// Maximum colors returned (default 1000, at most 10000)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Request the next batch if this page reaches near the committed end
    #[serde(default)]
    pub prefetch: bool,
}

fn default_limit() -> usize {
    1000
}

/// A page of a segment's ordered colors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SegmentColors {
    pub segment: usize,
    pub offset: usize,
    /// Colors committed when the page was taken
    pub committed: usize,
    /// Hex colors, `#rrggbb`
    pub colors: Vec<String>,
    /// Whether this call requested another batch
    pub prefetched: bool,
}

/// List segments and their progress
#[utoipa::path(
    get,
    path = "/api/segments",
    responses(
        (status = 200, description = "Progress of every segment", body = Vec<SegmentSummary>),
    ),
    tag = "Segments"
)]
pub async fn handle_list_segments(
    State(engine): State<Arc<ColorEngine>>,
) -> Result<Json<Vec<SegmentSummary>>, ApiError> {
    let summaries = (0..engine.segment_count())
        .map(|segment| SegmentSummary::collect(&engine, segment))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(summaries))
}

/// Get committed colors of a segment
#[utoipa::path(
    get,
    path = "/api/segments/{segment}",
    responses(
        (status = 200, description = "Page of ordered colors", body = SegmentColors),
        (status = 404, description = "Unknown segment"),
    ),
    params(
        ("segment" = usize, Path, description = "Segment index"),
        ColorsQuery,
    ),
    tag = "Segments"
)]
pub async fn handle_segment_colors(
    State(engine): State<Arc<ColorEngine>>,
    Path(segment): Path<usize>,
    Query(query): Query<ColorsQuery>,
) -> Result<Json<SegmentColors>, ApiError> {
    let snapshot = engine.snapshot(segment)?;
    let colors = snapshot.slice(query.offset, query.limit.min(MAX_PAGE));

    let prefetched = if query.prefetch {
        let visible = query.offset.saturating_add(colors.len()).saturating_sub(1);
        engine.prefetch(segment, visible, engine.prefetch_threshold())?
    } else {
        false
    };

    Ok(Json(SegmentColors {
        segment,
        offset: query.offset,
        committed: snapshot.len(),
        colors: colors.iter().map(|c| c.to_hex()).collect(),
        prefetched,
    }))
}

/// Request the next batch of a segment
///
/// Returns immediately; the batch is computed in the background.
#[utoipa::path(
    post,
    path = "/api/segments/{segment}/next",
    responses(
        (status = 202, description = "Batch requested", body = SegmentSummary),
        (status = 404, description = "Unknown segment"),
    ),
    params(("segment" = usize, Path, description = "Segment index")),
    tag = "Segments"
)]
pub async fn handle_next_batch(
    State(engine): State<Arc<ColorEngine>>,
    Path(segment): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    engine.request_next_batch(segment)?;
    let summary = SegmentSummary::collect(&engine, segment)?;
    Ok((StatusCode::ACCEPTED, Json(summary)))
}

/// Payload of a `snapshot` event
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SnapshotEvent {
    pub segment: usize,
    pub len: usize,
    pub batches: usize,
}

/// Stream snapshot growth as server-sent events
///
/// The current state is sent first, then one `snapshot` event per commit.
/// Each event carries a JSON [`SnapshotEvent`].
#[utoipa::path(
    get,
    path = "/api/segments/{segment}/events",
    responses(
        (status = 200, description = "Stream of `snapshot` events", body = SnapshotEvent, content_type = "text/event-stream"),
        (status = 404, description = "Unknown segment"),
    ),
    params(("segment" = usize, Path, description = "Segment index")),
    tag = "Segments"
)]
pub async fn handle_segment_events(
    State(engine): State<Arc<ColorEngine>>,
    Path(segment): Path<usize>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let rx = engine.subscribe(segment)?;

    let stream = WatchStream::new(rx).map(move |snapshot| {
        let payload = SnapshotEvent {
            segment,
            len: snapshot.len(),
            batches: snapshot.batch_count(),
        };
        Ok(Event::default()
            .event("snapshot")
            .data(serde_json::to_string(&payload).unwrap_or_default()))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
