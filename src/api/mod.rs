pub mod config;
pub mod palette;
pub mod segments;

pub use config::{handle_get_config, __path_handle_get_config};
pub use palette::{
    handle_clear_history, handle_current_palette, handle_extract_palette, PaletteQuery,
    PaletteResponse, __path_handle_clear_history, __path_handle_current_palette,
    __path_handle_extract_palette,
};
pub use segments::{
    handle_list_segments, handle_next_batch, handle_segment_colors, handle_segment_events,
    ColorsQuery, SegmentColors, SegmentSummary, SnapshotEvent, __path_handle_list_segments,
    __path_handle_next_batch, __path_handle_segment_colors, __path_handle_segment_events,
};
