pub mod accumulator;
pub mod engine;
pub mod palette_tracker;
pub mod sampler;

pub use accumulator::{CommitOutcome, SortAccumulator, SortedSequence};
pub use engine::{ColorEngine, EngineOptions, SegmentState, DEFAULT_PREFETCH_THRESHOLD};
pub use palette_tracker::{PaletteReading, PaletteTracker};
pub use sampler::{decode_png, downsample, extract_palette, DecodedImage};
