pub mod config;

pub use config::{
    AppConfig, DistanceConfig, HuePreset, HueRangeConfig, HueTableConfig, PaletteConfig,
    VibrancyConfig,
};
