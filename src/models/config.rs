use perceptual_color::{
    DistanceSpace, HueRange, HueTable, HueTableError, OrderOptions, VibrancyFilter,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;
use crate::services::EngineOptions;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Lattice points per RGB channel
    #[serde(default = "default_cube_resolution")]
    pub cube_resolution: usize,

    /// Hue segmentation, either a preset or explicit ranges
    #[serde(default)]
    pub hue_table: HueTableConfig,

    /// Colors per ordering batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Drop dull colors before ordering (disabled when absent)
    #[serde(default)]
    pub vibrancy: Option<VibrancyConfig>,

    /// Distance metric for the nearest-neighbour walk
    #[serde(default)]
    pub distance: DistanceConfig,

    /// Re-order whole segments once more in offline ordering
    #[serde(default)]
    pub final_pass: bool,

    /// Live palette extraction
    #[serde(default)]
    pub palette: PaletteConfig,

    /// How close to the end of a sequence a consumer may get before the
    /// next batch is requested
    #[serde(default = "default_prefetch_threshold")]
    pub prefetch_threshold: usize,
}

fn default_cube_resolution() -> usize {
    64
}

fn default_batch_size() -> usize {
    1000
}

fn default_prefetch_threshold() -> usize {
    300
}

/// Hue table selection
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum HueTableConfig {
    Preset {
        preset: HuePreset,
    },
    Ranges {
        /// Number of segments; inferred from the ranges when omitted
        #[serde(default)]
        segments: Option<usize>,
        ranges: Vec<HueRangeConfig>,
    },
}

impl Default for HueTableConfig {
    fn default() -> Self {
        HueTableConfig::Preset {
            preset: HuePreset::Uniform6,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HuePreset {
    /// Six equal segments
    Uniform6,
    /// Eight equal segments
    Uniform8,
    /// Eight hue families, reds merged across hue 0/1
    Wrap8,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct HueRangeConfig {
    pub start: f64,
    pub end: f64,
    pub segment: usize,
}

impl HueTableConfig {
    /// Build and validate the table.
    pub fn to_table(&self) -> Result<HueTable, HueTableError> {
        match self {
            HueTableConfig::Preset { preset } => match preset {
                HuePreset::Uniform6 => HueTable::uniform(6),
                HuePreset::Uniform8 => HueTable::uniform(8),
                HuePreset::Wrap8 => Ok(HueTable::eight_with_wrap()),
            },
            HueTableConfig::Ranges { segments, ranges } => {
                let count = segments.unwrap_or_else(|| {
                    ranges.iter().map(|r| r.segment + 1).max().unwrap_or(0)
                });
                let ranges = ranges
                    .iter()
                    .map(|r| HueRange::new(r.start, r.end, r.segment))
                    .collect();
                HueTable::new(count, ranges)
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct VibrancyConfig {
    #[serde(default = "default_vibrancy_threshold")]
    pub min_saturation: f64,
    #[serde(default = "default_vibrancy_threshold")]
    pub min_brightness: f64,
}

fn default_vibrancy_threshold() -> f64 {
    0.5
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceConfig {
    #[default]
    Lab,
    Rgb,
}

impl From<DistanceConfig> for DistanceSpace {
    fn from(d: DistanceConfig) -> Self {
        match d {
            DistanceConfig::Lab => DistanceSpace::Lab,
            DistanceConfig::Rgb => DistanceSpace::Rgb,
        }
    }
}

/// Live palette extraction settings
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct PaletteConfig {
    /// Default number of palette colors
    #[serde(default = "default_palette_k")]
    pub k: usize,

    /// Palettes kept for smoothing
    #[serde(default = "default_palette_history")]
    pub history: usize,

    /// Edge length of the downsampled grid fed to the quantizer
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

fn default_palette_k() -> usize {
    12
}

fn default_palette_history() -> usize {
    3
}

fn default_sample_size() -> usize {
    64
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            k: default_palette_k(),
            history: default_palette_history(),
            sample_size: default_sample_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        cube_resolution = config.cube_resolution,
                        batch_size = config.batch_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the file named by `CONFIG_FILE`, if set.
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok();
        Self::load(path.as_deref().map(Path::new))
    }

    /// Ordering options for the library.
    pub fn order_options(&self) -> Result<OrderOptions, EngineError> {
        Ok(OrderOptions::new()
            .resolution(self.cube_resolution)
            .hue_table(self.hue_table.to_table()?)
            .batch_size(self.batch_size)
            .vibrancy(
                self.vibrancy
                    .map(|v| VibrancyFilter::new(v.min_saturation, v.min_brightness)),
            )
            .distance(self.distance.into())
            .final_pass(self.final_pass))
    }

    pub fn engine_options(&self) -> Result<EngineOptions, EngineError> {
        Ok(EngineOptions {
            order: self.order_options()?,
            prefetch_threshold: self.prefetch_threshold,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cube_resolution: default_cube_resolution(),
            hue_table: HueTableConfig::default(),
            batch_size: default_batch_size(),
            vibrancy: None,
            distance: DistanceConfig::default(),
            final_pass: false,
            palette: PaletteConfig::default(),
            prefetch_threshold: default_prefetch_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.cube_resolution, 64);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.prefetch_threshold, 300);
        assert_eq!(config.palette.k, 12);
        assert_eq!(config.palette.history, 3);
        assert_eq!(config.palette.sample_size, 64);
        assert!(config.vibrancy.is_none());
        assert!(!config.final_pass);
        assert_eq!(config.hue_table.to_table().unwrap().segment_count(), 6);
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
cube_resolution: 32
batch_size: 500
hue_table:
  preset: wrap8
vibrancy:
  min_saturation: 0.6
distance: rgb
final_pass: true
palette:
  k: 8
prefetch_threshold: 100
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.cube_resolution, 32);
        assert_eq!(config.batch_size, 500);
        assert_eq!(
            config.hue_table,
            HueTableConfig::Preset {
                preset: HuePreset::Wrap8
            }
        );
        let vibrancy = config.vibrancy.unwrap();
        assert_eq!(vibrancy.min_saturation, 0.6);
        assert_eq!(vibrancy.min_brightness, 0.5);
        assert_eq!(config.distance, DistanceConfig::Rgb);
        assert!(config.final_pass);
        assert_eq!(config.palette.k, 8);
        assert_eq!(config.palette.history, 3);

        let options = config.order_options().unwrap();
        assert_eq!(options.hue_table.segment_count(), 8);
        assert_eq!(options.distance, DistanceSpace::Rgb);
    }

    #[test]
    fn test_explicit_ranges() {
        let yaml = r#"
hue_table:
  ranges:
    - { start: 0.0, end: 0.5, segment: 0 }
    - { start: 0.5, end: 0.9, segment: 1 }
    - { start: 0.9, end: 1.0, segment: 0 }
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        let table = config.hue_table.to_table().unwrap();
        assert_eq!(table.segment_count(), 2);
        assert_eq!(table.segment_of(0.95), 0);
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        let yaml = r#"
hue_table:
  segments: 3
  ranges:
    - { start: 0.0, end: 0.5, segment: 0 }
    - { start: 0.5, end: 1.0, segment: 1 }
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.engine_options(),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size: 42").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.batch_size, 42);
        assert_eq!(config.cube_resolution, 64);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        assert_eq!(AppConfig::load(None), AppConfig::default());

        let missing = Path::new("/nonexistent/thatcolor/config.yaml");
        assert_eq!(AppConfig::load(Some(missing)), AppConfig::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size: [not a number").unwrap();
        assert_eq!(AppConfig::load(Some(file.path())), AppConfig::default());
    }
}
