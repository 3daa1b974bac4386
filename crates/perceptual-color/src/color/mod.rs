//! Color types and conversion utilities
//!
//! Each color space is a distinct type so a value's space is always known
//! at compile time:
//!
//! - [`Srgb`]: device RGB, gamma-encoded. Input and output.
//! - [`LinearRgb`]: linear light, the bridge to XYZ.
//! - [`Xyz`]: CIE XYZ relative to D65.
//! - [`Lab`]: CIE 1976 L*a*b*, perceptually uniform.
//! - [`Hsb`]: hue/saturation/brightness, used for segmentation and sorting.
//!
//! # Example
//!
//! ```
//! use perceptual_color::{Lab, Srgb};
//!
//! let srgb = Srgb::from_u8(200, 120, 40);
//! let lab = Lab::from(srgb);
//! let back = Srgb::from(lab);
//! assert_eq!(back.to_bytes(), [200, 120, 40]);
//! ```

mod distance;
mod hsb;
mod lab;
mod linear_rgb;
mod srgb;
pub mod transfer;
mod xyz;

pub use distance::{distance, distance_squared, Channels};
pub use hsb::Hsb;
pub use lab::{Lab, D65_WHITE, EPSILON, KAPPA};
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
pub use xyz::Xyz;
