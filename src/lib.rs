//! thatcolor - perceptual color engine
//!
//! Serves perceptually ordered hue segments of a discretized RGB cube and
//! extracts smoothed palettes from image frames.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
