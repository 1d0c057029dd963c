#![deny(unsafe_code)]
//! Core types for the turtle-art fractal curve renderer.
//!
//! Provides the `EngineError` taxonomy, the `Rgba` color type, the `Canvas`
//! drawing contract with its `Segment` and `Gradient` inputs, the CPU
//! `RasterCanvas`, and helpers for reading JSON scene overrides.

pub mod canvas;
pub mod color;
pub mod error;
pub mod params;

pub use canvas::{Canvas, Gradient, RasterCanvas, Segment};
pub use color::Rgba;
pub use error::EngineError;
