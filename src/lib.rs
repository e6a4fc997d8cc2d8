// THEORY:
// This file is the main entry point for the `histogram_vision` library crate.
// It exposes the two-stage histogram engine: accumulation of per-level counts
// from a pixel source, and rendering of those counts as a bar-chart image.
//
// The stages live in `core_modules` and stay independently usable. `pipeline`
// chains them for the common "image in, histogram image out" case, and
// `parallel_pipeline` fans whole frames out to a pool of workers.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use crate::core_modules::histogram::{
    CHANNELS, ColorChannel, Histogram, LEVELS, MAX_INTENSITY, RgbHistogram,
};
pub use crate::core_modules::pixel_source::pixel_source::{
    FrameLayout, GrayPixelSource, RawFrame, RgbPixelSource,
};
pub use crate::core_modules::renderer::OutputSize;
pub use crate::error::{HistogramError, Result};
