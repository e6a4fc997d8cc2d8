// THEORY:
// The `pipeline` module is the top-level API for the common case: hand over a
// decoded image, get back its histogram chart. It chains the three stages in
// order (accumulate, normalize to the chart height, render) and keeps each
// stage's output available through `HistogramReport` for callers that also
// want the numbers, e.g. for thresholding or equalization.
//
// The pipeline holds no per-image state, so one instance can serve any number
// of images, from any number of threads.

use crate::core_modules::accumulator::{compute_histogram, compute_histogram_rgb};
use crate::core_modules::histogram::{Histogram, RgbHistogram, total};
use crate::core_modules::normalizer::{normalize, normalize_rgb};
use crate::core_modules::pixel_source::pixel_source::{GrayPixelSource, RgbPixelSource};
use crate::core_modules::renderer::{OutputSize, draw_histogram, draw_histogram_rgb};
use image::{GrayImage, RgbaImage};
use tracing::debug;

const DEFAULT_CHART_WIDTH: u32 = 256;
const DEFAULT_CHART_HEIGHT: u32 = 100;

/// Configuration for the HistogramPipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Size of the rendered chart. Histograms are normalized to its height.
    pub output_size: OutputSize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_size: OutputSize::new(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT),
        }
    }
}

/// Raw and normalized counts of one scan.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramReport<H> {
    /// Number of pixels scanned (per channel).
    pub pixel_count: u64,
    pub raw: H,
    pub normalized: H,
}

/// Chains accumulation, normalization and rendering.
pub struct HistogramPipeline {
    config: PipelineConfig,
}

impl HistogramPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn target_height(&self) -> u64 {
        self.config.output_size.height as u64
    }

    pub fn analyze_gray<S: GrayPixelSource + ?Sized>(&self, image: &S) -> HistogramReport<Histogram> {
        let raw = compute_histogram(image);
        let normalized = normalize(&raw, self.target_height());
        let pixel_count = total(&raw);
        debug!(pixel_count, "analyzed gray image");
        HistogramReport {
            pixel_count,
            raw,
            normalized,
        }
    }

    pub fn analyze_rgb<S: RgbPixelSource + ?Sized>(&self, image: &S) -> HistogramReport<RgbHistogram> {
        let raw = compute_histogram_rgb(image);
        let normalized = normalize_rgb(&raw, self.target_height());
        let pixel_count = total(&raw[0]);
        debug!(pixel_count, "analyzed rgb image");
        HistogramReport {
            pixel_count,
            raw,
            normalized,
        }
    }

    pub fn render_gray<S: GrayPixelSource + ?Sized>(&self, image: &S) -> GrayImage {
        self.chart_gray(&self.analyze_gray(image))
    }

    pub fn render_rgb<S: RgbPixelSource + ?Sized>(&self, image: &S) -> RgbaImage {
        self.chart_rgb(&self.analyze_rgb(image))
    }

    /// Renders an existing report at this pipeline's output size.
    pub fn chart_gray(&self, report: &HistogramReport<Histogram>) -> GrayImage {
        let size = self.config.output_size;
        debug!(width = size.width, height = size.height, "rendering gray chart");
        draw_histogram(&report.normalized, size)
    }

    pub fn chart_rgb(&self, report: &HistogramReport<RgbHistogram>) -> RgbaImage {
        let size = self.config.output_size;
        debug!(width = size.width, height = size.height, "rendering rgb chart");
        draw_histogram_rgb(&report.normalized, size)
    }
}

/// Computes, normalizes and draws the gray histogram of `image` in one call.
pub fn draw_image_histogram<S: GrayPixelSource + ?Sized>(image: &S, size: OutputSize) -> GrayImage {
    HistogramPipeline::new(PipelineConfig { output_size: size }).render_gray(image)
}

/// Computes, normalizes and draws the color histogram of `image` in one call.
pub fn draw_image_histogram_rgb<S: RgbPixelSource + ?Sized>(image: &S, size: OutputSize) -> RgbaImage {
    HistogramPipeline::new(PipelineConfig { output_size: size }).render_rgb(image)
}
