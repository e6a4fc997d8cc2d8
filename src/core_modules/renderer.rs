// THEORY:
// The `renderer` turns normalized histograms into a bar chart. The output
// width is split into 256 contiguous column groups, one per level, using the
// floating-point ratio `width / 256`. Group `i` spans columns
// `floor(i * scale)` up to `floor((i + 1) * scale)`, so narrow charts give some
// levels no columns at all and wide charts give some levels one column more
// than their neighbors.
//
// Inside a group every column gets a vertical bar rising from the bottom row.
// The bar covers the bottom row plus `value` rows above it, clamped at the top
// edge. A zero bin therefore still paints the bottom (baseline) row.
//
// Grayscale charts are white bars on black. Color charts run one pass per
// channel in R, G, B order over the same buffer; each pass only ever raises its
// own channel byte, so overlapping bars mix additively (red + blue = magenta,
// all three = white).
//
// Zero width or height produces a correctly shaped empty buffer and no drawing.

use crate::core_modules::histogram::{ColorChannel, Histogram, LEVELS, MAX_INTENSITY, RgbHistogram};
use image::{GrayImage, Luma, RgbaImage};
use tracing::{trace, warn};

/// Pixel dimensions of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when the chart has no pixels to draw into.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Draws a histogram already normalized to `size.height` as white bars on black.
pub fn draw_histogram(histogram: &Histogram, size: OutputSize) -> GrayImage {
    let mut chart = GrayImage::new(size.width, size.height);
    if size.is_empty() {
        warn!(width = size.width, height = size.height, "empty histogram chart requested");
        return chart;
    }

    draw_bars(histogram, size, |x, y| {
        chart.put_pixel(x, y, Luma([MAX_INTENSITY]));
    });
    chart
}

/// Draws three histograms already normalized to `size.height`, one color per channel.
pub fn draw_histogram_rgb(histograms: &RgbHistogram, size: OutputSize) -> RgbaImage {
    let mut chart = RgbaImage::new(size.width, size.height);
    if size.is_empty() {
        warn!(width = size.width, height = size.height, "empty histogram chart requested");
        return chart;
    }

    for channel in ColorChannel::ALL {
        let index = channel.index();
        trace!(?channel, "drawing channel pass");
        draw_bars(&histograms[index], size, |x, y| {
            chart.get_pixel_mut(x, y).0[index] = MAX_INTENSITY;
        });
    }
    chart
}

/// Column range `[start, end)` assigned to `level`.
pub fn column_group(level: usize, width: u32) -> (u32, u32) {
    let scale_x = width as f64 / LEVELS as f64;
    let start = (level as f64 * scale_x) as u32;
    let end = ((level + 1) as f64 * scale_x) as u32;
    (start.min(width), end.min(width))
}

/// Calls `set_pixel` for every pixel covered by a bar. `size` must be non-empty.
fn draw_bars(values: &Histogram, size: OutputSize, mut set_pixel: impl FnMut(u32, u32)) {
    let baseline = size.height - 1;
    for (level, &value) in values.iter().enumerate() {
        let (start, end) = column_group(level, size.width);
        let top = (baseline as u64).saturating_sub(value) as u32;
        for x in start..end {
            for y in (top..=baseline).rev() {
                set_pixel(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_groups_cover_width_exactly() {
        for width in [1u32, 100, 255, 256, 300, 512, 1000] {
            let mut expected_start = 0;
            for level in 0..LEVELS {
                let (start, end) = column_group(level, width);
                assert_eq!(start, expected_start, "width {width} level {level}");
                assert!(end >= start);
                expected_start = end;
            }
            assert_eq!(expected_start, width);
        }
    }

    #[test]
    fn narrow_chart_drops_some_levels() {
        let empty_groups = (0..LEVELS)
            .filter(|&level| {
                let (start, end) = column_group(level, 100);
                start == end
            })
            .count();
        assert_eq!(empty_groups, 156);
    }

    #[test]
    fn zero_area_returns_shaped_empty_buffer() {
        let histogram: Histogram = [5; LEVELS];
        let chart = draw_histogram(&histogram, OutputSize::new(0, 10));
        assert_eq!(chart.dimensions(), (0, 10));

        let chart = draw_histogram_rgb(&[histogram; 3], OutputSize::new(256, 0));
        assert_eq!(chart.dimensions(), (256, 0));
    }

    #[test]
    fn bar_height_is_value_plus_baseline() {
        let mut histogram: Histogram = [0; LEVELS];
        histogram[0] = 3;
        let chart = draw_histogram(&histogram, OutputSize::new(256, 10));

        let lit: Vec<u32> = (0..10).filter(|&y| chart.get_pixel(0, y).0[0] == 255).collect();
        assert_eq!(lit, vec![6, 7, 8, 9]);
    }

    #[test]
    fn oversized_value_is_clamped_at_top() {
        let histogram: Histogram = [u64::MAX; LEVELS];
        let chart = draw_histogram(&histogram, OutputSize::new(256, 4));
        assert!(chart.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn overlapping_channels_mix_additively() {
        let mut histograms: RgbHistogram = [[0; LEVELS]; 3];
        histograms[0][0] = 4;
        histograms[2][0] = 4;
        let chart = draw_histogram_rgb(&histograms, OutputSize::new(256, 6));

        assert_eq!(chart.get_pixel(0, 2).0, [255, 0, 255, 0]);
        assert_eq!(chart.get_pixel(0, 0).0, [0, 0, 0, 0]);
        // Baseline row is touched by every pass.
        assert_eq!(chart.get_pixel(0, 5).0, [255, 255, 255, 0]);
    }
}
