// THEORY:
// The `accumulator` is the first stage of the engine. It walks a pixel source
// exactly once and tallies how many pixels sit at each intensity level.
//
// Key principles:
// 1.  **Single visitation**: Every pixel is read once. The color variant tallies
//     red, green and blue during that same visit rather than making three
//     passes over the source.
// 2.  **Fresh output**: Each call starts from a zeroed array and hands it back by
//     value. Nothing is cached or shared between calls.
// 3.  **Trusted input**: Channel values are bytes, so every value is a valid bin
//     index and the scan loop carries no range checks.
//
// An empty source (zero width or height) yields an all-zero histogram.

use crate::core_modules::histogram::{CHANNELS, ColorChannel, Histogram, LEVELS, RgbHistogram};
use crate::core_modules::pixel_source::pixel_source::{GrayPixelSource, RgbPixelSource};
use tracing::trace;

/// Counts the gray levels of `image`.
pub fn compute_histogram<S: GrayPixelSource + ?Sized>(image: &S) -> Histogram {
    let mut histogram: Histogram = [0; LEVELS];
    let (width, height) = (image.width(), image.height());

    for y in 0..height {
        for x in 0..width {
            histogram[image.luma_at(x, y) as usize] += 1;
        }
    }

    trace!(width, height, "computed gray histogram");
    histogram
}

/// Counts the red, green and blue levels of `image` in one scan.
/// The result is indexed by `ColorChannel::index()`.
pub fn compute_histogram_rgb<S: RgbPixelSource + ?Sized>(image: &S) -> RgbHistogram {
    let mut histograms: RgbHistogram = [[0; LEVELS]; CHANNELS];
    let (width, height) = (image.width(), image.height());

    for y in 0..height {
        for x in 0..width {
            let [red, green, blue] = image.rgb_at(x, y);
            histograms[0][red as usize] += 1;
            histograms[1][green as usize] += 1;
            histograms[2][blue as usize] += 1;
        }
    }

    trace!(width, height, "computed rgb histogram");
    histograms
}

/// Counts the levels of a single color channel of `image`.
pub fn compute_channel_histogram<S: RgbPixelSource + ?Sized>(
    image: &S,
    channel: ColorChannel,
) -> Histogram {
    let mut histogram: Histogram = [0; LEVELS];
    let index = channel.index();
    let (width, height) = (image.width(), image.height());

    for y in 0..height {
        for x in 0..width {
            histogram[image.rgb_at(x, y)[index] as usize] += 1;
        }
    }

    trace!(width, height, ?channel, "computed channel histogram");
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::histogram::total;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn gray_counts_every_pixel_once() {
        let image = GrayImage::from_fn(7, 5, |x, y| Luma([((x * 31 + y * 17) % 256) as u8]));
        let histogram = compute_histogram(&image);
        assert_eq!(total(&histogram), 35);
    }

    #[test]
    fn empty_image_yields_blank_histogram() {
        let image = GrayImage::new(0, 0);
        assert_eq!(compute_histogram(&image), [0; LEVELS]);

        let image = RgbImage::new(4, 0);
        assert_eq!(compute_histogram_rgb(&image), [[0; LEVELS]; CHANNELS]);
    }

    #[test]
    fn rgb_channels_are_independent() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([10, 20, 30]));
        image.put_pixel(1, 0, Rgb([10, 40, 50]));

        let [red, green, blue] = compute_histogram_rgb(&image);
        assert_eq!(red[10], 2);
        assert_eq!(green[20], 1);
        assert_eq!(green[40], 1);
        assert_eq!(blue[30], 1);
        assert_eq!(blue[50], 1);
    }

    #[test]
    fn alpha_is_ignored() {
        let image = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 200]));
        let histograms = compute_histogram_rgb(&image);
        for histogram in &histograms {
            assert_eq!(histogram[200], 0);
            assert_eq!(total(histogram), 9);
        }
    }

    #[test]
    fn single_channel_matches_combined_scan() {
        let image = RgbImage::from_fn(16, 9, |x, y| {
            Rgb([(x * 16) as u8, (y * 28) as u8, ((x + y) * 7) as u8])
        });
        let combined = compute_histogram_rgb(&image);
        for channel in ColorChannel::ALL {
            assert_eq!(
                compute_channel_histogram(&image, channel),
                combined[channel.index()],
                "{channel:?}"
            );
        }
    }
}
