// THEORY:
// The `normalizer` rescales raw counts so the tallest bin of a histogram maps
// to a caller-chosen height (normally the pixel height of the chart). Each
// bin becomes `floor(raw * target_height / peak)`: multiply first, then
// divide, so small bins are not flattened to zero early. The product is
// formed in 128 bits, so no realistic pixel count can overflow it, and the
// quotient always fits back into a `u64` because it never exceeds the
// target height.
//
// A blank histogram (peak of 0) has nothing to scale and normalizes to all
// zeros; the division is never attempted.

use crate::core_modules::histogram::{Histogram, LEVELS, RgbHistogram, peak};

/// Rescales `histogram` so its largest bin equals `target_height`.
pub fn normalize(histogram: &Histogram, target_height: u64) -> Histogram {
    let max_raw = peak(histogram);
    let mut normalized: Histogram = [0; LEVELS];
    if max_raw == 0 {
        return normalized;
    }

    for (norm, &raw) in normalized.iter_mut().zip(histogram.iter()) {
        *norm = (raw as u128 * target_height as u128 / max_raw as u128) as u64;
    }
    normalized
}

/// Normalizes each channel against its own peak.
pub fn normalize_rgb(histograms: &RgbHistogram, target_height: u64) -> RgbHistogram {
    histograms.map(|histogram| normalize(&histogram, target_height))
}
