// THEORY:
// The `histogram` module holds the fixed domain facts shared by every stage:
// 8-bit channels give exactly 256 intensity levels, and color images carry
// exactly three examined channels (alpha is never counted). These are named
// constants rather than parameters so every histogram is a plain, statically
// sized array that is zero-initialized per call and never reallocated.

/// Number of intensity levels of an 8-bit channel.
pub const LEVELS: usize = 256;
/// Number of examined color channels (R, G, B).
pub const CHANNELS: usize = 3;
/// Full intensity of an 8-bit channel, used as the foreground value when drawing.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// Frequency of each intensity level, indexed 0..=255.
pub type Histogram = [u64; LEVELS];

/// One `Histogram` per color channel, indexed by `ColorChannel::index()`.
pub type RgbHistogram = [Histogram; CHANNELS];

/// Selects a single color channel of an RGB(A) pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// All channels in the fixed drawing order.
    pub const ALL: [ColorChannel; CHANNELS] =
        [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue];

    /// Position of this channel inside an `[r, g, b]` triple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }
}

/// Sum of all bins, which equals the number of pixels that were scanned.
pub fn total(histogram: &Histogram) -> u64 {
    histogram.iter().sum()
}

/// The largest bin, or 0 for an all-zero histogram.
pub fn peak(histogram: &Histogram) -> u64 {
    histogram.iter().copied().max().unwrap_or(0)
}
