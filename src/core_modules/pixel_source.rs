// THEORY:
// The `pixel_source` module is the only contact point between the histogram
// engine and whatever owns the pixels. The engine never decodes files and
// never mutates its input; it only needs to ask "how big are you?" and "what
// is the value at (x, y)?". Those two questions form the `GrayPixelSource`
// and `RgbPixelSource` traits, and the scanning stages visit pixels through
// them directly instead of registering per-pixel callbacks.
//
// Implementations are provided for:
// - the `image` crate buffers (`GrayImage`, `RgbImage`, `RgbaImage`), which is
//   what callers normally decode into, and
// - `RawFrame`, a borrowed, tightly packed byte frame as delivered by capture
//   devices. Its constructor checks the byte length against the layout once;
//   after that, per-pixel values are trusted to be in 0..=255 by construction.
//
// Alpha is never examined. A color source asked for gray values answers with
// Rec. 601 luma, whether it is an `image` buffer or a `RawFrame`.

pub mod pixel_source {
    use crate::error::{HistogramError, Result};
    use image::{GrayImage, RgbImage, RgbaImage};

    pub type Channel = u8;
    pub type Luminance = f64;

    /// A single-channel (grayscale) pixel grid.
    pub trait GrayPixelSource {
        fn width(&self) -> u32;
        fn height(&self) -> u32;
        /// Gray value at (x, y). Callers stay within `width() x height()`.
        fn luma_at(&self, x: u32, y: u32) -> Channel;
    }

    /// A color pixel grid. Only the red, green and blue channels are exposed.
    pub trait RgbPixelSource {
        fn width(&self) -> u32;
        fn height(&self) -> u32;
        /// `[red, green, blue]` at (x, y). Callers stay within `width() x height()`.
        fn rgb_at(&self, x: u32, y: u32) -> [Channel; 3];
    }

    impl GrayPixelSource for GrayImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        #[inline]
        fn luma_at(&self, x: u32, y: u32) -> Channel {
            self.get_pixel(x, y).0[0]
        }
    }

    impl RgbPixelSource for RgbImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        #[inline]
        fn rgb_at(&self, x: u32, y: u32) -> [Channel; 3] {
            self.get_pixel(x, y).0
        }
    }

    impl RgbPixelSource for RgbaImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        #[inline]
        fn rgb_at(&self, x: u32, y: u32) -> [Channel; 3] {
            let [red, green, blue, _alpha] = self.get_pixel(x, y).0;
            [red, green, blue]
        }
    }

    impl GrayPixelSource for RgbImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        #[inline]
        fn luma_at(&self, x: u32, y: u32) -> Channel {
            luminance(self.get_pixel(x, y).0).round() as Channel
        }
    }

    impl GrayPixelSource for RgbaImage {
        fn width(&self) -> u32 {
            self.dimensions().0
        }

        fn height(&self) -> u32 {
            self.dimensions().1
        }

        #[inline]
        fn luma_at(&self, x: u32, y: u32) -> Channel {
            let [red, green, blue, _alpha] = self.get_pixel(x, y).0;
            luminance([red, green, blue]).round() as Channel
        }
    }

    /// Byte layout of a `RawFrame`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FrameLayout {
        Gray8,
        Rgb8,
        Rgba8,
    }

    impl FrameLayout {
        pub const fn bytes_per_pixel(self) -> usize {
            match self {
                FrameLayout::Gray8 => 1,
                FrameLayout::Rgb8 => 3,
                FrameLayout::Rgba8 => 4,
            }
        }
    }

    /// A borrowed, row-major, tightly packed frame buffer.
    #[derive(Debug, Clone, Copy)]
    pub struct RawFrame<'a> {
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: FrameLayout,
    }

    impl<'a> RawFrame<'a> {
        /// Wraps `data`, which must hold exactly `width * height` pixels of `layout`.
        pub fn new(data: &'a [u8], width: u32, height: u32, layout: FrameLayout) -> Result<Self> {
            let expected = (width as usize)
                .checked_mul(height as usize)
                .and_then(|pixels| pixels.checked_mul(layout.bytes_per_pixel()))
                .ok_or(HistogramError::FrameTooLarge { width, height })?;
            if data.len() != expected {
                return Err(HistogramError::FrameSizeMismatch {
                    expected,
                    actual: data.len(),
                });
            }
            Ok(Self {
                data,
                width,
                height,
                layout,
            })
        }

        pub fn layout(&self) -> FrameLayout {
            self.layout
        }

        #[inline]
        fn offset(&self, x: u32, y: u32) -> usize {
            (y as usize * self.width as usize + x as usize) * self.layout.bytes_per_pixel()
        }
    }

    /// Rec. 601 luma of an RGB triple.
    #[inline]
    pub fn luminance(rgb: [Channel; 3]) -> Luminance {
        0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64
    }

    impl GrayPixelSource for RawFrame<'_> {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        #[inline]
        fn luma_at(&self, x: u32, y: u32) -> Channel {
            match self.layout {
                FrameLayout::Gray8 => self.data[self.offset(x, y)],
                FrameLayout::Rgb8 | FrameLayout::Rgba8 => {
                    luminance(self.rgb_at(x, y)).round() as Channel
                }
            }
        }
    }

    impl RgbPixelSource for RawFrame<'_> {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        #[inline]
        fn rgb_at(&self, x: u32, y: u32) -> [Channel; 3] {
            let offset = self.offset(x, y);
            match self.layout {
                FrameLayout::Gray8 => {
                    let value = self.data[offset];
                    [value, value, value]
                }
                FrameLayout::Rgb8 | FrameLayout::Rgba8 => [
                    self.data[offset],
                    self.data[offset + 1],
                    self.data[offset + 2],
                ],
            }
        }
    }
}
