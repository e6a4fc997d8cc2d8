pub mod image_helper {
    use crate::error::Result;
    use image::{ExtendedColorType, GrayImage, ImageEncoder, RgbImage, RgbaImage};
    use std::path::Path;

    /// Writes a rendered grayscale chart as PNG.
    pub fn save_gray(path: impl AsRef<Path>, chart: &GrayImage) -> Result<()> {
        write_png(path.as_ref(), chart.as_raw(), chart.width(), chart.height(), ExtendedColorType::L8)
    }

    /// Writes a rendered color chart as an opaque RGB PNG. The chart's alpha
    /// byte is never drawn, so it is dropped rather than written as transparent.
    pub fn save_rgb(path: impl AsRef<Path>, chart: &RgbaImage) -> Result<()> {
        let opaque = RgbImage::from_fn(chart.width(), chart.height(), |x, y| {
            let [red, green, blue, _alpha] = chart.get_pixel(x, y).0;
            image::Rgb([red, green, blue])
        });
        write_png(path.as_ref(), opaque.as_raw(), opaque.width(), opaque.height(), ExtendedColorType::Rgb8)
    }

    fn write_png(
        path: &Path,
        buffer: &[u8],
        width: u32,
        height: u32,
        color_type: ExtendedColorType,
    ) -> Result<()> {
        let output = std::io::BufWriter::new(std::fs::File::create(path)?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(buffer, width, height, color_type)?;

        Ok(())
    }
}
