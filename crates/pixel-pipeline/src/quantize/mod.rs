//! Color quantization.
//!
//! [`quantize`] reduces an image to at most `color_count` colors:
//!
//! 1. Build a palette with [`median_cut`]. Images that already fit keep
//!    their exact colors, so quantizing twice changes nothing.
//! 2. Remap every pixel to its nearest palette entry, or diffuse the
//!    residual with Floyd-Steinberg when dithering is requested.
//!
//! [`quantize_indexed`] runs the same steps and keeps the result as palette
//! indices. A raster that is already reduced (pipeline output) is indexed
//! exactly with [`IndexedImage::from_raster`] instead.

mod dither;
mod indexed;
mod median_cut;
mod palette;

pub use indexed::IndexedImage;
pub use median_cut::median_cut;
pub use palette::{Palette, MAX_PALETTE_SIZE};

use crate::api::PipelineError;
use crate::image::RasterImage;

/// Smallest accepted color count.
pub const MIN_COLOR_COUNT: usize = 2;

/// Reduce `image` to at most `color_count` distinct colors.
///
/// # Errors
///
/// [`PipelineError::InvalidColorCount`] if `color_count` is outside `2..=256`.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{quantize, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(32, 32, |x, y| Rgb::new(x as u8 * 8, y as u8 * 8, 90)).unwrap();
/// let reduced = quantize(&img, 16, false).unwrap();
/// assert!(reduced.distinct_colors() <= 16);
/// ```
pub fn quantize(
    image: &RasterImage,
    color_count: usize,
    use_dithering: bool,
) -> Result<RasterImage, PipelineError> {
    let palette = median_cut(image, color_count)?;
    if use_dithering {
        IndexedImage::new(
            dither::dither_indices(image, &palette),
            image.width(),
            image.height(),
            palette,
        )
        .to_raster()
    } else {
        Ok(palette.remap(image))
    }
}

/// Like [`quantize`], but return the palette-indexed result.
///
/// # Errors
///
/// [`PipelineError::InvalidColorCount`] if `color_count` is outside `2..=256`.
pub fn quantize_indexed(
    image: &RasterImage,
    color_count: usize,
    use_dithering: bool,
) -> Result<IndexedImage, PipelineError> {
    let palette = median_cut(image, color_count)?;
    let indices = if use_dithering {
        dither::dither_indices(image, &palette)
    } else {
        palette.index_pixels(image)
    };
    Ok(IndexedImage::new(
        indices,
        image.width(),
        image.height(),
        palette,
    ))
}
