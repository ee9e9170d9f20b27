//! Pixel-art conversion.

use crate::api::PipelineError;
use crate::filter::{
    adjust_contrast, adjust_saturation, median_filter, resize, unsharp_mask, Interpolation,
    DEFAULT_MEDIAN_WINDOW,
};
use crate::image::{checked_len, RasterImage};
use crate::quantize::{median_cut, Palette, MAX_PALETTE_SIZE};

use super::options::PixelArtConfig;

const SMOOTH_CONTRAST: f32 = 1.1;
const SMOOTH_SATURATION: f32 = 1.05;
const POST_QUANTIZE_CONTRAST: f32 = 1.05;

/// Grid sharpening: radius, percent, threshold.
const GRID_SHARPEN: (f32, u32, u8) = (1.0, 50, 3);

/// Convert `src` into blocky pixel art.
///
/// The image is shrunk to a grid `config.target_pixel_width` cells wide,
/// optionally reduced to `config.color_count` colors, and blown back up
/// with nearest-neighbour so every cell becomes a uniform block. With
/// `enhance_mode` the source is smoothed first, the downscale goes through
/// a 2x intermediate, the grid is sharpened, and a final median pass cleans
/// block edges when blocks are large.
///
/// # Errors
///
/// - Invalid config values (see [`PixelArtConfig::validate`])
/// - [`PipelineError::InvalidDimension`] when any stage would produce an
///   empty raster (e.g. a grid height that rounds to zero)
/// - [`PipelineError::ImageTooLarge`] when the grid or the scaled output
///   exceeds [`MAX_PIXELS`](crate::MAX_PIXELS); checked before any work
///
/// # Example
///
/// ```
/// use pixel_pipeline::{convert_to_pixel_art, Interpolation, PixelArtConfig, RasterImage, Rgb};
///
/// let src = RasterImage::from_fn(80, 60, |x, y| Rgb::new(x as u8 * 3, y as u8 * 4, 128)).unwrap();
/// let config = PixelArtConfig::new()
///     .target_pixel_width(8)
///     .color_count(Some(4))
///     .enhance_mode(false)
///     .interpolation(Interpolation::Nearest);
/// let art = convert_to_pixel_art(&src, &config).unwrap();
/// assert_eq!(art.dimensions(), (80, 60));
/// assert!(art.distinct_colors() <= 4);
/// ```
pub fn convert_to_pixel_art(
    src: &RasterImage,
    config: &PixelArtConfig,
) -> Result<RasterImage, PipelineError> {
    config.validate()?;
    let (src_w, src_h) = src.dimensions();
    let (grid_w, grid_h) = config.grid_size(src_w, src_h);
    let (final_w, final_h) = config.output_size(src_w, src_h);
    checked_len("pixel grid", grid_w, grid_h)?;
    checked_len("pixel art output", final_w, final_h)?;

    let working = if config.enhance_mode {
        smooth(src, config.interpolation)?
    } else {
        src.clone()
    };

    let mut grid = downscale(&working, grid_w, grid_h, config)?;

    if config.enhance_mode {
        let (radius, percent, threshold) = GRID_SHARPEN;
        grid = unsharp_mask(&grid, radius, percent, threshold)?;
    }

    let mut palette = None;
    if let Some(count) = config.color_count {
        grid = median_cut(&grid, count)?.remap(&grid);
        if config.enhance_mode {
            grid = adjust_contrast(&grid, POST_QUANTIZE_CONTRAST)?;
        }
        palette = Palette::from_image_colors(&grid, MAX_PALETTE_SIZE);
    }

    let mut output = resize(&grid, final_w, final_h, Interpolation::Nearest)?;

    if config.enhance_mode && final_w > 2 * grid_w {
        output = median_filter(&output, DEFAULT_MEDIAN_WINDOW)?;
        // The per-channel median can mix block colors into new ones.
        if let Some(palette) = &palette {
            output = palette.remap(&output);
        }
    }

    Ok(output)
}

/// Halve and restore the source to suppress fine noise before gridding.
fn smooth(src: &RasterImage, method: Interpolation) -> Result<RasterImage, PipelineError> {
    let (w, h) = src.dimensions();
    let half = resize(src, w / 2, h / 2, method)?;
    let restored = resize(&half, w, h, method)?;
    let contrasted = adjust_contrast(&restored, SMOOTH_CONTRAST)?;
    adjust_saturation(&contrasted, SMOOTH_SATURATION)
}

fn downscale(
    working: &RasterImage,
    grid_w: usize,
    grid_h: usize,
    config: &PixelArtConfig,
) -> Result<RasterImage, PipelineError> {
    if config.enhance_mode && grid_w < working.width() / 2 {
        let intermediate = resize(working, grid_w * 2, grid_h * 2, config.interpolation)?;
        resize(&intermediate, grid_w, grid_h, Interpolation::Nearest)
    } else {
        resize(working, grid_w, grid_h, Interpolation::Nearest)
    }
}
