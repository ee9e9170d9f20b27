//! General quality enhancement.

use crate::api::PipelineError;
use crate::filter::{
    adjust_contrast, adjust_saturation, gaussian_blur, median_filter, resize, unsharp_mask,
    Interpolation, DEFAULT_MEDIAN_WINDOW,
};
use crate::image::{checked_len, RasterImage};

use super::options::EnhanceConfig;

const SHARPEN_RADIUS: f32 = 1.0;
const SHARPEN_THRESHOLD: u8 = 3;
const MAX_SHARPEN_PERCENT: f32 = 150.0;
const MAX_BLUR_RADIUS: f32 = 8.0;
const UPSCALE_SHARPEN_PERCENT: u32 = 60;

/// Denoise, sharpen or soften, adjust tone, and optionally upscale `src`.
///
/// Stages, in order:
///
/// 1. `denoise`: 3x3 median filter
/// 2. `sharpness >= 1`: unsharp mask at `min(sharpness * 80, 150)` percent,
///    otherwise a gaussian blur of radius `clamp((1 - sharpness) * 5, 0, 8)`
/// 3. contrast, capped at [`EnhanceConfig::MAX_TONE_FACTOR`]
/// 4. saturation, capped the same way
/// 5. `upscale_factor > 1`: Lanczos upscale, then a light unsharp mask
///
/// # Errors
///
/// - [`PipelineError::InvalidParameter`] for a non-positive sharpness or any
///   non-finite factor
/// - [`PipelineError::ImageTooLarge`] when the upscaled size exceeds
///   [`MAX_PIXELS`](crate::MAX_PIXELS); checked before any work
///
/// # Example
///
/// ```
/// use pixel_pipeline::{enhance_quality, EnhanceConfig, RasterImage, Rgb};
///
/// let src = RasterImage::from_fn(20, 10, |x, _| Rgb::new(x as u8 * 10, 50, 50)).unwrap();
/// let config = EnhanceConfig::new().upscale_factor(Some(2.0));
/// let out = enhance_quality(&src, &config).unwrap();
/// assert_eq!(out.dimensions(), (40, 20));
/// ```
pub fn enhance_quality(
    src: &RasterImage,
    config: &EnhanceConfig,
) -> Result<RasterImage, PipelineError> {
    config.validate()?;
    let upscale = config
        .upscale_factor
        .filter(|f| *f > 1.0)
        .map(|factor| upscaled_size(src.dimensions(), factor));
    if let Some((w, h)) = upscale {
        checked_len("upscale", w, h)?;
    }

    let mut image = if config.denoise {
        median_filter(src, DEFAULT_MEDIAN_WINDOW)?
    } else {
        src.clone()
    };

    image = if config.sharpness >= 1.0 {
        unsharp_mask(&image, SHARPEN_RADIUS, sharpen_percent(config.sharpness), SHARPEN_THRESHOLD)?
    } else {
        gaussian_blur(&image, blur_radius(config.sharpness))?
    };

    image = adjust_contrast(&image, config.contrast.min(EnhanceConfig::MAX_TONE_FACTOR))?;
    image = adjust_saturation(&image, config.saturation.min(EnhanceConfig::MAX_TONE_FACTOR))?;

    if let Some((new_w, new_h)) = upscale {
        image = resize(&image, new_w, new_h, Interpolation::Lanczos)?;
        image = unsharp_mask(
            &image,
            SHARPEN_RADIUS,
            UPSCALE_SHARPEN_PERCENT,
            SHARPEN_THRESHOLD,
        )?;
    }

    Ok(image)
}

/// `floor(size * factor)`; saturates instead of wrapping.
fn upscaled_size((w, h): (usize, usize), factor: f32) -> (usize, usize) {
    (
        (w as f64 * factor as f64).floor() as usize,
        (h as f64 * factor as f64).floor() as usize,
    )
}

/// Unsharp percent for `sharpness >= 1`, truncated.
pub(crate) fn sharpen_percent(sharpness: f32) -> u32 {
    (sharpness * 80.0).min(MAX_SHARPEN_PERCENT) as u32
}

/// Blur radius for `sharpness < 1`.
pub(crate) fn blur_radius(sharpness: f32) -> f32 {
    ((1.0 - sharpness) * 5.0).clamp(0.0, MAX_BLUR_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn checker(width: usize, height: usize) -> RasterImage {
        RasterImage::from_fn(width, height, |x, y| {
            if (x / 2 + y / 2) % 2 == 0 {
                Rgb::new(40, 60, 80)
            } else {
                Rgb::new(200, 180, 160)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_sharpen_percent_mapping() {
        assert_eq!(sharpen_percent(1.0), 80);
        assert_eq!(sharpen_percent(1.5), 120);
        assert_eq!(sharpen_percent(3.0), 150);
    }

    #[test]
    fn test_blur_radius_mapping() {
        assert!((blur_radius(0.1) - 4.5).abs() < 1e-5);
        assert!((blur_radius(0.9) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_unit_sharpness_still_sharpens() {
        let src = checker(12, 12);
        let config = EnhanceConfig::new()
            .sharpness(1.0)
            .contrast(1.0)
            .saturation(1.0)
            .denoise(false);
        let out = enhance_quality(&src, &config).unwrap();
        assert_eq!(out.dimensions(), src.dimensions());
        assert_ne!(out, src);
    }

    #[test]
    fn test_blur_branch_softens_edges() {
        let src = checker(16, 16);
        let config = EnhanceConfig::new()
            .sharpness(0.1)
            .contrast(1.0)
            .saturation(1.0)
            .denoise(false);
        let out = enhance_quality(&src, &config).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
        assert!(out.distinct_colors() > src.distinct_colors());
    }

    #[test]
    fn test_upscale_ignored_at_or_below_one() {
        let src = checker(10, 8);
        for factor in [0.5, 1.0] {
            let config = EnhanceConfig::new().upscale_factor(Some(factor));
            let out = enhance_quality(&src, &config).unwrap();
            assert_eq!(out.dimensions(), (10, 8));
        }
    }

    #[test]
    fn test_upscale_floors_size() {
        let src = checker(10, 7);
        let config = EnhanceConfig::new().upscale_factor(Some(1.5));
        let out = enhance_quality(&src, &config).unwrap();
        assert_eq!(out.dimensions(), (15, 10));
    }

    #[test]
    fn test_tone_factors_are_capped() {
        let src = checker(8, 8);
        let base = EnhanceConfig::new().denoise(false).sharpness(1.0);
        let capped = enhance_quality(&src, &base.clone().contrast(1.3).saturation(1.3)).unwrap();
        let over = enhance_quality(&src, &base.contrast(5.0).saturation(5.0)).unwrap();
        assert_eq!(capped, over);
    }

    #[test]
    fn test_huge_upscale_is_error_not_abort() {
        let src = checker(10, 10);
        for factor in [1e5, 1e9, f32::MAX] {
            let config = EnhanceConfig::new().upscale_factor(Some(factor));
            assert!(
                matches!(
                    enhance_quality(&src, &config),
                    Err(PipelineError::ImageTooLarge { stage: "upscale", .. })
                ),
                "factor {factor}"
            );
        }
    }

    #[test]
    fn test_invalid_sharpness() {
        let src = checker(4, 4);
        let config = EnhanceConfig::new().sharpness(0.0);
        assert!(matches!(
            enhance_quality(&src, &config),
            Err(PipelineError::InvalidParameter { name: "sharpness", .. })
        ));
    }
}
