//! Configuration records for the two pipelines.
//!
//! Both records are plain values passed per call. Defaults match the
//! command-line tool's defaults.

use crate::api::PipelineError;
use crate::filter::Interpolation;
use crate::quantize::{MAX_PALETTE_SIZE, MIN_COLOR_COUNT};

/// Options for [`convert_to_pixel_art`](super::convert_to_pixel_art).
///
/// # Defaults
///
/// - Grid width: 64 cells
/// - Scale factor: `None` (final output has the source dimensions)
/// - Colors: 128
/// - Preserve aspect: enabled
/// - Enhance mode: enabled
/// - Interpolation: [`Interpolation::Bicubic`]
///
/// # Example
///
/// ```
/// use pixel_pipeline::{Interpolation, PixelArtConfig};
///
/// let config = PixelArtConfig::new()
///     .target_pixel_width(32)
///     .color_count(Some(16))
///     .interpolation(Interpolation::Lanczos);
/// assert_eq!(config.target_pixel_width, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArtConfig {
    /// Width of the pixel-art grid in cells.
    pub target_pixel_width: usize,

    /// Multiplier applied to the source dimensions for the final output.
    pub scale_factor: Option<f32>,

    /// Palette size, or `None` to skip quantization.
    pub color_count: Option<usize>,

    /// Derive the grid height from the source aspect ratio. When disabled
    /// the grid is square.
    pub preserve_aspect: bool,

    /// Enable pre-smoothing, two-step downscale, sharpening, contrast
    /// touch-ups and the final median pass.
    pub enhance_mode: bool,

    /// Filter for the smoothing and first downscale steps.
    pub interpolation: Interpolation,
}

impl Default for PixelArtConfig {
    fn default() -> Self {
        Self {
            target_pixel_width: 64,
            scale_factor: None,
            color_count: Some(128),
            preserve_aspect: true,
            enhance_mode: true,
            interpolation: Interpolation::Bicubic,
        }
    }
}

impl PixelArtConfig {
    /// Same as `PixelArtConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_pixel_width(mut self, width: usize) -> Self {
        self.target_pixel_width = width;
        self
    }

    pub fn scale_factor(mut self, factor: Option<f32>) -> Self {
        self.scale_factor = factor;
        self
    }

    pub fn color_count(mut self, count: Option<usize>) -> Self {
        self.color_count = count;
        self
    }

    pub fn preserve_aspect(mut self, enabled: bool) -> Self {
        self.preserve_aspect = enabled;
        self
    }

    pub fn enhance_mode(mut self, enabled: bool) -> Self {
        self.enhance_mode = enabled;
        self
    }

    pub fn interpolation(mut self, method: Interpolation) -> Self {
        self.interpolation = method;
        self
    }

    /// Pixel-grid dimensions for a `src_w x src_h` source.
    ///
    /// With `preserve_aspect` the height is `round(width * src_h / src_w)`,
    /// otherwise the grid is square.
    pub fn grid_size(&self, src_w: usize, src_h: usize) -> (usize, usize) {
        let grid_w = self.target_pixel_width;
        let grid_h = if self.preserve_aspect && src_w > 0 {
            (grid_w as f64 * src_h as f64 / src_w as f64).round() as usize
        } else {
            grid_w
        };
        (grid_w, grid_h)
    }

    /// Final output dimensions: the source size times `scale_factor`,
    /// floored, or the source size when no factor is set.
    pub fn output_size(&self, src_w: usize, src_h: usize) -> (usize, usize) {
        match self.scale_factor {
            Some(factor) => (
                (src_w as f64 * factor as f64).floor() as usize,
                (src_h as f64 * factor as f64).floor() as usize,
            ),
            None => (src_w, src_h),
        }
    }

    /// Check value ranges without touching any image.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidDimension`] for a zero grid width
    /// - [`PipelineError::InvalidParameter`] for a non-positive or
    ///   non-finite scale factor
    /// - [`PipelineError::InvalidColorCount`] for a color count outside `2..=256`
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.target_pixel_width == 0 {
            return Err(PipelineError::dimension("pixel grid", 0, 0));
        }
        if let Some(scale) = self.scale_factor {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(PipelineError::InvalidParameter {
                    name: "scale factor",
                    value: scale,
                });
            }
        }
        if let Some(count) = self.color_count {
            if !(MIN_COLOR_COUNT..=MAX_PALETTE_SIZE).contains(&count) {
                return Err(PipelineError::InvalidColorCount(count));
            }
        }
        Ok(())
    }
}

/// Options for [`enhance_quality`](super::enhance_quality).
///
/// # Defaults
///
/// - Sharpness: 1.5 (values below 1.0 blur instead)
/// - Contrast: 1.1
/// - Saturation: 1.05
/// - Denoise: enabled
/// - Upscale: `None`
///
/// Contrast and saturation are capped at [`EnhanceConfig::MAX_TONE_FACTOR`]
/// when applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhanceConfig {
    pub sharpness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub denoise: bool,
    /// Lanczos upscale factor. Factors of 1.0 or less are ignored.
    pub upscale_factor: Option<f32>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            sharpness: 1.5,
            contrast: 1.1,
            saturation: 1.05,
            denoise: true,
            upscale_factor: None,
        }
    }
}

impl EnhanceConfig {
    /// Upper bound for applied contrast and saturation.
    pub const MAX_TONE_FACTOR: f32 = 1.3;

    /// Same as `EnhanceConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sharpness(mut self, sharpness: f32) -> Self {
        self.sharpness = sharpness;
        self
    }

    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = contrast;
        self
    }

    pub fn saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    pub fn denoise(mut self, enabled: bool) -> Self {
        self.denoise = enabled;
        self
    }

    pub fn upscale_factor(mut self, factor: Option<f32>) -> Self {
        self.upscale_factor = factor;
        self
    }

    /// # Errors
    ///
    /// [`PipelineError::InvalidParameter`] if sharpness is not positive or
    /// any factor is not finite.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.sharpness.is_finite() || self.sharpness <= 0.0 {
            return Err(PipelineError::InvalidParameter {
                name: "sharpness",
                value: self.sharpness,
            });
        }
        for (name, value) in [("contrast", self.contrast), ("saturation", self.saturation)] {
            if !value.is_finite() {
                return Err(PipelineError::InvalidParameter { name, value });
            }
        }
        if let Some(factor) = self.upscale_factor {
            if !factor.is_finite() {
                return Err(PipelineError::InvalidParameter {
                    name: "upscale factor",
                    value: factor,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_art_defaults() {
        let config = PixelArtConfig::default();
        assert_eq!(config.target_pixel_width, 64);
        assert_eq!(config.scale_factor, None);
        assert_eq!(config.color_count, Some(128));
        assert!(config.preserve_aspect);
        assert!(config.enhance_mode);
        assert_eq!(config.interpolation, Interpolation::Bicubic);
    }

    #[test]
    fn test_grid_size_rounds_height() {
        let config = PixelArtConfig::new().target_pixel_width(64);
        assert_eq!(config.grid_size(800, 600), (64, 48));
        // 64 * 333 / 500 = 42.624
        assert_eq!(config.grid_size(500, 333), (64, 43));
        let square = config.preserve_aspect(false);
        assert_eq!(square.grid_size(800, 600), (64, 64));
    }

    #[test]
    fn test_output_size_floors() {
        let config = PixelArtConfig::new();
        assert_eq!(config.output_size(100, 75), (100, 75));
        let half = config.scale_factor(Some(0.5));
        assert_eq!(half.output_size(100, 75), (50, 37));
        let odd = PixelArtConfig::new().scale_factor(Some(2.55));
        assert_eq!(odd.output_size(10, 10), (25, 25));
    }

    #[test]
    fn test_enhance_defaults() {
        let config = EnhanceConfig::new();
        assert_eq!(config.sharpness, 1.5);
        assert_eq!(config.contrast, 1.1);
        assert_eq!(config.saturation, 1.05);
        assert!(config.denoise);
        assert_eq!(config.upscale_factor, None);
    }

    #[test]
    fn test_pixel_art_validation() {
        assert!(PixelArtConfig::new().target_pixel_width(0).validate().is_err());
        assert!(PixelArtConfig::new()
            .scale_factor(Some(0.0))
            .validate()
            .is_err());
        assert!(PixelArtConfig::new()
            .scale_factor(Some(f32::NAN))
            .validate()
            .is_err());
        assert_eq!(
            PixelArtConfig::new().color_count(Some(1)).validate(),
            Err(PipelineError::InvalidColorCount(1))
        );
        assert!(PixelArtConfig::new().color_count(None).validate().is_ok());
    }

    #[test]
    fn test_enhance_validation() {
        assert!(EnhanceConfig::new().sharpness(0.0).validate().is_err());
        assert!(EnhanceConfig::new().sharpness(-1.0).validate().is_err());
        assert!(EnhanceConfig::new()
            .contrast(f32::INFINITY)
            .validate()
            .is_err());
        assert!(EnhanceConfig::new()
            .upscale_factor(Some(0.5))
            .validate()
            .is_ok());
    }
}
