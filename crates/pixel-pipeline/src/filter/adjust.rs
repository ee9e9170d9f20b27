//! Contrast and saturation adjustment.
//!
//! Both adjustments blend each pixel with a neutral reference and then scale
//! the deviation from it by `factor`:
//!
//! - **Contrast**: the reference is a flat grey at the image's mean luma.
//! - **Saturation**: the reference is each pixel's own luma (its grey twin).
//!
//! `factor = 1.0` is the identity, `0.0` collapses to the reference, and
//! values above 1.0 push away from it.

use crate::api::PipelineError;
use crate::color::Rgb;
use crate::image::RasterImage;

fn check_factor(name: &'static str, factor: f32) -> Result<(), PipelineError> {
    if factor.is_finite() {
        Ok(())
    } else {
        Err(PipelineError::InvalidParameter {
            name,
            value: factor,
        })
    }
}

#[inline]
fn is_identity(factor: f32) -> bool {
    (factor - 1.0).abs() <= f32::EPSILON
}

/// Mean Rec.601 luma of the image, rounded to an integer level.
fn mean_luma(image: &RasterImage) -> f32 {
    let total: f64 = image.pixels().map(|p| p.luma() as f64).sum();
    let count = (image.width() * image.height()) as f64;
    (total / count).round() as f32
}

/// Scale contrast around the image's mean luma.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `factor` is not finite.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{adjust_contrast, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(2, 1, |x, _| {
///     if x == 0 { Rgb::new(100, 100, 100) } else { Rgb::new(150, 150, 150) }
/// }).unwrap();
/// let out = adjust_contrast(&img, 2.0).unwrap();
/// assert_eq!(out.pixel(0, 0), Rgb::new(75, 75, 75));
/// assert_eq!(out.pixel(1, 0), Rgb::new(175, 175, 175));
/// ```
pub fn adjust_contrast(image: &RasterImage, factor: f32) -> Result<RasterImage, PipelineError> {
    check_factor("contrast", factor)?;
    if is_identity(factor) {
        return Ok(image.clone());
    }
    let mean = mean_luma(image);
    Ok(image.map_pixels(|p| {
        Rgb::from_f32_clamped(p.to_f32().map(|c| mean + (c - mean) * factor))
    }))
}

/// Scale saturation: each pixel moves away from (or toward) its own grey.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `factor` is not finite.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{adjust_saturation, RasterImage, Rgb};
///
/// let img = RasterImage::filled(1, 1, Rgb::new(200, 100, 50)).unwrap();
/// let grey = adjust_saturation(&img, 0.0).unwrap().pixel(0, 0);
/// assert_eq!(grey.0[0], grey.0[1]);
/// assert_eq!(grey.0[1], grey.0[2]);
/// ```
pub fn adjust_saturation(image: &RasterImage, factor: f32) -> Result<RasterImage, PipelineError> {
    check_factor("saturation", factor)?;
    if is_identity(factor) {
        return Ok(image.clone());
    }
    Ok(image.map_pixels(|p| {
        let luma = p.luma();
        Rgb::from_f32_clamped(p.to_f32().map(|c| luma + (c - luma) * factor))
    }))
}
