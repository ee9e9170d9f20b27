//! Gaussian blur.

use ::image::imageops;

use crate::api::PipelineError;
use crate::image::RasterImage;

/// Blur `image` with a gaussian of standard deviation `radius` pixels.
///
/// Delegates to `imageops::blur`, which clamps samples at the edges. A
/// non-positive radius returns an unchanged copy.
///
/// # Errors
///
/// [`PipelineError::InvalidParameter`] if `radius` is not finite.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{gaussian_blur, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(9, 1, |x, _| {
///     if x == 4 { Rgb::new(255, 255, 255) } else { Rgb::new(0, 0, 0) }
/// }).unwrap();
/// let blurred = gaussian_blur(&img, 1.0).unwrap();
/// assert!(blurred.pixel(4, 0).0[0] < 255);
/// assert!(blurred.pixel(3, 0).0[0] > 0);
/// ```
pub fn gaussian_blur(image: &RasterImage, radius: f32) -> Result<RasterImage, PipelineError> {
    if !radius.is_finite() {
        return Err(PipelineError::InvalidParameter {
            name: "blur radius",
            value: radius,
        });
    }
    if radius <= 0.0 {
        return Ok(image.clone());
    }

    RasterImage::from_rgb_image(imageops::blur(&image.as_view()?, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_zero_radius_is_identity() {
        let img = RasterImage::from_fn(5, 5, |x, y| Rgb::new(x as u8 * 40, y as u8 * 40, 3)).unwrap();
        assert_eq!(gaussian_blur(&img, 0.0).unwrap(), img);
    }

    #[test]
    fn test_flat_image_unchanged() {
        let img = RasterImage::filled(6, 4, Rgb::new(12, 200, 77)).unwrap();
        let out = gaussian_blur(&img, 2.5).unwrap();
        for (a, b) in out.as_bytes().iter().zip(img.as_bytes()) {
            assert!(a.abs_diff(*b) <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn test_blur_reduces_edge_contrast() {
        let img = RasterImage::from_fn(20, 1, |x, _| {
            if x < 10 {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(255, 255, 255)
            }
        })
        .unwrap();
        let out = gaussian_blur(&img, 4.5).unwrap();
        let left = out.pixel(9, 0).0[0];
        let right = out.pixel(10, 0).0[0];
        assert!(left > 60 && left < 128, "left of edge: {left}");
        assert!(right > 128 && right < 195, "right of edge: {right}");
    }

    #[test]
    fn test_blur_is_symmetric_around_a_spike() {
        let img = RasterImage::from_fn(15, 1, |x, _| {
            if x == 7 {
                Rgb::new(255, 255, 255)
            } else {
                Rgb::new(0, 0, 0)
            }
        })
        .unwrap();
        let out = gaussian_blur(&img, 1.5).unwrap();
        for d in 1..=5 {
            let (l, r) = (out.pixel(7 - d, 0).0[0], out.pixel(7 + d, 0).0[0]);
            assert!(l.abs_diff(r) <= 1, "offset {d}: {l} vs {r}");
        }
        assert!(out.pixel(6, 0).0[0] > out.pixel(5, 0).0[0]);
    }

    #[test]
    fn test_rejects_nan_radius() {
        let img = RasterImage::filled(2, 2, Rgb::default()).unwrap();
        assert!(gaussian_blur(&img, f32::NAN).is_err());
    }
}
