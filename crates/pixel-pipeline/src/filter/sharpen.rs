//! Unsharp-mask sharpening.

use crate::api::PipelineError;
use crate::color::clamp_u8;
use crate::image::RasterImage;

use super::blur::gaussian_blur;

/// Sharpen `image` by amplifying its difference from a blurred copy.
///
/// For each channel, `diff = original - blurred`. Where `|diff|` exceeds
/// `threshold` the output is `original + diff * percent / 100`; below it the
/// original value is kept, so flat regions and low-level noise pass through.
///
/// # Arguments
/// * `radius` - Standard deviation of the blur, in pixels
/// * `percent` - Strength of the amplification (100 = add the full difference)
/// * `threshold` - Minimum per-channel difference that gets sharpened
///
/// # Example
///
/// ```
/// use pixel_pipeline::{unsharp_mask, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(6, 1, |x, _| {
///     if x < 3 { Rgb::new(100, 100, 100) } else { Rgb::new(150, 150, 150) }
/// }).unwrap();
/// let sharp = unsharp_mask(&img, 1.0, 100, 3).unwrap();
/// assert!(sharp.pixel(2, 0).0[0] < 100);
/// assert!(sharp.pixel(3, 0).0[0] > 150);
/// ```
pub fn unsharp_mask(
    image: &RasterImage,
    radius: f32,
    percent: u32,
    threshold: u8,
) -> Result<RasterImage, PipelineError> {
    let blurred = gaussian_blur(image, radius)?;
    let amount = percent as f32 / 100.0;
    let threshold = threshold as i16;

    let data: Vec<u8> = image
        .as_bytes()
        .iter()
        .zip(blurred.as_bytes())
        .map(|(&orig, &blur)| {
            let diff = orig as i16 - blur as i16;
            if diff.abs() > threshold {
                clamp_u8(orig as f32 + diff as f32 * amount)
            } else {
                orig
            }
        })
        .collect();
    RasterImage::new(image.width(), image.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_flat_image_unchanged() {
        let img = RasterImage::filled(8, 8, Rgb::new(90, 120, 30)).unwrap();
        assert_eq!(unsharp_mask(&img, 1.0, 150, 1).unwrap(), img);
    }

    #[test]
    fn test_zero_percent_is_identity() {
        let img = RasterImage::from_fn(8, 8, |x, y| Rgb::new((x * 30) as u8, (y * 30) as u8, 9)).unwrap();
        assert_eq!(unsharp_mask(&img, 1.0, 0, 0).unwrap(), img);
    }

    #[test]
    fn test_threshold_suppresses_small_differences() {
        // A 2-level step whose blur difference stays below the threshold
        let img = RasterImage::from_fn(6, 1, |x, _| {
            if x < 3 {
                Rgb::new(100, 100, 100)
            } else {
                Rgb::new(102, 102, 102)
            }
        })
        .unwrap();
        assert_eq!(unsharp_mask(&img, 1.0, 150, 3).unwrap(), img);
    }

    #[test]
    fn test_sharpening_increases_edge_contrast() {
        let img = RasterImage::from_fn(10, 3, |x, _| {
            if x < 5 {
                Rgb::new(60, 60, 60)
            } else {
                Rgb::new(180, 180, 180)
            }
        })
        .unwrap();
        let out = unsharp_mask(&img, 1.0, 50, 3).unwrap();
        let dark = out.pixel(4, 1).0[0];
        let light = out.pixel(5, 1).0[0];
        assert!(dark < 60, "dark side should undershoot, got {dark}");
        assert!(light > 180, "light side should overshoot, got {light}");
        // Far from the edge nothing changes
        assert_eq!(out.pixel(0, 1), Rgb::new(60, 60, 60));
        assert_eq!(out.pixel(9, 1), Rgb::new(180, 180, 180));
    }
}
