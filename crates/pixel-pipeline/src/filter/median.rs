//! Per-channel median filter.

use crate::api::PipelineError;
use crate::image::RasterImage;

/// Default window used by both pipelines.
pub const DEFAULT_MEDIAN_WINDOW: usize = 3;

/// Replace each pixel with the per-channel median of its `window x window`
/// neighbourhood. Pixels outside the raster are taken from the nearest edge.
///
/// # Errors
///
/// [`PipelineError::InvalidWindow`] if `window` is zero or even.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{median_filter, RasterImage, Rgb};
///
/// // A single hot pixel disappears
/// let img = RasterImage::from_fn(5, 5, |x, y| {
///     if (x, y) == (2, 2) { Rgb::new(255, 0, 0) } else { Rgb::new(10, 10, 10) }
/// }).unwrap();
/// let clean = median_filter(&img, 3).unwrap();
/// assert_eq!(clean.pixel(2, 2), Rgb::new(10, 10, 10));
/// ```
pub fn median_filter(image: &RasterImage, window: usize) -> Result<RasterImage, PipelineError> {
    if window == 0 || window % 2 == 0 {
        return Err(PipelineError::InvalidWindow(window));
    }
    if window == 1 {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let half = (window / 2) as isize;
    let area = window * window;
    let mid = area / 2;
    let mut channels: [Vec<u8>; 3] = [
        Vec::with_capacity(area),
        Vec::with_capacity(area),
        Vec::with_capacity(area),
    ];

    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height as isize {
        for x in 0..width as isize {
            channels.iter_mut().for_each(Vec::clear);
            for dy in -half..=half {
                for dx in -half..=half {
                    let p = image.pixel_clamped(x + dx, y + dy);
                    for c in 0..3 {
                        channels[c].push(p.0[c]);
                    }
                }
            }
            for values in channels.iter_mut() {
                let (_, median, _) = values.select_nth_unstable(mid);
                data.push(*median);
            }
        }
    }
    RasterImage::new(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_rejects_even_and_zero_windows() {
        let img = RasterImage::filled(3, 3, Rgb::default()).unwrap();
        assert_eq!(median_filter(&img, 0), Err(PipelineError::InvalidWindow(0)));
        assert_eq!(median_filter(&img, 4), Err(PipelineError::InvalidWindow(4)));
    }

    #[test]
    fn test_window_one_is_identity() {
        let img = RasterImage::from_fn(4, 3, |x, y| Rgb::new(x as u8, y as u8, 5)).unwrap();
        assert_eq!(median_filter(&img, 1).unwrap(), img);
    }

    #[test]
    fn test_channels_are_independent() {
        // Column of mixed pixels: median is taken per channel
        let img = RasterImage::from_fn(1, 3, |_, y| match y {
            0 => Rgb::new(10, 200, 0),
            1 => Rgb::new(20, 100, 50),
            _ => Rgb::new(30, 0, 100),
        })
        .unwrap();
        let out = median_filter(&img, 3).unwrap();
        // Centre window with edge replication: rows 0,1,2 each 3 times
        assert_eq!(out.pixel(0, 1), Rgb::new(20, 100, 50));
    }

    #[test]
    fn test_large_blocks_survive() {
        // Two 4-pixel-wide flat blocks: median keeps the boundary crisp
        let img = RasterImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(250, 250, 250)
            }
        })
        .unwrap();
        assert_eq!(median_filter(&img, 3).unwrap(), img);
    }
}
