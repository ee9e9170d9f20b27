//! Median-cut palette construction.
//!
//! The color histogram starts as one box. While there are fewer boxes than
//! requested colors, the box with the widest range along its dominant
//! channel is sorted on that channel and split at its pixel-weighted median.
//! Each final box contributes the pixel-weighted mean of its colors.

use std::collections::HashMap;

use crate::api::PipelineError;
use crate::color::Rgb;
use crate::image::RasterImage;

use super::palette::{Palette, MAX_PALETTE_SIZE};

/// A region of the color histogram: distinct colors with their pixel counts.
struct ColorBox {
    entries: Vec<(Rgb, u32)>,
}

impl ColorBox {
    /// Dominant channel and its value range.
    fn widest_channel(&self) -> (usize, u8) {
        let mut lo = [u8::MAX; 3];
        let mut hi = [u8::MIN; 3];
        for (color, _) in &self.entries {
            for c in 0..3 {
                lo[c] = lo[c].min(color.0[c]);
                hi[c] = hi[c].max(color.0[c]);
            }
        }
        (0..3)
            .map(|c| (c, hi[c] - lo[c]))
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }

    fn can_split(&self) -> bool {
        self.entries.len() > 1
    }

    /// Split at the pixel-weighted median of `channel`. Both halves are non-empty.
    fn split(mut self, channel: usize) -> (ColorBox, ColorBox) {
        self.entries
            .sort_unstable_by_key(|(color, _)| (color.0[channel], *color));

        let total: u64 = self.entries.iter().map(|(_, n)| *n as u64).sum();
        let half = total.div_ceil(2);
        let mut running = 0u64;
        let mut cut = self.entries.len() - 1;
        for (i, (_, n)) in self.entries.iter().enumerate() {
            running += *n as u64;
            if running >= half {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.entries.len() - 1);

        let upper = self.entries.split_off(cut);
        (self, ColorBox { entries: upper })
    }

    /// Pixel-weighted mean color.
    fn average(&self) -> Rgb {
        let mut sums = [0u64; 3];
        let mut total = 0u64;
        for (color, n) in &self.entries {
            for c in 0..3 {
                sums[c] += color.0[c] as u64 * *n as u64;
            }
            total += *n as u64;
        }
        Rgb(sums.map(|s| ((s + total / 2) / total) as u8))
    }
}

/// Pixel count per distinct color.
pub(crate) fn histogram(image: &RasterImage) -> HashMap<Rgb, u32> {
    let mut counts = HashMap::new();
    for pixel in image.pixels() {
        *counts.entry(pixel).or_insert(0u32) += 1;
    }
    counts
}

/// Build a palette of at most `max_colors` entries for `image`.
///
/// If the image already has no more than `max_colors` distinct colors, the
/// palette is exactly those colors.
///
/// # Errors
///
/// [`PipelineError::InvalidColorCount`] if `max_colors` is outside `2..=256`.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{median_cut, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(64, 1, |x, _| Rgb::new(x as u8 * 4, 0, 0)).unwrap();
/// let palette = median_cut(&img, 4).unwrap();
/// assert_eq!(palette.len(), 4);
/// ```
pub fn median_cut(image: &RasterImage, max_colors: usize) -> Result<Palette, PipelineError> {
    if !(2..=MAX_PALETTE_SIZE).contains(&max_colors) {
        return Err(PipelineError::InvalidColorCount(max_colors));
    }

    let counts = histogram(image);
    if counts.len() <= max_colors {
        let mut colors: Vec<Rgb> = counts.into_keys().collect();
        colors.sort_unstable();
        return Palette::new(&colors);
    }

    let mut entries: Vec<(Rgb, u32)> = counts.into_iter().collect();
    entries.sort_unstable();
    let mut boxes = vec![ColorBox { entries }];

    while boxes.len() < max_colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.can_split())
            .map(|(i, b)| (i, b.widest_channel()))
            .fold(None, |best: Option<(usize, (usize, u8))>, cur| match best {
                Some(b) if b.1 .1 >= cur.1 .1 => Some(b),
                _ => Some(cur),
            });
        let Some((index, (channel, _))) = candidate else {
            break;
        };
        let (lower, upper) = boxes.swap_remove(index).split(channel);
        boxes.push(lower);
        boxes.push(upper);
    }

    let colors: Vec<Rgb> = boxes.iter().map(ColorBox::average).collect();
    Palette::new(&colors)
}
