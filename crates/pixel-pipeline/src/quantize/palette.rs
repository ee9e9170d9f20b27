//! Palette of representative colors with nearest-color lookup.

use std::collections::{HashMap, HashSet};

use crate::api::PipelineError;
use crate::color::Rgb;
use crate::image::RasterImage;

/// Largest palette an [`IndexedImage`](super::IndexedImage) can address.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered set of distinct colors.
///
/// Palettes are produced by [`median_cut`](super::median_cut) or taken
/// verbatim from an image that already has few colors. Lookup uses squared
/// Euclidean distance in RGB; ties resolve to the lower index.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(30, 40, 20)), 0);
/// assert_eq!(palette.nearest(Rgb::new(200, 210, 190)), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette, dropping repeated colors (first occurrence wins).
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidColorCount`] if no colors remain or more than
    /// [`MAX_PALETTE_SIZE`] distinct colors are given.
    pub fn new(colors: &[Rgb]) -> Result<Self, PipelineError> {
        let mut seen = HashSet::with_capacity(colors.len());
        let colors: Vec<Rgb> = colors.iter().copied().filter(|c| seen.insert(*c)).collect();
        if colors.is_empty() || colors.len() > MAX_PALETTE_SIZE {
            return Err(PipelineError::InvalidColorCount(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Exact palette of an image with at most `max_colors` distinct colors,
    /// sorted by color value. `None` if the image has more.
    pub fn from_image_colors(image: &RasterImage, max_colors: usize) -> Option<Self> {
        let max_colors = max_colors.min(MAX_PALETTE_SIZE);
        let mut seen = HashSet::new();
        for pixel in image.pixels() {
            if seen.insert(pixel) && seen.len() > max_colors {
                return None;
            }
        }
        let mut colors: Vec<Rgb> = seen.into_iter().collect();
        colors.sort_unstable();
        Some(Self { colors })
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: construction rejects empty palettes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The palette colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    /// Index of the palette entry closest to `color`.
    pub fn nearest(&self, color: Rgb) -> u8 {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = entry.distance_sq(color);
            if dist < best_dist {
                best = i;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        best as u8
    }

    /// Map every pixel to its nearest palette index.
    pub fn index_pixels(&self, image: &RasterImage) -> Vec<u8> {
        let mut cache: HashMap<Rgb, u8> = HashMap::new();
        image
            .pixels()
            .map(|p| *cache.entry(p).or_insert_with(|| self.nearest(p)))
            .collect()
    }

    /// Replace every pixel with its nearest palette color.
    pub fn remap(&self, image: &RasterImage) -> RasterImage {
        let mut cache: HashMap<Rgb, Rgb> = HashMap::new();
        image.map_pixels(|p| {
            *cache
                .entry(p)
                .or_insert_with(|| self.colors[self.nearest(p) as usize])
        })
    }
}
