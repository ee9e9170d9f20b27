//! Palette-indexed image representation.

use crate::api::PipelineError;
use crate::image::RasterImage;

use super::palette::{Palette, MAX_PALETTE_SIZE};

/// An image stored as one palette index per pixel.
///
/// This is the natural input for indexed PNG encoding: each index is in
/// `0..palette.len()` and the palette has at most 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    /// Palette indices, row-major.
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Create an indexed image.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index addresses the palette.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height
        );
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Index an image that already has at most 256 distinct colors.
    ///
    /// Returns `None` when the image has more colors than an indexed
    /// image can hold.
    ///
    /// # Example
    ///
    /// ```
    /// use pixel_pipeline::{IndexedImage, RasterImage, Rgb};
    ///
    /// let img = RasterImage::from_fn(4, 4, |x, _| {
    ///     if x < 2 { Rgb::new(0, 0, 0) } else { Rgb::new(255, 0, 0) }
    /// }).unwrap();
    /// let indexed = IndexedImage::from_raster(&img).unwrap();
    /// assert_eq!(indexed.palette().len(), 2);
    /// assert_eq!(indexed.to_raster().unwrap(), img);
    /// ```
    pub fn from_raster(image: &RasterImage) -> Option<Self> {
        let palette = Palette::from_image_colors(image, MAX_PALETTE_SIZE)?;
        let indices = palette.index_pixels(image);
        Some(Self::new(indices, image.width(), image.height(), palette))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index at `(x, y)`.
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width + x]
    }

    /// Expand back to full RGB.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidDimension`] if the image was built with a
    /// zero dimension.
    pub fn to_raster(&self) -> Result<RasterImage, PipelineError> {
        RasterImage::from_fn(self.width, self.height, |x, y| {
            self.palette.get(self.index_at(x, y) as usize)
        })
    }
}
