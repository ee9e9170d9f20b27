//! Owned RGB8 raster.

use std::collections::HashSet;

use crate::api::PipelineError;
use crate::color::Rgb;
use crate::filter::{resize, Interpolation};

/// Largest raster any stage will allocate (16384 x 16384).
pub const MAX_PIXELS: usize = 1 << 28;

/// Byte length of a `width x height` RGB8 buffer.
///
/// Rejects zero-area sizes and sizes over [`MAX_PIXELS`] before anything
/// is allocated.
pub(crate) fn checked_len(
    stage: &'static str,
    width: usize,
    height: usize,
) -> Result<usize, PipelineError> {
    if width == 0 || height == 0 {
        return Err(PipelineError::dimension(stage, width, height));
    }
    match width.checked_mul(height) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok(pixels * 3),
        _ => Err(PipelineError::ImageTooLarge {
            stage,
            width,
            height,
        }),
    }
}

/// An in-memory RGB raster with 8 bits per channel.
///
/// Pixels are stored row-major as `R, G, B` triples. Construction checks the
/// invariants `width > 0`, `height > 0` and `data.len() == width * height * 3`,
/// so every `RasterImage` in circulation is non-empty and well-formed.
///
/// Filters never mutate a raster in place: each one borrows its input and
/// returns a freshly owned result.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{RasterImage, Rgb};
///
/// let img = RasterImage::filled(4, 2, Rgb::new(10, 20, 30)).unwrap();
/// assert_eq!(img.dimensions(), (4, 2));
/// assert_eq!(img.pixel(3, 1), Rgb::new(10, 20, 30));
/// assert_eq!(img.as_bytes().len(), 4 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a raw RGB8 buffer.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidDimension`] if either dimension is zero
    /// - [`PipelineError::ImageTooLarge`] above [`MAX_PIXELS`]
    /// - [`PipelineError::BufferSize`] if `data.len() != width * height * 3`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, PipelineError> {
        let expected = checked_len("raster", width, height)?;
        if data.len() != expected {
            return Err(PipelineError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a raster where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, PipelineError> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Create a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, PipelineError>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut data = Vec::with_capacity(checked_len("raster", width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).0);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a raster from row-major pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: &[Rgb]) -> Result<Self, PipelineError> {
        let data = pixels.iter().flat_map(|p| p.0).collect();
        Self::new(width, height, data)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw RGB8 bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the raster and return its buffer.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} raster",
            x,
            y,
            self.width,
            self.height
        );
        let i = (y * self.width + x) * 3;
        Rgb([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Pixel at `(x, y)` with coordinates clamped to the nearest edge.
    #[inline]
    pub fn pixel_clamped(&self, x: isize, y: isize) -> Rgb {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        let i = (y * self.width + x) * 3;
        Rgb([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|c| Rgb([c[0], c[1], c[2]]))
    }

    /// Return a new raster with every pixel passed through `f`.
    pub fn map_pixels<F>(&self, mut f: F) -> RasterImage
    where
        F: FnMut(Rgb) -> Rgb,
    {
        let data = self.pixels().flat_map(|p| f(p).0).collect();
        RasterImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Copy out the `width x height` region whose top-left corner is `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidDimension`] if the region is empty or extends
    /// past the raster edge.
    ///
    /// ```
    /// use pixel_pipeline::{RasterImage, Rgb};
    ///
    /// let img = RasterImage::from_fn(4, 4, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
    /// let part = img.crop(1, 2, 2, 2).unwrap();
    /// assert_eq!(part.pixel(0, 0), Rgb::new(1, 2, 0));
    /// assert!(img.crop(3, 3, 2, 2).is_err());
    /// ```
    pub fn crop(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<RasterImage, PipelineError> {
        let past_edge = |start: usize, len: usize, limit: usize| {
            start.checked_add(len).map_or(true, |end| end > limit)
        };
        if width == 0
            || height == 0
            || past_edge(x, width, self.width)
            || past_edge(y, height, self.height)
        {
            return Err(PipelineError::dimension("crop", width, height));
        }
        let mut data = Vec::with_capacity(width * height * 3);
        for row in y..y + height {
            let start = (row * self.width + x) * 3;
            data.extend_from_slice(&self.data[start..start + width * 3]);
        }
        Ok(RasterImage {
            width,
            height,
            data,
        })
    }

    /// Resample to `width x height`; see [`resize`].
    #[inline]
    pub fn resize(
        &self,
        width: usize,
        height: usize,
        method: Interpolation,
    ) -> Result<RasterImage, PipelineError> {
        resize(self, width, height, method)
    }

    /// Number of distinct colors in the raster.
    pub fn distinct_colors(&self) -> usize {
        self.color_set().len()
    }

    /// Set of distinct colors in the raster.
    pub fn color_set(&self) -> HashSet<Rgb> {
        self.pixels().collect()
    }

    /// Borrow the buffer as an `image` crate view for `imageops`.
    pub(crate) fn as_view(
        &self,
    ) -> Result<::image::ImageBuffer<::image::Rgb<u8>, &[u8]>, PipelineError> {
        let too_large = || PipelineError::ImageTooLarge {
            stage: "image view",
            width: self.width,
            height: self.height,
        };
        let width = u32::try_from(self.width).map_err(|_| too_large())?;
        let height = u32::try_from(self.height).map_err(|_| too_large())?;
        ::image::ImageBuffer::from_raw(width, height, self.data.as_slice()).ok_or_else(|| {
            PipelineError::BufferSize {
                expected: self.width * self.height * 3,
                actual: self.data.len(),
            }
        })
    }

    /// Take ownership of an `imageops` result.
    pub(crate) fn from_rgb_image(image: ::image::RgbImage) -> Result<Self, PipelineError> {
        let (width, height) = image.dimensions();
        Self::new(width as usize, height as usize, image.into_raw())
    }
}
