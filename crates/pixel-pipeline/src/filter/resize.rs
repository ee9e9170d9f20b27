//! Resampling with selectable interpolation.
//!
//! Nearest-neighbour copies source pixels verbatim using exact integer
//! index arithmetic, so block boundaries never drift with float rounding.
//! The other three methods go through `imageops::resize`, whose separable
//! kernels widen with the scale factor when downsampling.

use std::fmt;
use std::str::FromStr;

use ::image::imageops::{self, FilterType};

use crate::api::{ParseInterpolationError, PipelineError};
use crate::image::{checked_len, RasterImage};

/// Resampling method.
///
/// # Example
///
/// ```
/// use pixel_pipeline::Interpolation;
///
/// let method: Interpolation = "Lanczos".parse().unwrap();
/// assert_eq!(method, Interpolation::Lanczos);
/// assert_eq!(method.to_string(), "lanczos");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Pixel replication, no blending. Mandatory for the pixelation steps.
    Nearest,
    /// Triangle filter, support 1.
    Bilinear,
    /// Cubic convolution (a = -0.5), support 2.
    #[default]
    Bicubic,
    /// Windowed sinc (a = 3), support 3.
    Lanczos,
}

impl Interpolation {
    /// All methods, in ascending quality order.
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::Lanczos,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::Lanczos => "lanczos",
        }
    }

    /// Matching `imageops` kernel for the smooth methods.
    fn filter_type(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = ParseInterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Interpolation::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseInterpolationError(name.to_string()))
    }
}

/// Resample `image` to `width x height`.
///
/// # Errors
///
/// - [`PipelineError::InvalidDimension`] if `width` or `height` is zero
/// - [`PipelineError::ImageTooLarge`] above [`MAX_PIXELS`](crate::MAX_PIXELS)
///
/// # Example
///
/// ```
/// use pixel_pipeline::{resize, Interpolation, RasterImage, Rgb};
///
/// let img = RasterImage::from_fn(2, 1, |x, _| Rgb::new(x as u8 * 200, 0, 0)).unwrap();
/// let big = resize(&img, 4, 2, Interpolation::Nearest).unwrap();
/// assert_eq!(big.pixel(1, 1), Rgb::new(0, 0, 0));
/// assert_eq!(big.pixel(2, 0), Rgb::new(200, 0, 0));
/// ```
pub fn resize(
    image: &RasterImage,
    width: usize,
    height: usize,
    method: Interpolation,
) -> Result<RasterImage, PipelineError> {
    let len = checked_len("resize", width, height)?;
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    match method {
        Interpolation::Nearest => resize_nearest(image, width, height, len),
        _ => {
            let resized = imageops::resize(
                &image.as_view()?,
                width as u32,
                height as u32,
                method.filter_type(),
            );
            RasterImage::from_rgb_image(resized)
        }
    }
}

/// Source index for nearest-neighbour sampling: `floor((i + 0.5) * in / out)`.
#[inline]
fn nearest_index(i: usize, in_size: usize, out_size: usize) -> usize {
    ((2 * i + 1) * in_size / (2 * out_size)).min(in_size - 1)
}

fn resize_nearest(
    image: &RasterImage,
    width: usize,
    height: usize,
    len: usize,
) -> Result<RasterImage, PipelineError> {
    let (in_w, in_h) = image.dimensions();
    let src = image.as_bytes();
    let columns: Vec<usize> = (0..width).map(|x| nearest_index(x, in_w, width)).collect();

    let mut data = Vec::with_capacity(len);
    for y in 0..height {
        let row = nearest_index(y, in_h, height) * in_w;
        for &sx in &columns {
            let i = (row + sx) * 3;
            data.extend_from_slice(&src[i..i + 3]);
        }
    }
    RasterImage::new(width, height, data)
}
