#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! pixel-pipeline: pixel-art conversion and quality enhancement
//!
//! The crate works on owned 8-bit RGB rasters ([`RasterImage`]) and offers
//! two pipelines built from a small set of filter primitives. It has no
//! dependencies and does no I/O: decoding and encoding belong to the
//! caller.
//!
//! # Quick Start
//!
//! ```
//! use pixel_pipeline::{convert_to_pixel_art, PixelArtConfig, RasterImage, Rgb};
//!
//! let src = RasterImage::from_fn(160, 120, |x, y| {
//!     Rgb::new((x * 255 / 160) as u8, (y * 255 / 120) as u8, 64)
//! }).unwrap();
//!
//! let config = PixelArtConfig::new().target_pixel_width(16).color_count(Some(8));
//! let art = convert_to_pixel_art(&src, &config).unwrap();
//! assert_eq!(art.dimensions(), (160, 120));
//! assert!(art.distinct_colors() <= 8);
//! ```
//!
//! # Pipelines
//!
//! ```text
//! pixel art                           enhance
//! ---------                           -------
//! [smooth: half size and back,        [median 3x3]
//!  contrast 1.1, saturation 1.05]         |
//!     |                               sharpen (>= 1) or blur (< 1)
//! grid downscale (2x step if large)       |
//!     |                               contrast, saturation (<= 1.3)
//! [unsharp 1 / 50 / 3]                    |
//!     |                               [Lanczos upscale + unsharp]
//! [median-cut quantize, contrast 1.05]
//!     |
//! nearest-neighbour blow-up
//!     |
//! [median 3x3 when blocks are large]
//! ```
//!
//! Bracketed stages are optional and controlled by [`PixelArtConfig`] and
//! [`EnhanceConfig`].
//!
//! # Primitives
//!
//! The stages are public on their own: [`resize`], [`gaussian_blur`],
//! [`unsharp_mask`], [`median_filter`], [`adjust_contrast`],
//! [`adjust_saturation`], and [`quantize`].
//!
//! ```
//! use pixel_pipeline::{
//!     adjust_contrast, adjust_saturation, gaussian_blur, median_filter, resize, unsharp_mask,
//!     Interpolation, PipelineError, RasterImage, Rgb,
//! };
//!
//! let img = RasterImage::from_fn(8, 8, |x, y| Rgb::new(x as u8 * 30, y as u8 * 30, 0)).unwrap();
//!
//! let big = resize(&img, 16, 16, Interpolation::Nearest).unwrap();
//! assert_eq!(big.pixel(3, 3), img.pixel(1, 1));
//!
//! let soft = gaussian_blur(&img, 1.5).unwrap();
//! let crisp = unsharp_mask(&soft, 1.0, 80, 3).unwrap();
//! let clean = median_filter(&crisp, 3).unwrap();
//! assert_eq!(adjust_contrast(&clean, 1.0).unwrap(), clean);
//! assert_eq!(adjust_saturation(&clean, 1.0).unwrap(), clean);
//!
//! assert!(matches!(
//!     resize(&img, 0, 4, Interpolation::Bicubic),
//!     Err(PipelineError::InvalidDimension { .. })
//! ));
//! ```

pub mod api;
pub mod color;
pub mod filter;
pub mod image;
pub mod pipeline;
pub mod quantize;


pub use api::{ParseInterpolationError, PipelineError};
pub use color::Rgb;
pub use filter::{
    adjust_contrast, adjust_saturation, gaussian_blur, median_filter, resize, unsharp_mask,
    Interpolation, DEFAULT_MEDIAN_WINDOW,
};
pub use crate::image::{RasterImage, MAX_PIXELS};
pub use pipeline::{convert_to_pixel_art, enhance_quality, EnhanceConfig, PixelArtConfig};
pub use quantize::{
    median_cut, quantize, quantize_indexed, IndexedImage, Palette, MAX_PALETTE_SIZE,
    MIN_COLOR_COUNT,
};
