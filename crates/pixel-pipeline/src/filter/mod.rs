//! Filter primitives shared by both pipelines.
//!
//! Every primitive borrows its input raster and returns a new one:
//!
//! | Primitive | Purpose |
//! |-----------|---------|
//! | [`resize`] | Resampling with [`Interpolation`] (Nearest is exact replication) |
//! | [`gaussian_blur`] | Separable blur, used when sharpness < 1 |
//! | [`unsharp_mask`] | Edge enhancement before quantization and after upscaling |
//! | [`median_filter`] | Denoise and upscale-artifact removal |
//! | [`adjust_contrast`] / [`adjust_saturation`] | Luma-referenced tone adjustments |
//!
//! Color quantization lives in [`crate::quantize`].

mod adjust;
mod blur;
mod median;
mod resize;
mod sharpen;

pub use adjust::{adjust_contrast, adjust_saturation};
pub use blur::gaussian_blur;
pub use median::{median_filter, DEFAULT_MEDIAN_WINDOW};
pub use resize::{resize, Interpolation};
pub use sharpen::unsharp_mask;
