//! The two end-to-end pipelines and their configuration records.
//!
//! - [`convert_to_pixel_art`]: grid downscale, optional palette reduction,
//!   nearest-neighbour blow-up
//! - [`enhance_quality`]: denoise, sharpen or soften, tone, optional upscale
//!
//! Each call is synchronous, owns its intermediate buffers, and leaves the
//! source untouched.

mod enhance;
mod options;
mod pixel_art;

pub use enhance::enhance_quality;
pub use options::{EnhanceConfig, PixelArtConfig};
pub use pixel_art::convert_to_pixel_art;
