//! Pixelsmith
//!
//! Pixel-art conversion and image quality enhancement for image files.
//! The image processing itself lives in the `pixel-pipeline` crate; this
//! crate adds file codecs, batch configuration, and the conversion services
//! used by the CLI. Modules are public for integration testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
