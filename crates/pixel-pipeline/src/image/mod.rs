//! Raster image buffer shared by both pipelines.

mod raster;

pub(crate) use raster::checked_len;
pub use raster::{RasterImage, MAX_PIXELS};
