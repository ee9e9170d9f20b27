//! Public error types for the pixel-pipeline crate.

mod error;

pub use error::{ParseInterpolationError, PipelineError};
