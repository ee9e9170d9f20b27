use std::path::PathBuf;

use pixel_pipeline::PipelineError;
use thiserror::Error;

/// Failure to turn a raster into output file bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Image dimensions {width}x{height} cannot be encoded")]
    Dimensions { width: usize, height: usize },

    #[error("PNG encode error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single file conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    #[error("Output directory does not exist: {}", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Failure to load or validate a batch file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config defines no jobs")]
    NoJobs,

    #[error("Invalid worker count: {0}")]
    InvalidWorkers(usize),

    #[error("JPEG quality {0} outside 1..=100")]
    InvalidQuality(u8),

    #[error("Invalid job #{index} ({}): {reason}", input.display())]
    InvalidJob {
        index: usize,
        input: PathBuf,
        reason: String,
    },
}
