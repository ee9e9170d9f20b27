//! Unified error type for the pixel-pipeline public API.
//!
//! [`PipelineError`] covers every way a filter or pipeline stage can refuse
//! its input. All variants are terminal for the call that produced them.

use std::fmt;

/// Error returned by raster construction, filter primitives and pipelines.
///
/// # Example
///
/// ```
/// use pixel_pipeline::{PipelineError, RasterImage};
///
/// let err = RasterImage::new(0, 10, Vec::new()).unwrap_err();
/// assert!(matches!(err, PipelineError::InvalidDimension { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A stage computed or received a zero-area image.
    InvalidDimension {
        /// Stage that detected the problem
        stage: &'static str,
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// A stage would allocate more than [`MAX_PIXELS`](crate::MAX_PIXELS) pixels.
    ImageTooLarge {
        /// Stage that detected the problem
        stage: &'static str,
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Pixel buffer length does not equal `width * height * 3`.
    BufferSize {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
    /// Palette size outside `2..=256`.
    InvalidColorCount(usize),
    /// Median window that is zero or even.
    InvalidWindow(usize),
    /// A numeric configuration value outside its domain.
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
    },
}

impl PipelineError {
    #[inline]
    pub(crate) fn dimension(stage: &'static str, width: usize, height: usize) -> Self {
        PipelineError::InvalidDimension {
            stage,
            width,
            height,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidDimension {
                stage,
                width,
                height,
            } => write!(f, "invalid dimension {}x{} in {}", width, height, stage),
            PipelineError::ImageTooLarge {
                stage,
                width,
                height,
            } => write!(
                f,
                "{}x{} in {} exceeds the {} pixel limit",
                width,
                height,
                stage,
                crate::MAX_PIXELS
            ),
            PipelineError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            PipelineError::InvalidColorCount(count) => {
                write!(f, "color count {} outside 2..=256", count)
            }
            PipelineError::InvalidWindow(size) => {
                write!(f, "median window {} must be odd and at least 1", size)
            }
            PipelineError::InvalidParameter { name, value } => {
                write!(f, "invalid value {} for {}", value, name)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// Error returned when parsing an [`Interpolation`](crate::Interpolation) name fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseInterpolationError(pub String);

impl fmt::Display for ParseInterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown interpolation '{}' (expected nearest, bilinear, bicubic or lanczos)",
            self.0
        )
    }
}

impl std::error::Error for ParseInterpolationError {}
