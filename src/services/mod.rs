pub mod batch;
pub mod converter;

pub use batch::{BatchRunner, BatchSummary, JobResult};
pub use converter::{ConversionReport, ImageConverter};
