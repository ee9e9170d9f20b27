pub mod config;

pub use config::{
    BatchConfig, EnhanceSettings, JobConfig, JobMode, JobTask, PixelArtSettings, ResolvedJob,
};
