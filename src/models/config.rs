use pixel_pipeline::{EnhanceConfig, Interpolation, PixelArtConfig};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::codec::OutputOptions;
use crate::error::ConfigError;

/// Batch configuration loaded from a YAML file.
///
/// ```yaml
/// workers: 4
/// output:
///   jpeg_quality: 90
///   optimize_png: true
/// pixel_art:
///   target_pixel_width: 48
///   color_count: 32
/// jobs:
///   - input: photos/cat.jpg
///     output: out/cat.png
///   - input: photos/dog.jpg
///     output: out/dog.jpg
///     mode: enhance
///     enhance:
///       upscale_factor: 2.0
/// ```
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BatchConfig {
    /// Defaults for every pixel-art job
    #[serde(default)]
    pub pixel_art: PixelArtSettings,

    /// Defaults for every enhance job
    #[serde(default)]
    pub enhance: EnhanceSettings,

    /// Encoder settings
    #[serde(default)]
    pub output: OutputOptions,

    /// Concurrent conversions (defaults to available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// One conversion in a batch file.
#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,

    #[serde(default)]
    pub mode: JobMode,

    /// Per-job overrides of the top-level `pixel_art` section
    #[serde(default)]
    pub pixel_art: PixelArtSettings,

    /// Per-job overrides of the top-level `enhance` section
    #[serde(default)]
    pub enhance: EnhanceSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobMode {
    #[default]
    PixelArt,
    Enhance,
}

/// Partial pixel-art settings. Unset fields fall through to the next layer.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PixelArtSettings {
    pub target_pixel_width: Option<usize>,
    pub scale_factor: Option<f32>,
    pub color_count: Option<usize>,
    /// `false` disables palette reduction regardless of `color_count`
    pub quantize: Option<bool>,
    pub preserve_aspect: Option<bool>,
    pub enhance_mode: Option<bool>,
    #[serde(deserialize_with = "deserialize_interpolation")]
    pub interpolation: Option<Interpolation>,
}

/// Partial enhance settings. Unset fields fall through to the next layer.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EnhanceSettings {
    pub sharpness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub denoise: Option<bool>,
    pub upscale_factor: Option<f32>,
}

fn deserialize_interpolation<'de, D>(deserializer: D) -> Result<Option<Interpolation>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    name.map(|n| n.parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl PixelArtSettings {
    /// Apply the fields that are set on top of `base`.
    pub fn apply(&self, base: PixelArtConfig) -> PixelArtConfig {
        let mut config = base;
        if let Some(width) = self.target_pixel_width {
            config.target_pixel_width = width;
        }
        if let Some(scale) = self.scale_factor {
            config.scale_factor = Some(scale);
        }
        if let Some(count) = self.color_count {
            config.color_count = Some(count);
        }
        if self.quantize == Some(false) {
            config.color_count = None;
        }
        if let Some(preserve) = self.preserve_aspect {
            config.preserve_aspect = preserve;
        }
        if let Some(enhance) = self.enhance_mode {
            config.enhance_mode = enhance;
        }
        if let Some(method) = self.interpolation {
            config.interpolation = method;
        }
        config
    }
}

impl EnhanceSettings {
    /// Apply the fields that are set on top of `base`.
    pub fn apply(&self, base: EnhanceConfig) -> EnhanceConfig {
        let mut config = base;
        if let Some(sharpness) = self.sharpness {
            config.sharpness = sharpness;
        }
        if let Some(contrast) = self.contrast {
            config.contrast = contrast;
        }
        if let Some(saturation) = self.saturation {
            config.saturation = saturation;
        }
        if let Some(denoise) = self.denoise {
            config.denoise = denoise;
        }
        if let Some(factor) = self.upscale_factor {
            config.upscale_factor = Some(factor);
        }
        config
    }
}

/// Pipeline with fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub enum JobTask {
    PixelArt(PixelArtConfig),
    Enhance(EnhanceConfig),
}

/// A batch job ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedJob {
    /// Position in the batch file, starting at 1
    pub index: usize,
    pub input: PathBuf,
    pub output: PathBuf,
    pub task: JobTask,
}

impl BatchConfig {
    /// Read, parse, and validate a batch file.
    ///
    /// Relative job paths are resolved against the directory containing
    /// the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base_dir);
        config.validate()?;

        tracing::info!(
            jobs = config.jobs.len(),
            workers = ?config.workers,
            "Loaded batch configuration"
        );
        Ok(config)
    }

    /// Parse YAML without path resolution or validation.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Make relative job paths relative to `base_dir`.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for job in &mut self.jobs {
            if job.input.is_relative() {
                job.input = base_dir.join(&job.input);
            }
            if job.output.is_relative() {
                job.output = base_dir.join(&job.output);
            }
        }
    }

    /// Check worker count, output settings, and every job's pipeline
    /// settings. Reports the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }
        if let Some(0) = self.workers {
            return Err(ConfigError::InvalidWorkers(0));
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.output.jpeg_quality));
        }
        for job in self.resolve_jobs() {
            let result = match &job.task {
                JobTask::PixelArt(config) => config.validate(),
                JobTask::Enhance(config) => config.validate(),
            };
            if let Err(e) = result {
                return Err(ConfigError::InvalidJob {
                    index: job.index,
                    input: job.input,
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Layer defaults, top-level sections, and per-job overrides.
    pub fn resolve_jobs(&self) -> Vec<ResolvedJob> {
        self.jobs
            .iter()
            .enumerate()
            .map(|(i, job)| {
                let task = match job.mode {
                    JobMode::PixelArt => JobTask::PixelArt(
                        job.pixel_art
                            .apply(self.pixel_art.apply(PixelArtConfig::default())),
                    ),
                    JobMode::Enhance => JobTask::Enhance(
                        job.enhance.apply(self.enhance.apply(EnhanceConfig::default())),
                    ),
                };
                ResolvedJob {
                    index: i + 1,
                    input: job.input.clone(),
                    output: job.output.clone(),
                    task,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
workers: 3
output:
  jpeg_quality: 80
pixel_art:
  target_pixel_width: 32
  interpolation: Lanczos
jobs:
  - input: in/a.png
    output: out/a.png
  - input: in/b.jpg
    output: out/b.png
    pixel_art:
      color_count: 8
      enhance_mode: false
  - input: /abs/c.png
    output: out/c.jpg
    mode: enhance
    enhance:
      sharpness: 0.5
      upscale_factor: 2.0
"#;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert!(config.jobs.is_empty());
        assert_eq!(config.workers, None);
        assert_eq!(config.output, OutputOptions::default());
        assert_eq!(config.pixel_art, PixelArtSettings::default());
    }

    #[test]
    fn test_parse_sample() {
        let config = BatchConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.output.jpeg_quality, 80);
        assert!(!config.output.optimize_png);
        assert_eq!(config.jobs.len(), 3);
        assert_eq!(config.jobs[2].mode, JobMode::Enhance);
        assert_eq!(
            config.pixel_art.interpolation,
            Some(Interpolation::Lanczos)
        );
    }

    #[test]
    fn test_resolve_jobs_layers_settings() {
        let config = BatchConfig::from_yaml(SAMPLE).unwrap();
        let jobs = config.resolve_jobs();

        match &jobs[0].task {
            JobTask::PixelArt(c) => {
                assert_eq!(c.target_pixel_width, 32);
                assert_eq!(c.color_count, Some(128));
                assert!(c.enhance_mode);
                assert_eq!(c.interpolation, Interpolation::Lanczos);
            }
            other => panic!("Expected pixel art, got {other:?}"),
        }
        match &jobs[1].task {
            JobTask::PixelArt(c) => {
                assert_eq!(c.target_pixel_width, 32);
                assert_eq!(c.color_count, Some(8));
                assert!(!c.enhance_mode);
            }
            other => panic!("Expected pixel art, got {other:?}"),
        }
        match &jobs[2].task {
            JobTask::Enhance(c) => {
                assert_eq!(c.sharpness, 0.5);
                assert_eq!(c.contrast, 1.1);
                assert_eq!(c.upscale_factor, Some(2.0));
            }
            other => panic!("Expected enhance, got {other:?}"),
        }
        assert_eq!(jobs[0].index, 1);
        assert_eq!(jobs[2].index, 3);
    }

    #[test]
    fn test_quantize_false_disables_palette() {
        let settings = PixelArtSettings {
            color_count: Some(16),
            quantize: Some(false),
            ..Default::default()
        };
        assert_eq!(settings.apply(PixelArtConfig::default()).color_count, None);
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let mut config = BatchConfig::from_yaml(SAMPLE).unwrap();
        config.resolve_paths(Path::new("/data/batch"));
        assert_eq!(config.jobs[0].input, PathBuf::from("/data/batch/in/a.png"));
        assert_eq!(config.jobs[2].input, PathBuf::from("/abs/c.png"));
        assert_eq!(config.jobs[2].output, PathBuf::from("/data/batch/out/c.jpg"));
    }

    #[test]
    fn test_unknown_interpolation_is_parse_error() {
        let yaml = "pixel_art:\n  interpolation: sinc\njobs: []\n";
        assert!(BatchConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let yaml = "jobs:\n  - input: a.png\n    output: b.png\n    mode: sketch\n";
        assert!(BatchConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_validate_reports_first_bad_job() {
        let yaml = r#"
jobs:
  - input: ok.png
    output: ok_out.png
  - input: bad.png
    output: bad_out.png
    pixel_art:
      color_count: 1
"#;
        let config = BatchConfig::from_yaml(yaml).unwrap();
        match config.validate() {
            Err(ConfigError::InvalidJob { index, input, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(input, PathBuf::from("bad.png"));
            }
            other => panic!("Expected InvalidJob, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_zero_workers() {
        let empty = BatchConfig::default();
        assert!(matches!(empty.validate(), Err(ConfigError::NoJobs)));

        let mut config = BatchConfig::from_yaml(SAMPLE).unwrap();
        config.workers = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWorkers(0))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let mut config = BatchConfig::from_yaml(SAMPLE).unwrap();
        config.output.jpeg_quality = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidQuality(0))
        ));
    }
}
