use pixel_pipeline::{convert_to_pixel_art, enhance_quality, EnhanceConfig, PixelArtConfig};
use std::path::{Path, PathBuf};

use crate::codec::{self, OutputFormat, OutputOptions};
use crate::error::{ConvertError, EncodeError};
use crate::models::{JobTask, ResolvedJob};

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input_size: (usize, usize),
    pub output_size: (usize, usize),
    /// Distinct colors in the output (pixel-art conversions only)
    pub distinct_colors: Option<usize>,
    /// Encoded file size in bytes
    pub bytes_written: usize,
}

/// File-to-file conversion: decode, run a pipeline, encode, write.
///
/// The output file is written in one call after every stage succeeded, so a
/// failed conversion leaves no partial file behind.
#[derive(Debug, Clone, Default)]
pub struct ImageConverter {
    output: OutputOptions,
}

impl ImageConverter {
    pub fn new(output: OutputOptions) -> Self {
        Self { output }
    }

    pub fn output_options(&self) -> &OutputOptions {
        &self.output
    }

    /// Convert `input` to pixel art and save it to `output`.
    pub fn pixelate_file(
        &self,
        input: &Path,
        output: &Path,
        config: &PixelArtConfig,
    ) -> Result<ConversionReport, ConvertError> {
        let format = self.prepare_output(output)?;
        config.validate()?;

        let src = codec::decode_file(input)?;
        let (src_w, src_h) = src.dimensions();
        tracing::info!(
            input = %input.display(),
            width = src_w,
            height = src_h,
            "Loaded source image"
        );

        let (grid_w, grid_h) = config.grid_size(src_w, src_h);
        tracing::info!(
            grid_width = grid_w,
            grid_height = grid_h,
            colors = ?config.color_count,
            enhance = config.enhance_mode,
            interpolation = %config.interpolation,
            "Converting to pixel art"
        );

        let art = convert_to_pixel_art(&src, config)?;
        let distinct = art.distinct_colors();
        tracing::debug!(colors = distinct, "Pixel art complete");

        let bytes_written = self.write(&art, format, output)?;
        Ok(ConversionReport {
            input_size: (src_w, src_h),
            output_size: art.dimensions(),
            distinct_colors: Some(distinct),
            bytes_written,
        })
    }

    /// Enhance `input` and save it to `output`.
    pub fn enhance_file(
        &self,
        input: &Path,
        output: &Path,
        config: &EnhanceConfig,
    ) -> Result<ConversionReport, ConvertError> {
        let format = self.prepare_output(output)?;
        config.validate()?;

        let src = codec::decode_file(input)?;
        tracing::info!(
            input = %input.display(),
            width = src.width(),
            height = src.height(),
            sharpness = config.sharpness,
            denoise = config.denoise,
            upscale = ?config.upscale_factor,
            "Enhancing image"
        );

        let enhanced = enhance_quality(&src, config)?;
        let bytes_written = self.write(&enhanced, format, output)?;
        Ok(ConversionReport {
            input_size: src.dimensions(),
            output_size: enhanced.dimensions(),
            distinct_colors: None,
            bytes_written,
        })
    }

    /// Run a resolved batch job.
    pub fn run_job(&self, job: &ResolvedJob) -> Result<ConversionReport, ConvertError> {
        match &job.task {
            JobTask::PixelArt(config) => self.pixelate_file(&job.input, &job.output, config),
            JobTask::Enhance(config) => self.enhance_file(&job.input, &job.output, config),
        }
    }

    /// Resolve the encoder and check the output directory before any work.
    fn prepare_output(&self, output: &Path) -> Result<OutputFormat, ConvertError> {
        let format = OutputFormat::from_path(output).map_err(|source| ConvertError::Encode {
            path: output.to_path_buf(),
            source,
        })?;
        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.is_dir() {
                return Err(ConvertError::MissingOutputDir(PathBuf::from(dir)));
            }
        }
        Ok(format)
    }

    fn write(
        &self,
        image: &pixel_pipeline::RasterImage,
        format: OutputFormat,
        output: &Path,
    ) -> Result<usize, ConvertError> {
        let encode_error = |source: EncodeError| ConvertError::Encode {
            path: output.to_path_buf(),
            source,
        };
        let bytes = codec::encode(image, format, &self.output).map_err(encode_error)?;
        std::fs::write(output, &bytes).map_err(|e| encode_error(EncodeError::Io(e)))?;
        tracing::info!(
            output = %output.display(),
            width = image.width(),
            height = image.height(),
            bytes = bytes.len(),
            "Saved image"
        );
        Ok(bytes.len())
    }
}
