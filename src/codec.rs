//! Decoding source files into rasters and encoding results to bytes.
//!
//! Decoding accepts anything the `image` crate reads and normalizes it to
//! RGB8. Encoding is chosen by the output file extension:
//!
//! - PNG: written with `png` directly, palette-indexed when the image has
//!   at most 256 colors (pixel art nearly always does), optionally
//!   re-compressed with oxipng
//! - JPEG: `image`'s encoder at the configured quality
//! - anything else `image` can write: its default encoder

use std::io::Cursor;
use std::path::Path;

use image::{ImageEncoder, ImageFormat};
use pixel_pipeline::{IndexedImage, RasterImage};
use serde::Deserialize;

use crate::error::{ConvertError, EncodeError};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encoder settings shared by every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,

    /// Re-compress PNG output with oxipng (slow, smaller files).
    pub optimize_png: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            optimize_png: false,
        }
    }
}

/// Output encoding, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Other(ImageFormat),
}

impl OutputFormat {
    /// # Errors
    ///
    /// [`EncodeError::UnsupportedFormat`] for a missing or unknown extension,
    /// or a format the `image` crate cannot write.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let format = ImageFormat::from_extension(&ext)
            .ok_or_else(|| EncodeError::UnsupportedFormat(ext.clone()))?;
        match format {
            ImageFormat::Png => Ok(OutputFormat::Png),
            ImageFormat::Jpeg => Ok(OutputFormat::Jpeg),
            other if other.writing_enabled() => Ok(OutputFormat::Other(other)),
            _ => Err(EncodeError::UnsupportedFormat(ext)),
        }
    }
}

/// Read an image file and convert it to an RGB8 raster.
pub fn decode_file(path: &Path) -> Result<RasterImage, ConvertError> {
    let decoded = image::open(path).map_err(|source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RasterImage::new(
        width as usize,
        height as usize,
        rgb.into_raw(),
    )?)
}

/// Encode `image` in `format`.
pub fn encode(
    image: &RasterImage,
    format: OutputFormat,
    options: &OutputOptions,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(image, options.optimize_png),
        OutputFormat::Jpeg => encode_jpeg(image, options.jpeg_quality),
        OutputFormat::Other(format) => encode_with_image(image, format),
    }
}

fn dimensions_u32(image: &RasterImage) -> Result<(u32, u32), EncodeError> {
    let (width, height) = image.dimensions();
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(EncodeError::Dimensions { width, height }),
    }
}

fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = dimensions_u32(image)?;
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .write_image(image.as_bytes(), width, height, image::ExtendedColorType::Rgb8)?;
    Ok(buf)
}

fn encode_with_image(image: &RasterImage, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = dimensions_u32(image)?;
    let rgb = image::RgbImage::from_raw(width, height, image.as_bytes().to_vec()).ok_or(
        EncodeError::Dimensions {
            width: image.width(),
            height: image.height(),
        },
    )?;
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

fn encode_png(image: &RasterImage, optimize: bool) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = dimensions_u32(image)?;

    let png_bytes = match IndexedImage::from_raster(image) {
        Some(indexed) => {
            let palette = indexed.palette();
            let (depth, bits) = match palette.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_bytes()).collect();
            let packed = if bits == 8 {
                indexed.indices().to_vec()
            } else {
                pack_nbits(indexed.indices(), width, bits)
            };
            write_png(
                width,
                height,
                png::ColorType::Indexed,
                depth,
                Some(&plte),
                &packed,
                optimize,
            )?
        }
        None => write_png(
            width,
            height,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            image.as_bytes(),
            optimize,
        )?,
    };

    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Encode packed pixel rows as a PNG.
fn write_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
    fast: bool,
) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        if fast {
            // oxipng will re-compress optimally
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        } else {
            encoder.set_compression(png::Compression::Default);
        }
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}

/// Pack palette indices into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
