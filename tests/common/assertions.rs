//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the file is a PNG and return its header info
pub fn assert_png_file(path: &Path) -> png::OutputInfo {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG signature, got {:?}",
        &bytes[..8.min(bytes.len())]
    );

    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().expect("Invalid PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    reader.next_frame(&mut buf).expect("Invalid PNG data")
}

/// Assert the file is a JPEG (SOI marker)
pub fn assert_jpeg_file(path: &Path) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected JPEG at {}: {e}", path.display()));
    assert_eq!(&bytes[..2], &[0xFF, 0xD8], "Expected JPEG SOI marker");
}

/// Decode any image file to RGB8
pub fn load_rgb(path: &Path) -> image::RgbImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("Failed to decode {}: {e}", path.display()))
        .to_rgb8()
}

/// Assert decoded dimensions
pub fn assert_dimensions(path: &Path, width: u32, height: u32) {
    let img = load_rgb(path);
    assert_eq!(
        img.dimensions(),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
}

/// Assert the decoded image uses at most `max` distinct colors
pub fn assert_max_colors(path: &Path, max: usize) -> usize {
    let img = load_rgb(path);
    let colors: HashSet<[u8; 3]> = img.pixels().map(|p| p.0).collect();
    assert!(
        colors.len() <= max,
        "Expected at most {max} colors in {}, found {}",
        path.display(),
        colors.len()
    );
    colors.len()
}
