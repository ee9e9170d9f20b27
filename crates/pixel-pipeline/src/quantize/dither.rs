//! Floyd-Steinberg error diffusion onto a fixed palette.

use crate::color::Rgb;
use crate::image::RasterImage;

use super::palette::Palette;

/// An error diffusion kernel: `(dx, dy, weight)` entries over `divisor`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg weights, 100% propagation.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub(crate) const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Dither `image` onto `palette` and return one palette index per pixel.
///
/// Pixels are processed left to right, top to bottom. The residual between
/// the accumulated value and the chosen palette color is spread forward
/// with [`FLOYD_STEINBERG`]. Accumulated values are clamped to `0..=255`
/// before lookup.
pub(crate) fn dither_indices(image: &RasterImage, palette: &Palette) -> Vec<u8> {
    diffuse(image, palette, &FLOYD_STEINBERG)
}

fn diffuse(image: &RasterImage, palette: &Palette, kernel: &Kernel) -> Vec<u8> {
    let (width, height) = image.dimensions();
    // Two rows of error: current and next.
    let mut errors = vec![[0.0f32; 3]; width * 2];
    let mut out = Vec::with_capacity(width * height);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let src = image.pixel(x, y).to_f32();
            let err = errors[x];
            let value = [
                (src[0] + err[0]).clamp(0.0, 255.0),
                (src[1] + err[1]).clamp(0.0, 255.0),
                (src[2] + err[2]).clamp(0.0, 255.0),
            ];
            let index = palette.nearest(Rgb::from_f32_clamped(value));
            out.push(index);

            let chosen = palette.get(index as usize).to_f32();
            let residual = [
                value[0] - chosen[0],
                value[1] - chosen[1],
                value[2] - chosen[2],
            ];

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                if nx < 0 || nx >= width as i32 || y + dy as usize >= height {
                    continue;
                }
                let slot = &mut errors[dy as usize * width + nx as usize];
                let w = weight as f32 / divisor;
                for c in 0..3 {
                    slot[c] += residual[c] * w;
                }
            }
        }
        // Shift next row up, clear the new next row
        errors.copy_within(width.., 0);
        errors[width..].fill([0.0; 3]);
    }
    out
}
