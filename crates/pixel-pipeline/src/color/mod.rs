//! 8-bit RGB pixel type and luma helpers.
//!
//! All pipeline stages work on gamma-encoded 8-bit RGB, the model the
//! decoded source image arrives in. Contrast and saturation adjustments
//! measure "neutral" with Rec.601 luma, which keeps perceived brightness
//! stable while the deviation from grey is scaled.

mod rgb;

pub(crate) use rgb::clamp_u8;
pub use rgb::Rgb;
