//! RGB pixel value.

/// Rec.601 luma weights for R, G and B.
pub(crate) const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// One 8-bit RGB pixel.
///
/// # Example
/// ```
/// use pixel_pipeline::Rgb;
///
/// let orange = Rgb::new(255, 128, 0);
/// assert_eq!(orange.to_bytes(), [255, 128, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Create a pixel from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Create a pixel from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        self.0
    }

    /// Build a pixel from float channels, rounding and clamping to 0..=255.
    #[inline]
    pub fn from_f32_clamped(channels: [f32; 3]) -> Self {
        Self(channels.map(clamp_u8))
    }

    /// Channels as floats (0.0..=255.0).
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        self.0.map(|c| c as f32)
    }

    /// Rec.601 luma in the 0.0..=255.0 range.
    ///
    /// ```
    /// use pixel_pipeline::Rgb;
    ///
    /// assert!((Rgb::new(255, 255, 255).luma() - 255.0).abs() < 1e-3);
    /// assert_eq!(Rgb::new(0, 0, 0).luma(), 0.0);
    /// ```
    #[inline]
    pub fn luma(self) -> f32 {
        let [r, g, b] = self.to_f32();
        r * LUMA_WEIGHTS[0] + g * LUMA_WEIGHTS[1] + b * LUMA_WEIGHTS[2]
    }

    /// Squared Euclidean distance in RGB.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let mut sum = 0u32;
        for c in 0..3 {
            let d = self.0[c] as i32 - other.0[c] as i32;
            sum += (d * d) as u32;
        }
        sum
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }
}

/// Round and clamp a float channel value to `u8`.
#[inline]
pub(crate) fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
