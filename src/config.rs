//! Tunable parameters of distance field generation.

use crate::error::{Error, Result};


/// The absolute signed distance at which the 8-bit encoding saturates
/// to pure black (outside) or pure white (inside).
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Saturation {
    /// Saturate at `height / divisor` pixels. A divisor of 6 works well
    /// for sprites and glyphs, but is an empirical choice.
    HeightFraction(f64),

    /// Saturate at a fixed number of pixels, regardless of the image size.
    Pixels(f64),
}

impl Saturation {
    /// The saturation distance in pixels for an image of the specified height.
    pub fn distance(self, height: u32) -> f64 {
        match self {
            Saturation::HeightFraction(divisor) => height as f64 / divisor,
            Saturation::Pixels(pixels) => pixels,
        }
    }

    pub fn validate(self) -> Result<()> {
        let value = match self {
            Saturation::HeightFraction(divisor) => divisor,
            Saturation::Pixels(pixels) => pixels,
        };

        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "saturation must be finite and positive, got {:?}", self
            )));
        }

        Ok(())
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Saturation::HeightFraction(6.0)
    }
}


/// Parameters of encoding a distance field. The foreground threshold is not
/// part of it, as it belongs to the binary image, see `BinaryByteImage`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GenerateConfig {
    pub saturation: Saturation,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saturation(mut self, saturation: Saturation) -> Self {
        self.saturation = saturation;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.saturation.validate()
    }
}
