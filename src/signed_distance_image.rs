//! The 8-bit encoding of a signed distance field.

use crate::error::{Error, Result};


/// Intensity of a pixel directly on the boundary.
pub const BOUNDARY_VALUE: u8 = 128;

/// One byte per pixel, row-major. A value of 128 lies on the boundary,
/// brighter values are inside the shape and darker values outside,
/// linearly up to the saturation distance the image was encoded with.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignedDistanceImage {
    width: u32,
    height: u32,
    values: Vec<u8>,
}

impl SignedDistanceImage {

    /// Wraps encoded values, failing if their count does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, values: Vec<u8>) -> Result<Self> {
        if values.len() != width as usize * height as usize {
            return Err(Error::InvalidDimensions(format!(
                "{} values do not match {}x{} pixels", values.len(), width, height
            )));
        }

        Ok(SignedDistanceImage { width, height, values })
    }

    /// Builds an image by evaluating the function for every pixel.
    pub fn from_fn(width: u32, height: u32, value: impl Fn(u32, u32) -> u8) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                values.push(value(x, y));
            }
        }

        SignedDistanceImage { width, height, values }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.values[self.width as usize * y as usize + x as usize]
    }

    /// The stored value mapped back to a signed distance in `[-1, 1]`,
    /// as a fraction of the saturation distance.
    #[inline]
    pub fn get_signed(&self, x: u32, y: u32) -> f64 {
        decode_signed(self.get(x, y))
    }
}

/// Maps an encoded value back to a signed distance in `[-1, 1]`.
#[inline]
pub fn decode_signed(value: u8) -> f64 {
    value as f64 / 255.0 * 2.0 - 1.0
}

/// Maps a signed distance, already divided by the saturation distance,
/// to its 8-bit encoding.
#[inline]
pub fn encode_signed(normalized: f64) -> u8 {
    let normalized = normalized.max(-1.0).min(1.0);
    ((normalized + 1.0) * 127.5).round().max(0.0).min(255.0) as u8
}


/// Conversion to and from piston images.
#[cfg(feature = "piston_image")]
mod piston_image {
    use image::{GrayImage, Rgba, RgbaImage};
    use super::SignedDistanceImage;

    impl SignedDistanceImage {

        /// Reads the red channel of an rgba image, which is where
        /// `to_rgba_image` stores the encoded distance.
        pub fn from_rgba_image(image: &RgbaImage) -> Self {
            Self::from_fn(image.width(), image.height(), |x, y| image.get_pixel(x, y).0[0])
        }

        pub fn from_gray_image(image: &GrayImage) -> Self {
            Self::from_fn(image.width(), image.height(), |x, y| image.get_pixel(x, y).0[0])
        }

        /// The encoded distance in all three colour channels, fully opaque.
        pub fn to_rgba_image(&self) -> RgbaImage {
            RgbaImage::from_fn(self.width, self.height, |x, y| {
                let value = self.get(x, y);
                Rgba([value, value, value, 255])
            })
        }

        pub fn to_gray_u8_image(&self) -> GrayImage {
            GrayImage::from_fn(self.width, self.height, |x, y| image::Luma([self.get(x, y)]))
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_maps_zero_to_boundary(){
        assert_eq!(encode_signed(0.0), BOUNDARY_VALUE);
        assert_eq!(encode_signed(1.0), 255);
        assert_eq!(encode_signed(-1.0), 0);
    }

    #[test]
    fn encoding_saturates(){
        assert_eq!(encode_signed(7.5), 255);
        assert_eq!(encode_signed(-1e9), 0);
    }

    #[test]
    fn decoding_spans_unit_range(){
        assert_eq!(decode_signed(0), -1.0);
        assert_eq!(decode_signed(255), 1.0);
        assert!(decode_signed(128) > 0.0);
        assert!(decode_signed(127) < 0.0);
    }

    #[test]
    fn from_raw_checks_length(){
        assert!(matches!(
            SignedDistanceImage::from_raw(3, 3, vec![0; 8]),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn from_fn_is_row_major(){
        let field = SignedDistanceImage::from_fn(3, 2, |x, y| (y * 3 + x) as u8);
        assert_eq!(field.values(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(field.get(1, 1), 4);
        assert_eq!(field.dimensions(), (3, 2));
    }
}
