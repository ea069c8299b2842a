
/// Represents an image with each pixel being either true or false,
/// corresponding to foreground (inside-the-shape) and background
/// (outside-of-the-shape) respectively.
/// BinaryImages can be created from byte slices
/// or piston images if the feature `piston_image` is activated.
pub trait BinaryImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn is_inside(&self, x: u32, y: u32) -> bool;

    /// True if the image contains no pixels at all.
    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// The luminance threshold used by default: a pixel with a value
/// below 128 is background, anything brighter is foreground.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// An image which is described by a slice of bytes with one byte per pixel.
/// To determine if a byte is inside or outside,
/// it is compared to a threshold. The default threshold is 127.
pub struct BinaryByteImage<'b> {
    width: u32,
    height: u32,

    /// A row-major image vector with one byte per pixel.
    buffer: &'b [u8],

    /// A pixel must be brighter than this value
    /// in order to be inside the shape.
    threshold: u8,
}


impl<'b> BinaryByteImage<'b> {
    /// Create a binary byte image with a threshold of 127
    pub fn from_slice(width: u32, height: u32, buffer: &'b [u8]) -> crate::Result<Self> {
        Self::from_slice_with_threshold(width, height, buffer, DEFAULT_THRESHOLD)
    }

    /// Create a binary byte image from the buffer
    /// with all pixels brighter than the threshold being inside-the-shape.
    pub fn from_slice_with_threshold(
        width: u32, height: u32, buffer: &'b [u8], threshold: u8
    ) -> crate::Result<Self> {
        let expected = width as usize * height as usize;
        if buffer.len() != expected {
            return Err(crate::Error::InvalidDimensions(format!(
                "buffer of {} bytes does not match {}x{} pixels", buffer.len(), width, height
            )));
        }

        Ok(BinaryByteImage { width, height, buffer, threshold })
    }

    /// The same pixels, classified against another threshold.
    pub fn with_threshold(self, threshold: u8) -> Self {
        BinaryByteImage { threshold, ..self }
    }
}

impl BinaryImage for BinaryByteImage<'_> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_inside(&self, x: u32, y: u32) -> bool {
        self.buffer[self.width as usize * y as usize + x as usize] > self.threshold
    }
}

/// Create binary images from piston images.
#[cfg(feature = "piston_image")]
pub mod piston_image {
    use image::{GrayImage, ImageBuffer, Pixel, Primitive, RgbaImage};
    use super::{BinaryImage, DEFAULT_THRESHOLD};

    /// Index of the green channel, which decides foreground and background of colour images.
    pub const GREEN: usize = 1;

    /// Create a binary image from a grey-scale piston image
    /// with all pixels brighter than 127 being inside-the-shape.
    pub fn of_gray_u8_image(image: &GrayImage) -> WithThreshold<'_, image::Luma<u8>, Vec<u8>> {
        of_gray_u8_image_with_threshold(image, DEFAULT_THRESHOLD)
    }

    /// Create a binary image from a grey-scale piston image
    /// with all pixels brighter than the threshold being inside-the-shape.
    pub fn of_gray_u8_image_with_threshold(image: &GrayImage, threshold: u8)
        -> WithThreshold<'_, image::Luma<u8>, Vec<u8>>
    {
        WithThreshold::of(image, 0, threshold)
    }

    /// Create a binary image from the green channel of an rgba piston image
    /// with all pixels greener than 127 being inside-the-shape.
    pub fn of_rgba_image(image: &RgbaImage) -> WithThreshold<'_, image::Rgba<u8>, Vec<u8>> {
        of_rgba_image_with_threshold(image, DEFAULT_THRESHOLD)
    }

    /// Create a binary image from the green channel of an rgba piston image
    /// with all pixels greener than the threshold being inside-the-shape.
    pub fn of_rgba_image_with_threshold(image: &RgbaImage, threshold: u8)
        -> WithThreshold<'_, image::Rgba<u8>, Vec<u8>>
    {
        WithThreshold::of(image, GREEN, threshold)
    }


    /// A binary image constructed from one channel of a piston image
    pub struct WithThreshold<'i, P: Pixel, Container> {
        image: &'i ImageBuffer<P, Container>,
        channel: usize,
        threshold: P::Subpixel,
    }

    impl<'i, P, C> WithThreshold<'i, P, C> where P: Pixel {
        /// Create a binary image from a channel of a piston image
        /// with all pixels brighter than the threshold being inside-the-shape.
        pub fn of(image: &'i ImageBuffer<P, C>, channel: usize, threshold: P::Subpixel) -> Self {
            debug_assert!(channel < P::CHANNEL_COUNT as usize, "channel out of range");
            WithThreshold { image, channel, threshold }
        }
    }

    impl<'i, P, C> BinaryImage for WithThreshold<'i, P, C>
        where P: Pixel, P::Subpixel: Primitive, C: std::ops::Deref<Target = [P::Subpixel]>
    {
        fn width(&self) -> u32 {
            self.image.width()
        }

        fn height(&self) -> u32 {
            self.image.height()
        }

        fn is_inside(&self, x: u32, y: u32) -> bool {
            self.image.get_pixel(x, y).channels()[self.channel] > self.threshold
        }
    }


}
