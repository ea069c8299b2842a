//! This crate approximates a signed distance
//! field, given a binary image, and blends several
//! signed distance fields into one.
//! The transform used is the "eight-points signed
//! sequential euclidean distance transform" (8SSEDT),
//! which propagates nearest-boundary vectors in two sweeps.

pub mod binary_image;
pub mod blend;
pub mod config;
pub mod distance_field;
pub mod error;
pub mod owner_vector_grid;
pub mod signed_distance_image;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::{
        generate,
        generate_with_config,
        generate_from_luma,
        compute_distance_field,
        compute_f16_distance_field,
        compute_f32_distance_field
    };

    pub use crate::blend::{ blend, blend_pair, pairwise_weight };

    pub use crate::binary_image::{
        BinaryImage, BinaryByteImage
    };

    pub use crate::config::{ GenerateConfig, Saturation };

    pub use crate::distance_field::{
        SignedDistanceField, DistanceStorage,
        F16DistanceStorage, F32DistanceStorage
    };

    pub use crate::owner_vector_grid::{ OwnerVector, OwnerVectorGrid };
    pub use crate::signed_distance_image::SignedDistanceImage;
    pub use crate::error::{ Error, Result };

    #[cfg(feature = "piston_image")]
    pub use crate::binary_image::piston_image as binary_piston_image;
}


use prelude::*;

/// Compute the signed distance field with the specified distance storage of the specified binary image.
pub fn compute_distance_field<D: DistanceStorage>(image: &impl BinaryImage) -> Result<SignedDistanceField<D>> {
    SignedDistanceField::compute(image)
}

/// Compute the signed distance field with an `f16` distance storage of the specified binary image.
pub fn compute_f16_distance_field(image: &impl BinaryImage) -> Result<SignedDistanceField<F16DistanceStorage>> {
    compute_distance_field(image)
}

/// Compute the signed distance field with an `f32` distance storage of the specified binary image.
pub fn compute_f32_distance_field(image: &impl BinaryImage) -> Result<SignedDistanceField<F32DistanceStorage>> {
    compute_distance_field(image)
}

/// Compute the 8-bit signed distance image of the specified binary image,
/// saturating at a sixth of the image height.
pub fn generate(image: &impl BinaryImage) -> Result<SignedDistanceImage> {
    generate_with_config(image, &GenerateConfig::default())
}

/// Compute the 8-bit signed distance image of the specified binary image.
pub fn generate_with_config(image: &impl BinaryImage, config: &GenerateConfig) -> Result<SignedDistanceImage> {
    config.validate()?;
    compute_f32_distance_field(image)?.encode(config.saturation)
}

/// Compute the 8-bit signed distance image of a one-byte-per-pixel luminance buffer,
/// with all pixels brighter than the threshold being inside-the-shape.
pub fn generate_from_luma(
    width: u32, height: u32, buffer: &[u8], threshold: u8, config: &GenerateConfig
) -> Result<SignedDistanceImage> {
    let image = BinaryByteImage::from_slice_with_threshold(width, height, buffer, threshold)?;
    generate_with_config(&image, config)
}


#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn byte_image_from_function(width: usize, height: usize, image: impl Fn(usize, usize) -> bool) -> Vec<u8> {
        let mut binary_image_buffer = vec![0_u8; width * height];

        for y in 0..height {
            for x in 0..width {
                binary_image_buffer[width * y + x] = if image(x, y) { 255 } else { 0 };
            }
        }

        binary_image_buffer
    }

    fn is_inside_circle(center_x: usize, center_y: usize, radius: usize) -> impl Fn(usize, usize) -> bool {
        move |x,y|{
            let x = (x as isize - center_x as isize) as f32;
            let y = (y as isize - center_y as isize) as f32;
            (x * x + y * y).sqrt() < radius as f32
        }
    }

    fn is_inside_rectangle(center_x: usize, center_y: usize, width: usize, height: usize) -> impl Fn(usize, usize) -> bool {
        let w = width as f32;
        let h = height as f32;

        move |x,y|{
            let x = x as f32 - center_x as f32;
            let y = y as f32 - center_y as f32;
            x > -w && x < w && y > -h && y < h
        }
    }

    fn is_inside_checker(width: usize, height: usize) -> impl Fn(usize, usize) -> bool {
        move |x,y|{
            (x % width < width / 2) != (y % height < height / 2)
        }
    }

    #[test]
    pub fn reconstruct_circle(){
        reconstruct_binary_image(512, 512, is_inside_circle(128, 128, 64));
    }

    #[test]
    pub fn reconstruct_dot(){
        reconstruct_binary_image(512, 512, is_inside_circle(256, 256, 4));
    }

    #[test]
    pub fn reconstruct_top_left(){
        reconstruct_binary_image(512, 512, is_inside_circle(0, 0, 14));
    }

    #[test]
    pub fn reconstruct_top_right(){
        reconstruct_binary_image(512, 512, is_inside_circle(512, 0, 14));
    }

    #[test]
    pub fn reconstruct_rectangle(){
        reconstruct_binary_image(512, 512, is_inside_rectangle(179, 179, 37, 37));
    }

    #[test]
    pub fn reconstruct_stripes(){
        reconstruct_binary_image(512, 512, is_inside_checker(179, 37));
    }


    /// The sign of the distance field reproduces the binary image exactly,
    /// as every pixel is at least one pixel away from the opposite class.
    fn reconstruct_binary_image(width: usize, height: usize, image: impl Fn(usize, usize) -> bool) {
        let binary_image_buffer = byte_image_from_function(width, height, image);

        let binary_image = BinaryByteImage::from_slice(
            width as u32, height as u32, &binary_image_buffer
        ).unwrap();

        let distance_field_16 = compute_f16_distance_field(&binary_image).unwrap();
        let distance_field_32 = compute_f32_distance_field(&binary_image).unwrap();

        for y in 0..height as u32 {
            for x in 0..width as u32 {
                let ground_truth = binary_image.is_inside(x, y);
                assert_eq!(distance_field_16.get_distance(x, y) > 0.0, ground_truth);
                assert_eq!(distance_field_32.get_distance(x, y) > 0.0, ground_truth);
                assert!(distance_field_32.get_distance(x, y).abs() >= 1.0);
            }
        }
    }


    fn circle_distance(center_x: usize, center_y: usize, radius: usize)
        -> impl Fn(usize, usize) -> f32
    {
        move |x,y|{
            let x = (x as isize - center_x as isize) as f32;
            let y = (y as isize - center_y as isize) as f32;
            (x * x + y * y).sqrt() - radius as f32
        }
    }

    fn rectangle_distance(center_x: usize, center_y: usize, width: usize, height: usize)
        -> impl Fn(usize, usize) -> f32
    {
        move |x,y|{
            let x = x as f32 - center_x as f32;
            let y = y as f32 - center_y as f32;
            let x = x.abs() - width as f32;
            let y = y.abs() - height as f32;
            let outside = (x.max(0.0) * x.max(0.0) + y.max(0.0) * y.max(0.0)).sqrt();
            outside + x.max(y).min(0.0)
        }
    }

    #[test]
    pub fn reconstruct_circle_distance_field(){
        reconstruct_distance_field(512, 512, 2.0, circle_distance(128, 128, 100));
    }

    #[test]
    pub fn reconstruct_dot_distance_field(){
        reconstruct_distance_field(512, 512, 2.0, circle_distance(128, 128, 4));
    }

    #[test]
    pub fn reconstruct_rectangle_distance_field(){
        reconstruct_distance_field(512, 512, 2.0, rectangle_distance(255, 179, 137, 137));
    }

    #[test]
    pub fn reconstruct_small_rectangle_distance_field(){
        reconstruct_distance_field(512, 512, 2.0, rectangle_distance(179, 255, 4, 7));
    }

    /// The shape is the region where the analytic distance is negative.
    /// The transform measures pixel centres to pixel centres, so the
    /// reconstruction is compared with an average tolerance only.
    pub fn reconstruct_distance_field(
        width: usize, height: usize, tolerance: f32,
        distance_function: impl Fn(usize, usize) -> f32
    ) {
        let mut distance_buffer = vec![0.0; width * height];

        for y in 0..height {
            for x in 0..width {
                distance_buffer[width * y + x] = distance_function(x, y);
            }
        }

        let binary_image_buffer: Vec<u8> = distance_buffer.iter()
            .map(|distance| if *distance < 0.0 { 255 } else { 0 })
            .collect();

        let binary_image = BinaryByteImage::from_slice(
            width as u32, height as u32, &binary_image_buffer
        ).unwrap();

        let distance_field = compute_f32_distance_field(&binary_image).unwrap();

        let mut summed_error = 0.0;
        for y in 0..height as u32 {
            for x in 0..width as u32 {
                let ground_truth = - distance_buffer[y as usize * width + x as usize];
                let reconstructed = distance_field.get_distance(x, y);
                summed_error += (ground_truth - reconstructed).abs();
            }
        }

        let error_per_pixel = summed_error / (width as f32 * height as f32);
        println!("average error per pixel: {}", error_per_pixel);

        assert!(error_per_pixel < tolerance, "too many incorrect pixels");
    }


    #[test]
    pub fn half_split_increases_towards_foreground(){
        // background on the left, foreground on the right.
        // a tall image keeps the saturation distance above the width
        let (width, height) = (24_u32, 1200_u32);
        let buffer = byte_image_from_function(width as usize, height as usize, |x, _| x >= 12);
        let binary_image = BinaryByteImage::from_slice(width, height, &buffer).unwrap();

        let field = generate(&binary_image).unwrap();

        for y in [0, 599, 1199] {
            let row: Vec<u8> = (0..width).map(|x| field.get(x, y)).collect();

            assert!(row.windows(2).all(|pair| pair[0] <= pair[1]), "row {:?} is not increasing", row);
            assert!(row[0] < row[11] && row[12] < row[23], "row {:?} is flat", row);
            assert!(row[11] < row[12]);

            assert!((row[11] as i32 - 128).abs() <= 1, "boundary value {}", row[11]);
            assert!((row[12] as i32 - 128).abs() <= 1, "boundary value {}", row[12]);
        }
    }

    #[test]
    pub fn half_split_is_strictly_increasing_below_saturation(){
        // at 100 pixels of saturation, one pixel of distance is more than one intensity step
        let (width, height) = (16_u32, 4_u32);
        let buffer = byte_image_from_function(width as usize, height as usize, |x, _| x >= 8);
        let config = GenerateConfig::new().with_saturation(Saturation::Pixels(100.0));

        let field = generate_from_luma(width, height, &buffer, 127, &config).unwrap();
        let row: Vec<u8> = (0..width).map(|x| field.get(x, 1)).collect();

        assert!(row.windows(2).all(|pair| pair[0] < pair[1]), "row {:?}", row);
        assert!((row[7] as i32 - 128).abs() <= 2 && (row[8] as i32 - 128).abs() <= 2);
    }

    #[test]
    pub fn generate_rejects_empty_images(){
        let binary_image = BinaryByteImage::from_slice(5, 0, &[]).unwrap();
        assert!(matches!(generate(&binary_image), Err(Error::InvalidDimensions(_))));
    }

    #[test]
    pub fn generate_saturates_degenerate_images(){
        let buffer = vec![0_u8; 30];
        let binary_image = BinaryByteImage::from_slice(6, 5, &buffer).unwrap();
        let field = generate(&binary_image).unwrap();
        assert!(field.values().iter().all(|value| *value == 0));
    }

    #[test]
    pub fn luma_threshold_decides_foreground(){
        let buffer = [10, 10, 60, 60];
        let config = GenerateConfig::new().with_saturation(Saturation::Pixels(2.0));

        let field = generate_from_luma(4, 1, &buffer, 50, &config).unwrap();
        assert_eq!(field.values(), &[0, 64, 191, 255]);

        // below every value, the whole buffer is foreground
        let field = generate_from_luma(4, 1, &buffer, 5, &config).unwrap();
        assert_eq!(field.values(), &[255, 255, 255, 255]);

        // the default threshold of 127 leaves everything as background
        let field = generate_from_luma(4, 1, &buffer, 127, &config).unwrap();
        assert_eq!(field.values(), &[0, 0, 0, 0]);
    }

    #[test]
    pub fn generated_fields_blend(){
        let size = 96;
        let small = byte_image_from_function(size, size, is_inside_circle(48, 48, 16));
        let large = byte_image_from_function(size, size, is_inside_circle(48, 48, 32));

        let small = generate(&BinaryByteImage::from_slice(size as u32, size as u32, &small).unwrap()).unwrap();
        let large = generate(&BinaryByteImage::from_slice(size as u32, size as u32, &large).unwrap()).unwrap();

        let blended = blend(&[large, small]).unwrap();

        // outside the large circle everything is attributed,
        // inside the small circle nothing is
        assert_eq!(blended.get(2, 2), 255);
        assert_eq!(blended.get(48, 48), 0);

        // in between, the attribution grows towards the large circle
        let near_small = blended.get(48 + 18, 48);
        let near_large = blended.get(48 + 31, 48);
        assert!(0 < near_small && near_small < near_large && near_large < 255);
    }
}
