
use crate::binary_image::BinaryImage;
use crate::config::Saturation;
use crate::error::{Error, Result};
use crate::owner_vector_grid::{classify, OwnerVectorGrid};
use crate::signed_distance_image::{encode_signed, SignedDistanceImage};
use tracing::{debug, warn};



/// Signed distance of every pixel to the shape boundary,
/// positive inside the shape and negative outside.
#[derive(Clone, PartialEq, Debug)]
pub struct SignedDistanceField<D: DistanceStorage> {
    pub width: u32,
    pub height: u32,
    pub distances: D,
}

/// Needs less storage with sufficient precision, but takes about
/// twice as long because of conversions between f16 and f32.
pub type F16DistanceStorage = Vec<half::f16>;

/// Needs more storage with high precision, but takes about
/// half as long because no conversions between f16 and f32 must be made.
pub type F32DistanceStorage = Vec<f32>;

pub trait DistanceStorage {
    fn new(length: usize) -> Self;

    fn get(&self, index: usize) -> f32;

    fn set(&mut self, index: usize, distance: f32);
}



impl<D> SignedDistanceField<D> where D: DistanceStorage {

    /// Approximates the signed distance field of the specified image
    /// with the eight-points sequential euclidean distance transform.
    /// The transforms of the outside and the inside grid run concurrently.
    pub fn compute(binary_image: &impl BinaryImage) -> Result<Self> {
        let width = binary_image.width();
        let height = binary_image.height();

        if binary_image.is_empty() {
            return Err(Error::zero_sized(width, height));
        }

        let (outside, inside) = classify(binary_image);

        // each task owns its grid until the join
        let (outside, inside) = rayon::join(
            move || outside.transformed(),
            move || inside.transformed(),
        );

        if outside.is_all_far() {
            warn!("image of {}x{} pixels has no background, distance field is saturated", width, height);
        }
        else if inside.is_all_far() {
            warn!("image of {}x{} pixels has no foreground, distance field is saturated", width, height);
        }

        Ok(Self::compose(&outside, &inside))
    }

    /// Combines the transformed grids of one image. The outside grid holds the
    /// distance to the nearest background pixel, the inside grid the distance to
    /// the nearest foreground pixel, so their difference is positive inside the shape.
    pub fn compose(outside: &OwnerVectorGrid, inside: &OwnerVectorGrid) -> Self {
        debug_assert_eq!(
            (outside.width(), outside.height()), (inside.width(), inside.height()),
            "grid dimension mismatch"
        );

        let width = outside.width();
        let height = outside.height();
        let mut distances = D::new(width as usize * height as usize);

        let pairs = outside.vectors().iter().zip(inside.vectors());
        for (index, (to_background, to_foreground)) in pairs.enumerate() {
            let distance = to_background.distance() - to_foreground.distance();
            distances.set(index, distance as f32);
        }

        SignedDistanceField { width, height, distances }
    }

    /// Encodes the distances as 8-bit values, saturating at `saturation_distance` pixels.
    pub fn to_signed_distance_image(&self, saturation_distance: f64) -> SignedDistanceImage {
        SignedDistanceImage::from_fn(self.width, self.height, |x, y| {
            let distance = self.get_distance(x, y) as f64;
            encode_signed(distance / saturation_distance)
        })
    }

    /// Encodes the distances as 8-bit values with the configured saturation.
    pub fn encode(&self, saturation: Saturation) -> Result<SignedDistanceImage> {
        saturation.validate()?;

        let saturation_distance = saturation.distance(self.height);
        debug!("encoding {}x{} distance field, saturating at {} pixels", self.width, self.height, saturation_distance);

        Ok(self.to_signed_distance_image(saturation_distance))
    }

    #[inline(always)]
    pub fn get_distance(&self, x: u32, y: u32) -> f32 {
        self.distances.get(self.flatten_index(x, y))
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}


impl DistanceStorage for F16DistanceStorage {
    fn new(length: usize) -> Self {
        vec![half::f16::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = half::f16::from_f32(distance)
    }
}

impl DistanceStorage for F32DistanceStorage {
    fn new(length: usize) -> Self {
        vec![f32::INFINITY; length]
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, distance: f32) {
        self[index] = distance
    }
}
