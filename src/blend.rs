//! Merges a sequence of signed distance images into one.
//!
//! Only neighbours in the sequence interact: each consecutive pair
//! is blended on its own, then the pair blends are averaged.
//! Reordering the inputs therefore changes the result.

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::signed_distance_image::SignedDistanceImage;


/// Blends every consecutive pair of fields and averages the pair blends.
/// Requires at least two fields, all of the same dimensions.
pub fn blend(fields: &[SignedDistanceImage]) -> Result<SignedDistanceImage> {
    check_blend_inputs(fields)?;

    let (width, height) = fields[0].dimensions();
    let pair_count = fields.len() - 1;

    let pairs: Vec<SignedDistanceImage> = fields
        .par_windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let start = Instant::now();
            let blended = blend_pair(&pair[0], &pair[1]);
            debug!("blended pair {}-{} in {:?}", index, index + 1, start.elapsed());
            blended
        })
        .collect();

    let mut sums = vec![0_u32; width as usize * height as usize];
    for pair in &pairs {
        for (sum, value) in sums.iter_mut().zip(pair.values()) {
            *sum += *value as u32;
        }
    }

    let values = sums.into_iter()
        .map(|sum| (sum as f64 / pair_count as f64).max(0.0).min(255.0).round() as u8)
        .collect();

    debug!("blended {} fields of {}x{} pixels ({} pairs)", fields.len(), width, height, pair_count);
    SignedDistanceImage::from_raw(width, height, values)
}

/// Blends two fields of equal dimensions. Each pixel stores the
/// `pairwise_weight` of the two decoded distances, scaled to a byte.
pub fn blend_pair(a: &SignedDistanceImage, b: &SignedDistanceImage) -> SignedDistanceImage {
    debug_assert_eq!(a.dimensions(), b.dimensions(), "field dimension mismatch");

    SignedDistanceImage::from_fn(a.width(), a.height(), |x, y| {
        let weight = pairwise_weight(a.get_signed(x, y), b.get_signed(x, y));
        (weight * 255.0) as u8
    })
}

/// How much a pixel is attributed to the transition from shape `a` to shape `b`,
/// given both signed distances in `[-1, 1]`.
///
/// Overlapping pixels, inside both shapes, fall through to zero.
/// Both-outside pixels never reach that branch, as outside of `a` is checked first.
pub fn pairwise_weight(signed_a: f64, signed_b: f64) -> f64 {
    if signed_a < 0.0 {
        1.0
    }
    else if signed_b > 0.0 {
        0.0
    }
    else if signed_a > 0.0 && signed_b < 0.0 {
        let distance_a = signed_a.abs();
        let distance_b = signed_b.abs();
        distance_b / (distance_a + distance_b)
    }
    else {
        0.0
    }
}

fn check_blend_inputs(fields: &[SignedDistanceImage]) -> Result<()> {
    if fields.len() < 2 {
        return Err(Error::InsufficientInputs { given: fields.len() });
    }

    let expected = fields[0].dimensions();
    for (index, field) in fields.iter().enumerate().skip(1) {
        if field.dimensions() != expected {
            return Err(Error::InvalidDimensions(format!(
                "field {} is {}x{} pixels, but field 0 is {}x{} pixels",
                index, field.width(), field.height(), expected.0, expected.1
            )));
        }
    }

    Ok(())
}
