//! The eight-points sequential euclidean distance transform (8SSEDT).
//!
//! Every cell of a grid stores the displacement to the nearest seed
//! discovered so far. Two sweeps over the grid propagate these
//! displacements from neighbour to neighbour, which approximates
//! the euclidean distance to the nearest seed for every cell.

use crate::binary_image::BinaryImage;


/// Displacement from a cell to the nearest seed known so far.
/// Compared by squared length only, the square root is
/// taken once per cell after the transform has finished.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct OwnerVector {
    pub dx: i32,
    pub dy: i32,
}

impl OwnerVector {
    /// The cell itself is a seed.
    pub const INSIDE: OwnerVector = OwnerVector { dx: 0, dy: 0 };

    /// No seed has been discovered for this cell yet.
    /// Its squared length exceeds every distance possible within a grid.
    pub const FAR: OwnerVector = OwnerVector { dx: FAR_COMPONENT, dy: FAR_COMPONENT };

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        OwnerVector { dx, dy }
    }

    #[inline]
    pub fn dist_sq(self) -> i64 {
        let dx = self.dx as i64;
        let dy = self.dy as i64;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self) -> f64 {
        (self.dist_sq() as f64).sqrt()
    }

    #[inline]
    pub fn is_far(self) -> bool {
        self == OwnerVector::FAR
    }

    /// The vector as seen from a cell whose neighbour at `offset` holds this vector.
    #[inline]
    fn offset_by(self, (offset_x, offset_y): (i32, i32)) -> Self {
        OwnerVector { dx: self.dx + offset_x, dy: self.dy + offset_y }
    }
}

const FAR_COMPONENT: i32 = 1 << 24;


/// Neighbours already visited by the top-to-bottom, left-to-right sweep.
pub const FORWARD_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (-1, -1), (1, -1)];

/// Completes a row of the forward sweep, scanning right-to-left.
pub const FORWARD_ROW_OFFSETS: [(i32, i32); 1] = [(1, 0)];

/// Neighbours already visited by the bottom-to-top, right-to-left sweep.
pub const BACKWARD_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 1), (1, 1)];

/// Completes a row of the backward sweep, scanning left-to-right.
pub const BACKWARD_ROW_OFFSETS: [(i32, i32); 1] = [(-1, 0)];


/// A rectangular, row-major grid of owner vectors.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OwnerVectorGrid {
    width: u32,
    height: u32,
    vectors: Vec<OwnerVector>,
}

impl OwnerVectorGrid {

    /// A grid with every cell set to the specified vector.
    pub fn filled(width: u32, height: u32, vector: OwnerVector) -> Self {
        OwnerVectorGrid {
            width, height,
            vectors: vec![vector; width as usize * height as usize],
        }
    }

    /// Seeds every cell where `is_seed` returns true with `INSIDE`
    /// and every other cell with `FAR`.
    pub fn seeded(width: u32, height: u32, is_seed: impl Fn(u32, u32) -> bool) -> Self {
        let mut vectors = Vec::with_capacity(width as usize * height as usize);

        for y in 0..height {
            for x in 0..width {
                vectors.push(if is_seed(x, y) { OwnerVector::INSIDE } else { OwnerVector::FAR });
            }
        }

        OwnerVectorGrid { width, height, vectors }
    }

    /// Seeded at the background pixels. After the transform,
    /// each cell holds the distance to the nearest background pixel.
    pub fn seed_outside(image: &impl BinaryImage) -> Self {
        Self::seeded(image.width(), image.height(), |x, y| !image.is_inside(x, y))
    }

    /// Seeded at the foreground pixels. After the transform,
    /// each cell holds the distance to the nearest foreground pixel.
    pub fn seed_inside(image: &impl BinaryImage) -> Self {
        Self::seeded(image.width(), image.height(), |x, y| image.is_inside(x, y))
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
    pub fn vectors(&self) -> &[OwnerVector] {
        &self.vectors
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> OwnerVector {
        self.vectors[self.flatten_index(x, y)]
    }

    /// True if no cell of this grid has found a seed.
    pub fn is_all_far(&self) -> bool {
        self.vectors.iter().all(|vector| vector.is_far())
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }

    /// Runs both sweeps of the 8SSEDT, in place.
    pub fn transform(&mut self) {
        let (width, height) = (self.width as i64, self.height as i64);

        // forward sweep, top to bottom
        for y in 0..height {
            for x in 0..width {
                self.relax(x, y, &FORWARD_OFFSETS);
            }

            for x in (0..width).rev() {
                self.relax(x, y, &FORWARD_ROW_OFFSETS);
            }
        }

        // backward sweep, bottom to top
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                self.relax(x, y, &BACKWARD_OFFSETS);
            }

            for x in 0..width {
                self.relax(x, y, &BACKWARD_ROW_OFFSETS);
            }
        }
    }

    /// Consumes the grid and returns it transformed.
    pub fn transformed(mut self) -> Self {
        self.transform();
        self
    }

    /// Replaces the vector at the cell by the shortest candidate
    /// obtained from the neighbours at the specified offsets.
    #[inline(always)]
    fn relax(&mut self, x: i64, y: i64, offsets: &[(i32, i32)]) {
        let index = self.width as usize * y as usize + x as usize;
        let mut own = self.vectors[index];
        let mut own_dist_sq = own.dist_sq();

        for &offset in offsets {
            if let Some(candidate) = self.candidate(x, y, offset) {
                let candidate_dist_sq = candidate.dist_sq();

                // ties keep the existing vector
                if candidate_dist_sq < own_dist_sq {
                    own = candidate;
                    own_dist_sq = candidate_dist_sq;
                }
            }
        }

        self.vectors[index] = own;
    }

    /// The neighbour's vector, adjusted to start at this cell.
    /// Neighbours outside the grid or without a seed offer no candidate.
    #[inline(always)]
    fn candidate(&self, x: i64, y: i64, offset: (i32, i32)) -> Option<OwnerVector> {
        let neighbour_x = x + offset.0 as i64;
        let neighbour_y = y + offset.1 as i64;

        if !check_coordinates(neighbour_x, neighbour_y, self.width, self.height) {
            return None;
        }

        let neighbour = self.vectors[self.width as usize * neighbour_y as usize + neighbour_x as usize];
        if neighbour.is_far() { None } else { Some(neighbour.offset_by(offset)) }
    }
}

/// Seeds the outside and inside grids of a binary image, in that order.
pub fn classify(image: &impl BinaryImage) -> (OwnerVectorGrid, OwnerVectorGrid) {
    (OwnerVectorGrid::seed_outside(image), OwnerVectorGrid::seed_inside(image))
}

#[inline]
fn check_coordinates(x: i64, y: i64, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && x < width as i64 && y < height as i64
}
