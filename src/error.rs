//! Error type and result alias for the crate.
//!
//! Every variant is raised before any per-pixel work starts,
//! so a failed operation never leaves a partial result behind.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A zero-sized image, a buffer that does not match its dimensions,
    /// or fields of different sizes passed to the blender.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("at least two fields are required for blending, got {given}")]
    InsufficientInputs { given: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn zero_sized(width: u32, height: u32) -> Self {
        Error::InvalidDimensions(format!("image of {}x{} pixels is empty", width, height))
    }
}
