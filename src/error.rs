//! Error types for the frame-inpaint crate.

use std::path::PathBuf;

use crate::config::InpaintMethod;

/// Errors that abort a batch or a library call.
///
/// Per-frame conditions the batch recovers from (missing mask, undecodable
/// input, size mismatch) are not errors; they are reported as
/// [`SkipReason`](crate::SkipReason)s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The frame directory does not exist.
    #[error("frame directory does not exist: {}", .0.display())]
    FrameDirMissing(PathBuf),

    /// The mask to propagate across all frames does not exist.
    #[error("source mask does not exist: {}", .0.display())]
    MaskSourceMissing(PathBuf),

    /// The output directory resolves to the frame directory.
    #[error("output directory would overwrite input frames: {}", .0.display())]
    OutputOverlapsInput(PathBuf),

    /// Encoding or writing an output frame failed.
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying codec or I/O error.
        source: image::ImageError,
    },

    /// Image and mask dimensions differ.
    #[error(
        "mask is {}x{} but image is {}x{}",
        mask.0,
        mask.1,
        image.0,
        image.1
    )]
    DimensionMismatch {
        /// Image width and height.
        image: (u32, u32),
        /// Mask width and height.
        mask: (u32, u32),
    },

    /// The requested inpainting method is not available.
    #[error("{0} inpainting is not supported")]
    UnsupportedMethod(InpaintMethod),

    /// The inpainting routine failed.
    #[error("inpainting failed: {0}")]
    Inpaint(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
