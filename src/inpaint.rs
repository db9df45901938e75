//! Mask-guided inpainting of a single image.
//!
//! Wraps the Telea fast marching implementation of the `inpaint` crate
//! ("An Image Inpainting Technique Based on the Fast Marching Method",
//! 2004): masked pixels are reconstructed from the known pixels within
//! `radius`, working inward from the mask boundary.

use image::{GrayImage, RgbImage};
use ::inpaint::prelude::*;

use crate::config::InpaintMethod;
use crate::error::{Error, Result};

/// Inpaint the masked region of an image.
///
/// Pixels where `mask` is non-zero are reconstructed; every other pixel is
/// returned unchanged. An empty mask returns a copy of the input.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `image` and `mask` differ in size,
/// [`Error::UnsupportedMethod`] for anything but [`InpaintMethod::Telea`],
/// and [`Error::Inpaint`] if the inpainting routine fails.
pub fn inpaint(
    image: &RgbImage,
    mask: &GrayImage,
    radius: u32,
    method: InpaintMethod,
) -> Result<RgbImage> {
    if image.dimensions() != mask.dimensions() {
        return Err(Error::DimensionMismatch {
            image: image.dimensions(),
            mask: mask.dimensions(),
        });
    }
    if method != InpaintMethod::Telea {
        return Err(Error::UnsupportedMethod(method));
    }
    if mask.as_raw().iter().all(|&v| v == 0) {
        return Ok(image.clone());
    }

    let radius = radius
        .try_into()
        .map_err(|_| Error::InvalidConfig(format!("radius {radius} out of range")))?;

    let mut output = image.clone();
    output
        .telea_inpaint(mask, radius)
        .map_err(|e| Error::Inpaint(format!("{e:?}")))?;
    Ok(output)
}
