//! Batch configuration.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Largest inpainting radius accepted, in pixels.
pub const MAX_RADIUS: u32 = 100;

/// Inpainting algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InpaintMethod {
    /// Telea's fast marching method.
    #[default]
    Telea,
    /// Navier-Stokes based inpainting. Accepted on the command line but
    /// rejected by [`InpaintConfig::validate`]: no implementation is
    /// available.
    #[cfg_attr(feature = "cli", value(name = "ns"))]
    NavierStokes,
}

impl fmt::Display for InpaintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telea => f.write_str("telea"),
            Self::NavierStokes => f.write_str("ns"),
        }
    }
}

/// Directories and inpainting parameters for one batch run.
#[derive(Debug, Clone)]
pub struct InpaintConfig {
    /// Directory holding the input frames.
    pub frame_dir: PathBuf,
    /// Directory holding one mask per frame, same filename.
    pub mask_dir: PathBuf,
    /// Directory receiving the inpainted frames.
    pub output_dir: PathBuf,
    /// Neighborhood radius in pixels.
    pub radius: u32,
    /// Algorithm variant.
    pub method: InpaintMethod,
    /// Inpaint frames in parallel when the `cli` feature is enabled.
    pub parallel: bool,
}

impl Default for InpaintConfig {
    fn default() -> Self {
        Self {
            frame_dir: PathBuf::from("frames"),
            mask_dir: PathBuf::from("masks"),
            output_dir: PathBuf::from("edited_frames"),
            radius: 3,
            method: InpaintMethod::Telea,
            parallel: true,
        }
    }
}

impl InpaintConfig {
    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for an empty directory path or a
    /// radius outside `1..=100`, and [`Error::UnsupportedMethod`] for
    /// [`InpaintMethod::NavierStokes`].
    pub fn validate(&self) -> Result<()> {
        if self.method != InpaintMethod::Telea {
            return Err(Error::UnsupportedMethod(self.method));
        }

        if !(1..=MAX_RADIUS).contains(&self.radius) {
            return Err(Error::InvalidConfig(format!(
                "radius must be between 1 and {MAX_RADIUS}, got {}",
                self.radius
            )));
        }

        for (name, dir) in [
            ("frame directory", &self.frame_dir),
            ("mask directory", &self.mask_dir),
            ("output directory", &self.output_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }
}
