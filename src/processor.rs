//! Batch frame inpainting.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use log::{debug, info, warn};

use crate::config::InpaintConfig;
use crate::error::{Error, Result};
use crate::frames::{list_frames, mask_path_for, output_path_for};
use crate::inpaint::inpaint;

/// JPEG quality used when writing inpainted frames.
const JPEG_QUALITY: u8 = 95;

/// Why a frame was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No mask file with the frame's name exists.
    MissingMask {
        /// Where the mask was expected.
        mask: PathBuf,
    },
    /// The frame or its mask could not be decoded.
    Undecodable {
        /// The file that failed to decode.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },
    /// Frame and mask differ in size.
    DimensionMismatch {
        /// Frame width and height.
        frame: (u32, u32),
        /// Mask width and height.
        mask: (u32, u32),
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMask { mask } => write!(f, "mask not found at {}", mask.display()),
            Self::Undecodable { path, message } => {
                write!(f, "could not decode {}: {message}", path.display())
            }
            Self::DimensionMismatch { frame, mask } => write!(
                f,
                "mask size {}x{} does not match frame size {}x{}",
                mask.0, mask.1, frame.0, frame.1
            ),
        }
    }
}

/// What happened to one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was inpainted and written.
    Inpainted {
        /// Path of the written frame.
        output: PathBuf,
    },
    /// The frame was skipped; nothing was written for it.
    Skipped(SkipReason),
}

/// Result of processing a single frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Path of the input frame.
    pub frame: PathBuf,
    /// Outcome for this frame.
    pub outcome: FrameOutcome,
}

impl FrameReport {
    fn skipped(frame: &Path, reason: SkipReason) -> Self {
        warn!("skipping {}: {reason}", frame.display());
        Self {
            frame: frame.to_path_buf(),
            outcome: FrameOutcome::Skipped(reason),
        }
    }

    /// File name of the input frame, for diagnostics.
    #[must_use]
    pub fn frame_name(&self) -> String {
        self.frame.file_name().map_or_else(
            || self.frame.display().to_string(),
            |f| f.to_string_lossy().to_string(),
        )
    }

    /// Whether an output file was written.
    #[must_use]
    pub fn is_inpainted(&self) -> bool {
        matches!(self.outcome, FrameOutcome::Inpainted { .. })
    }
}

/// The user-facing diagnostic line for this frame.
impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FrameOutcome::Inpainted { output } => {
                write!(f, "Inpainted frame saved: {}", output.display())
            }
            FrameOutcome::Skipped(SkipReason::MissingMask { .. }) => {
                write!(f, "Mask not found for frame: {}, skipping.", self.frame_name())
            }
            FrameOutcome::Skipped(SkipReason::Undecodable { path, message }) => {
                write!(f, "Could not decode {}: {message}, skipping.", path.display())
            }
            FrameOutcome::Skipped(SkipReason::DimensionMismatch { frame, mask }) => write!(
                f,
                "Mask size {}x{} does not match frame size {}x{} for frame: {}, skipping.",
                mask.0,
                mask.1,
                frame.0,
                frame.1,
                self.frame_name()
            ),
        }
    }
}

/// Per-frame reports of a batch, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One report per frame, sorted by frame file name.
    pub reports: Vec<FrameReport>,
}

impl BatchSummary {
    /// Number of frames written.
    #[must_use]
    pub fn inpainted(&self) -> usize {
        self.reports.iter().filter(|r| r.is_inpainted()).count()
    }

    /// Number of frames skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.total() - self.inpainted()
    }

    /// Number of frames considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len()
    }
}

/// The completion line printed after a batch.
impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "All frames processed with inpainting! (inpainted: {}, skipped: {}, total: {})",
            self.inpainted(),
            self.skipped(),
            self.total()
        )
    }
}

/// Inpaints every frame of a directory with its same-named mask.
///
/// ```no_run
/// use frame_inpaint::{FrameInpainter, InpaintConfig};
///
/// let inpainter = FrameInpainter::new(InpaintConfig::default()).unwrap();
/// let summary = inpainter.process_all().unwrap();
/// println!("{} of {} frames inpainted", summary.inpainted(), summary.total());
/// ```
#[derive(Debug, Clone)]
pub struct FrameInpainter {
    config: InpaintConfig,
}

impl FrameInpainter {
    /// Create an inpainter for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration is rejected by
    /// [`InpaintConfig::validate`].
    pub fn new(config: InpaintConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &InpaintConfig {
        &self.config
    }

    /// Process one frame: pair, load, inpaint, save.
    ///
    /// A missing mask, an undecodable frame or mask, or a size mismatch
    /// yields a skipped report. The output directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputWrite`] if the inpainted frame cannot be
    /// written, or [`Error::UnsupportedFormat`] if `frame` has no file name.
    pub fn process_frame(&self, frame: &Path) -> Result<FrameReport> {
        let name = frame
            .file_name()
            .ok_or_else(|| Error::UnsupportedFormat(frame.display().to_string()))?;

        let mask_path = mask_path_for(&self.config.mask_dir, name);
        if !mask_path.is_file() {
            return Ok(FrameReport::skipped(
                frame,
                SkipReason::MissingMask { mask: mask_path },
            ));
        }

        debug!("loading {} with mask {}", frame.display(), mask_path.display());
        let image = match decode(frame) {
            Ok(img) => img.to_rgb8(),
            Err(e) => return Ok(FrameReport::skipped(frame, undecodable(frame, &e))),
        };
        let mask = match decode(&mask_path) {
            Ok(img) => img.to_luma8(),
            Err(e) => return Ok(FrameReport::skipped(frame, undecodable(&mask_path, &e))),
        };

        if image.dimensions() != mask.dimensions() {
            return Ok(FrameReport::skipped(
                frame,
                SkipReason::DimensionMismatch {
                    frame: image.dimensions(),
                    mask: mask.dimensions(),
                },
            ));
        }

        let inpainted = inpaint(&image, &mask, self.config.radius, self.config.method)?;

        let output = output_path_for(&self.config.output_dir, name);
        save_image(&inpainted, &output)?;
        debug!("wrote {}", output.display());

        Ok(FrameReport {
            frame: frame.to_path_buf(),
            outcome: FrameOutcome::Inpainted { output },
        })
    }

    /// Process every frame of the frame directory in file name order.
    ///
    /// Same as [`process_all_with`](Self::process_all_with) without a
    /// report callback.
    ///
    /// # Errors
    ///
    /// See [`process_all_with`](Self::process_all_with).
    pub fn process_all(&self) -> Result<BatchSummary> {
        self.process_all_with(|_| {})
    }

    /// Process every frame of the frame directory, handing each report to
    /// `on_report` as soon as it and every frame before it are done.
    ///
    /// Creates the output directory if needed. Frames run in parallel when
    /// the `cli` feature is enabled and [`InpaintConfig::parallel`] is set;
    /// `on_report` sees reports in file name order either way. When a write
    /// fails, the reports of frames already written are still delivered
    /// before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameDirMissing`] before touching anything if the
    /// frame directory does not exist, [`Error::OutputOverlapsInput`] if the
    /// output directory is the frame directory, and the first
    /// [`Error::OutputWrite`] encountered while saving.
    pub fn process_all_with<F>(&self, mut on_report: F) -> Result<BatchSummary>
    where
        F: FnMut(&FrameReport),
    {
        let frames = list_frames(&self.config.frame_dir)?;

        fs::create_dir_all(&self.config.output_dir)?;
        if fs::canonicalize(&self.config.output_dir)? == fs::canonicalize(&self.config.frame_dir)? {
            return Err(Error::OutputOverlapsInput(self.config.output_dir.clone()));
        }

        info!(
            "inpainting {} frames from {} (radius {}, method {})",
            frames.len(),
            self.config.frame_dir.display(),
            self.config.radius,
            self.config.method
        );

        let mut reports = Vec::with_capacity(frames.len());
        for chunk in frames.chunks(self.chunk_size()) {
            let mut failure = None;
            for result in self.run(chunk) {
                match result {
                    Ok(report) => {
                        on_report(&report);
                        reports.push(report);
                    }
                    Err(e) => {
                        failure.get_or_insert(e);
                    }
                }
            }
            if let Some(e) = failure {
                return Err(e);
            }
        }

        Ok(BatchSummary { reports })
    }

    /// Frames handed to [`run`](Self::run) at once.
    #[cfg(feature = "cli")]
    fn chunk_size(&self) -> usize {
        if self.config.parallel {
            rayon::current_num_threads().max(1)
        } else {
            1
        }
    }

    #[cfg(not(feature = "cli"))]
    fn chunk_size(&self) -> usize {
        1
    }

    #[cfg(feature = "cli")]
    fn run(&self, frames: &[PathBuf]) -> Vec<Result<FrameReport>> {
        use rayon::prelude::*;

        if self.config.parallel {
            frames.par_iter().map(|f| self.process_frame(f)).collect()
        } else {
            frames.iter().map(|f| self.process_frame(f)).collect()
        }
    }

    #[cfg(not(feature = "cli"))]
    fn run(&self, frames: &[PathBuf]) -> Vec<Result<FrameReport>> {
        frames.iter().map(|f| self.process_frame(f)).collect()
    }
}

/// Decode by content, falling back to the extension when sniffing fails.
fn decode(path: &Path) -> image::ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

fn undecodable(path: &Path, err: &image::ImageError) -> SkipReason {
    SkipReason::Undecodable {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Save an RGB frame in the format implied by its extension.
///
/// JPEG is written at quality 95, PNG losslessly.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for extensions other than JPEG and
/// PNG, or [`Error::OutputWrite`] if encoding or writing fails.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    let written = match format {
        ImageFormat::Jpeg => fs::File::create(path)
            .map_err(image::ImageError::IoError)
            .and_then(|file| {
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(file, JPEG_QUALITY);
                encoder.encode_image(img)
            }),
        ImageFormat::Png => img.save_with_format(path, ImageFormat::Png),
        _ => return Err(Error::UnsupportedFormat(format!("{format:?}"))),
    };

    written.map_err(|source| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
