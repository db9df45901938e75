//! Batch-inpaint video frames using per-frame masks.
//!
//! Every frame in a frame directory is paired with the mask of the same
//! filename in a mask directory. Non-zero mask pixels are reconstructed from
//! their surroundings with the `inpaint` crate's fast marching (Telea)
//! implementation, and the result
//! is written under the same filename to an output directory.
//!
//! # Quick Start
//!
//! ```no_run
//! use frame_inpaint::{FrameInpainter, InpaintConfig};
//!
//! let inpainter = FrameInpainter::new(InpaintConfig::default()).expect("invalid config");
//! let summary = inpainter
//!     .process_all_with(|report| println!("{report}"))
//!     .expect("batch failed");
//! println!("{summary}");
//! ```
//!
//! # Single images
//!
//! ```no_run
//! use frame_inpaint::{inpaint, InpaintMethod};
//!
//! let img = image::open("frame.png").unwrap().to_rgb8();
//! let mask = image::open("mask.png").unwrap().to_luma8();
//! let out = inpaint(&img, &mask, 3, InpaintMethod::Telea).unwrap();
//! out.save("clean.png").unwrap();
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod frames;
pub mod inpaint;
mod processor;

pub use config::{InpaintConfig, InpaintMethod};
pub use error::{Error, Result};
pub use frames::{is_frame_image, list_frames, propagate_mask};
pub use inpaint::inpaint;
pub use processor::{
    save_image, BatchSummary, FrameInpainter, FrameOutcome, FrameReport, SkipReason,
};
