//! Frame discovery and frame/mask pairing.
//!
//! Frames and masks are paired purely by filename: the mask for
//! `frames/frame-001.png` is `masks/frame-001.png`, and the inpainted result
//! lands at `edited_frames/frame-001.png`.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Extensions recognized as frames.
const FRAME_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Check whether a path names a frame image (`.jpg` or `.png`).
///
/// The match is on the literal file name suffix, so `.JPG` or `.jpeg`
/// files are not frames.
#[must_use]
pub fn is_frame_image(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| FRAME_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// List the frames of a directory, sorted by file name.
///
/// Only regular files accepted by [`is_frame_image`] are returned.
///
/// # Errors
///
/// Returns [`Error::FrameDirMissing`] if `frame_dir` is not a directory, or
/// [`Error::Io`] if it cannot be read.
pub fn list_frames(frame_dir: &Path) -> Result<Vec<PathBuf>> {
    if !frame_dir.is_dir() {
        return Err(Error::FrameDirMissing(frame_dir.to_path_buf()));
    }

    let mut frames = Vec::new();
    for entry in fs::read_dir(frame_dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_frame_image(&path) {
            frames.push(path);
        }
    }
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!("found {} frames in {}", frames.len(), frame_dir.display());
    Ok(frames)
}

/// Path of the mask paired with a frame.
#[must_use]
pub fn mask_path_for(mask_dir: &Path, frame_name: &OsStr) -> PathBuf {
    mask_dir.join(frame_name)
}

/// Path the inpainted frame is written to.
#[must_use]
pub fn output_path_for(output_dir: &Path, frame_name: &OsStr) -> PathBuf {
    output_dir.join(frame_name)
}

/// Copy one mask onto every frame's mask slot.
///
/// Useful when a watermark sits at a fixed position: draw the mask once for
/// the first frame and reuse it for the rest. `mask_dir` is created if
/// missing, existing masks are overwritten, and `source` is never copied
/// onto itself. Returns the number of masks written.
///
/// # Errors
///
/// Returns [`Error::MaskSourceMissing`] if `source` is not a file,
/// [`Error::FrameDirMissing`] if `frame_dir` does not exist, or
/// [`Error::Io`] if a copy fails.
pub fn propagate_mask(source: &Path, frame_dir: &Path, mask_dir: &Path) -> Result<usize> {
    if !source.is_file() {
        return Err(Error::MaskSourceMissing(source.to_path_buf()));
    }

    let frames = list_frames(frame_dir)?;
    fs::create_dir_all(mask_dir)?;
    let source_abs = fs::canonicalize(source)?;

    let mut written = 0;
    for frame in &frames {
        let Some(name) = frame.file_name() else {
            continue;
        };
        let dest = mask_path_for(mask_dir, name);
        if fs::canonicalize(&dest).is_ok_and(|d| d == source_abs) {
            continue;
        }
        fs::copy(source, &dest)?;
        written += 1;
    }

    debug!(
        "copied {} to {written} mask slots in {}",
        source.display(),
        mask_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_frame_image_accepts_jpg_and_png() {
        assert!(is_frame_image(Path::new("frame-001.jpg")));
        assert!(is_frame_image(Path::new("frames/frame-001.png")));
    }

    #[test]
    fn is_frame_image_rejects_other_names() {
        assert!(!is_frame_image(Path::new("notes.txt")));
        assert!(!is_frame_image(Path::new("frame.jpeg")));
        assert!(!is_frame_image(Path::new("frame.PNG")));
        assert!(!is_frame_image(Path::new("frame")));
        assert!(!is_frame_image(Path::new("png")));
    }

    #[test]
    fn paired_paths_keep_filename() {
        let name = OsStr::new("frame-007.png");
        assert_eq!(
            mask_path_for(Path::new("masks"), name),
            PathBuf::from("masks/frame-007.png")
        );
        assert_eq!(
            output_path_for(Path::new("edited_frames"), name),
            PathBuf::from("edited_frames/frame-007.png")
        );
    }

    #[test]
    fn list_frames_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.png", "a.jpg", "b.png", "readme.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("d.png")).unwrap();

        let frames = list_frames(dir.path()).unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.jpg", "b.png", "c.png"]);
    }

    #[test]
    fn list_frames_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_frames(&missing),
            Err(Error::FrameDirMissing(p)) if p == missing
        ));
    }

    #[test]
    fn propagate_mask_fills_every_slot_but_source() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let masks = dir.path().join("masks");
        fs::create_dir(&frames).unwrap();
        fs::create_dir(&masks).unwrap();
        for name in ["frame-001.png", "frame-002.png", "frame-003.png"] {
            fs::write(frames.join(name), b"frame").unwrap();
        }
        let source = masks.join("frame-001.png");
        fs::write(&source, b"mask").unwrap();

        let written = propagate_mask(&source, &frames, &masks).unwrap();
        assert_eq!(written, 2);
        for name in ["frame-001.png", "frame-002.png", "frame-003.png"] {
            assert_eq!(fs::read(masks.join(name)).unwrap(), b"mask");
        }
    }

    #[test]
    fn propagate_mask_requires_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("missing.png");
        assert!(matches!(
            propagate_mask(&source, dir.path(), dir.path()),
            Err(Error::MaskSourceMissing(_))
        ));
    }
}
