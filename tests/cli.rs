#![cfg(feature = "cli")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("frames")).unwrap();
    fs::create_dir(dir.path().join("masks")).unwrap();
    dir
}

fn add_frame(root: &Path, name: &str, with_mask: bool) {
    RgbImage::from_fn(16, 12, |x, _| {
        if (4..10).contains(&x) {
            Rgb([255, 255, 255])
        } else {
            Rgb([90, 60, 30])
        }
    })
    .save(root.join("frames").join(name))
    .unwrap();
    if with_mask {
        GrayImage::from_fn(16, 12, |x, _| Luma([if (4..10).contains(&x) { 255 } else { 0 }]))
            .save(root.join("masks").join(name))
            .unwrap();
    }
}

fn frame_inpaint(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_frame-inpaint"))
        .args(args)
        .current_dir(root)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn prints_one_line_per_frame_then_summary() {
    let dir = workspace();
    add_frame(dir.path(), "a.jpg", true);
    add_frame(dir.path(), "b.jpg", false);

    let output = frame_inpaint(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        [
            "Inpainted frame saved: edited_frames/a.jpg",
            "Mask not found for frame: b.jpg, skipping.",
            "All frames processed with inpainting! (inpainted: 1, skipped: 1, total: 2)",
        ]
    );
    assert!(dir.path().join("edited_frames/a.jpg").is_file());
    assert!(!dir.path().join("edited_frames/b.jpg").exists());
}

#[test]
fn empty_frame_directory_prints_only_summary() {
    let dir = workspace();

    let output = frame_inpaint(dir.path(), &["run", "--sequential"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        ["All frames processed with inpainting! (inpainted: 0, skipped: 0, total: 0)"]
    );
}

#[test]
fn quiet_hides_written_frames_but_not_skips() {
    let dir = workspace();
    add_frame(dir.path(), "a.png", true);
    add_frame(dir.path(), "b.png", false);

    let output = frame_inpaint(dir.path(), &["--quiet"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        [
            "Mask not found for frame: b.png, skipping.",
            "All frames processed with inpainting! (inpainted: 1, skipped: 1, total: 2)",
        ]
    );
}

#[test]
fn write_failure_exits_nonzero_after_earlier_reports() {
    let dir = workspace();
    add_frame(dir.path(), "a.png", true);
    add_frame(dir.path(), "b.png", true);
    fs::create_dir_all(dir.path().join("edited_frames/b.png")).unwrap();

    let output = frame_inpaint(dir.path(), &["--sequential"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_lines(&output),
        ["Inpainted frame saved: edited_frames/a.png"]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: failed to write"), "{stderr}");
}

#[test]
fn navier_stokes_is_refused() {
    let dir = workspace();
    add_frame(dir.path(), "a.png", true);

    let output = frame_inpaint(dir.path(), &["--method", "ns"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ns inpainting is not supported"), "{stderr}");
    assert!(!dir.path().join("edited_frames").exists());
}

#[test]
fn missing_frame_directory_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    let output = frame_inpaint(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_lines(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frame directory does not exist"));
}
