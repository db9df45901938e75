//! Inpaint every masked frame of a directory.
//!
//! Usage:
//! ```sh
//! cargo run --example inpaint_frames -- frames/ masks/ edited_frames/
//! ```

use std::env;
use std::path::PathBuf;
use std::process;

use frame_inpaint::{FrameInpainter, InpaintConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <frames> <masks> <output>", args[0]);
        process::exit(1);
    }

    let config = InpaintConfig {
        frame_dir: PathBuf::from(&args[1]),
        mask_dir: PathBuf::from(&args[2]),
        output_dir: PathBuf::from(&args[3]),
        ..InpaintConfig::default()
    };

    let inpainter = FrameInpainter::new(config).expect("invalid configuration");
    match inpainter.process_all_with(|report| println!("{report}")) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
