use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;

use frame_inpaint::frames::mask_path_for;
use frame_inpaint::{list_frames, propagate_mask, FrameInpainter, InpaintConfig, InpaintMethod};

#[derive(Parser)]
#[command(
    name = "frame-inpaint",
    about = "Remove masked regions from video frames with fast marching inpainting",
    version,
    after_help = "Simple usage: frame-inpaint  (frames/ + masks/ -> edited_frames/)\n\n\
                  Each frame needs a mask with the same filename. Non-zero mask pixels\n\
                  are reconstructed; frames without a mask are skipped."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory of input frames (.jpg/.png)
    #[arg(long, global = true, default_value = "frames")]
    frames: PathBuf,

    /// Directory of masks, one per frame with the same filename
    #[arg(long, global = true, default_value = "masks")]
    masks: PathBuf,

    /// Directory for inpainted frames
    #[arg(short, long, global = true, default_value = "edited_frames")]
    output: PathBuf,

    /// Inpainting neighborhood radius in pixels (1-100)
    #[arg(short, long, global = true, default_value_t = 3)]
    radius: u32,

    /// Inpainting algorithm (only telea is implemented)
    #[arg(short, long, global = true, value_enum, default_value_t = InpaintMethod::Telea)]
    method: InpaintMethod,

    /// Process frames one at a time
    #[arg(long, global = true)]
    sequential: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report skipped frames and the final summary
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Inpaint every frame that has a mask (default)
    Run,
    /// List frames in processing order and whether each has a mask
    List,
    /// Copy one mask to every frame's mask slot
    ApplyMask {
        /// Mask to copy (e.g. masks/frame-001.png)
        source: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = InpaintConfig {
        frame_dir: cli.frames,
        mask_dir: cli.masks,
        output_dir: cli.output,
        radius: cli.radius,
        method: cli.method,
        parallel: !cli.sequential,
    };

    let outcome = match &cli.command {
        None | Some(Command::Run) => run(config, cli.quiet),
        Some(Command::List) => list(&config),
        Some(Command::ApplyMask { source }) => apply_mask(source, &config),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(config: InpaintConfig, quiet: bool) -> frame_inpaint::Result<()> {
    let inpainter = FrameInpainter::new(config)?;
    let summary = inpainter.process_all_with(|report| {
        if !(quiet && report.is_inpainted()) {
            println!("{report}");
        }
    })?;

    println!("{summary}");
    Ok(())
}

fn list(config: &InpaintConfig) -> frame_inpaint::Result<()> {
    let frames = list_frames(&config.frame_dir)?;
    let mut with_mask = 0usize;

    for frame in &frames {
        let Some(name) = frame.file_name() else {
            continue;
        };
        let has_mask = mask_path_for(&config.mask_dir, name).is_file();
        if has_mask {
            with_mask += 1;
        }
        println!(
            "{} {}",
            if has_mask { "[mask]   " } else { "[no mask]" },
            name.to_string_lossy()
        );
    }

    println!("{} frames, {with_mask} with masks", frames.len());
    Ok(())
}

fn apply_mask(source: &Path, config: &InpaintConfig) -> frame_inpaint::Result<()> {
    let written = propagate_mask(source, &config.frame_dir, &config.mask_dir)?;
    println!(
        "Applied mask from {} to {written} frames.",
        source.file_name().map_or_else(
            || source.display().to_string(),
            |f| f.to_string_lossy().to_string()
        )
    );
    Ok(())
}
