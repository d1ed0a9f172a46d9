// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use track_mask_fusion::pipeline;
use tracing::info;

/// Merge per-frame instance-segmentation masks into motion-track
/// sequences and persist the result next to the inputs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding tracks.csv and the mrcnn/ artifact subdirectory
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("track_mask_fusion=info")
        .init();

    let args = Args::parse();
    info!("Track/mask fusion starting: {}", args.data_dir.display());

    let stats = pipeline::run(&args.data_dir)?;

    info!("Done:");
    info!("  Sequences: {}", stats.sequences);
    info!("  Points: {}", stats.points);
    info!("  Frames with points: {}", stats.frames_with_points);
    info!("  Mask candidates: {}", stats.candidates);
    Ok(())
}
