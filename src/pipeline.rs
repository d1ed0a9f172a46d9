// src/pipeline.rs
//
// Sequential orchestration of the four stages: parse the track table,
// assign mask candidates, assemble the per-sequence output, persist it.
// Aborts on the first error; the output artifact is only written when
// every prior stage has succeeded.

use crate::error::Result;
use crate::{mask_assigner, persistence, sequence_assembler, track_loader};
use std::path::Path;
use tracing::info;

/// Input track table filename inside the data directory.
pub const TRACK_TABLE: &str = "tracks.csv";

/// Summary counters for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub sequences: usize,
    pub points: usize,
    pub frames_with_points: usize,
    pub candidates: usize,
}

/// Run the full pipeline over one data directory.
pub fn run(data_dir: &Path) -> Result<RunStats> {
    let table = data_dir.join(TRACK_TABLE);
    info!("Loading track table: {}", table.display());
    let mut tracks = track_loader::parse(&table)?;
    info!(
        "✓ {} sequence(s), {} point(s) across {} frame(s)",
        tracks.sequences.len(),
        tracks.points.len(),
        tracks.frame_count
    );

    mask_assigner::assign(&mut tracks, data_dir)?;
    let candidates: usize = tracks.points.iter().map(|p| p.masks.len()).sum();
    info!("✓ {} mask candidate(s) attached", candidates);

    let output = sequence_assembler::assemble(&tracks);
    let stats = RunStats {
        sequences: output.len(),
        points: tracks.points.len(),
        frames_with_points: tracks.frames.iter().filter(|f| !f.is_empty()).count(),
        candidates,
    };

    let path = persistence::save(&output, data_dir)?;
    info!("✓ Output written: {}", path.display());
    Ok(stats)
}
