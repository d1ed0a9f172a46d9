// src/sequence_assembler.rs
//
// Flattens the annotated TrackSet into the output structure: one sparse
// frame -> candidates mapping per sequence, in table row order.

use crate::types::{MaskSummary, SequenceMasks, TrackSet};

/// Reduce each sequence to its sparse frame mapping. A frame key exists
/// iff the sequence had a point there; a point no detection covered maps
/// to an empty list. Output index = sequence id.
pub fn assemble(tracks: &TrackSet) -> Vec<SequenceMasks> {
    tracks
        .sequences
        .iter()
        .map(|sequence| {
            sequence
                .iter()
                .map(|&point_id| {
                    let point = &tracks.points[point_id];
                    let summaries = point
                        .masks
                        .iter()
                        .map(|mask| MaskSummary {
                            id: mask.id,
                            score_dist: mask.score_dist.clone(),
                        })
                        .collect();
                    (point.frame_id, summaries)
                })
                .collect()
        })
        .collect()
}
