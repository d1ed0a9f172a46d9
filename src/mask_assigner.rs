// src/mask_assigner.rs
//
// Attaches mask candidates to the parsed points, one frame at a time.

use crate::detection_frame::{artifact_path, DetectionFrame};
use crate::error::Result;
use crate::types::{MaskCandidate, TrackSet};
use std::path::Path;
use tracing::debug;

/// Walk every frame that has registered points, load its detection
/// artifact, and append a [`MaskCandidate`] to each point covered by a
/// detection. Candidates accumulate in detector enumeration order, so
/// overlapping detections all attach.
///
/// Frames with no registered points are skipped without touching their
/// artifact; a missing or undeserializable artifact for a frame that
/// does have points is fatal. Each frame's arrays drop at the end of its
/// iteration, so peak memory is one frame's detection data.
pub fn assign(tracks: &mut TrackSet, data_dir: &Path) -> Result<()> {
    for frame_id in 0..tracks.frame_count {
        if tracks.frames[frame_id].is_empty() {
            continue;
        }
        let path = artifact_path(data_dir, frame_id);
        let frame = DetectionFrame::load(&path)?;

        let point_ids = tracks.frames[frame_id].clone();
        let mut attached = 0usize;
        for detection in 0..frame.detections() {
            let score_dist = frame.score_row(detection);
            for &point_id in &point_ids {
                let point = &mut tracks.points[point_id];
                if frame.covers(detection, point.x, point.y) {
                    point.add_mask(MaskCandidate {
                        id: detection,
                        score_dist: score_dist.clone(),
                    });
                    attached += 1;
                }
            }
        }
        debug!(
            "Frame {}: {} detection(s), {} point(s), {} candidate(s) attached",
            frame_id,
            frame.detections(),
            point_ids.len(),
            attached
        );
    }
    Ok(())
}
