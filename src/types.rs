// src/types.rs
//
// Data model shared across the pipeline stages. Points live in a single
// arena on TrackSet; the sequence lists and the per-frame index hold
// indices into it, so the mask assigner can mutate points through the
// frame index while the assembler later reads them through the sequences.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of a [`Point`] in the `TrackSet` arena.
pub type PointId = usize;

/// One motion-tracking point: a pixel position in one frame of one
/// tracked sequence. Sequence membership lives in `TrackSet.sequences`,
/// not on the point. The mask list starts empty and grows only during
/// mask assignment; candidates are never removed.
#[derive(Debug, Clone)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub frame_id: usize,
    pub masks: Vec<MaskCandidate>,
}

impl Point {
    pub fn new(x: i32, y: i32, frame_id: usize) -> Self {
        Self {
            x,
            y,
            frame_id,
            masks: Vec::new(),
        }
    }

    pub fn add_mask(&mut self, mask: MaskCandidate) {
        self.masks.push(mask);
    }
}

/// One detection covering a point: the detection's 0-based index within
/// its frame plus its class-probability distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskCandidate {
    pub id: usize,
    pub score_dist: Vec<f32>,
}

/// Parsed track table: the point arena plus the two views over it.
#[derive(Debug, Default)]
pub struct TrackSet {
    pub points: Vec<Point>,
    /// Point ids per sequence, in table row order. Within a sequence,
    /// points ascend by frame id (frames are filled in order during
    /// parsing). A sequence may skip frames.
    pub sequences: Vec<Vec<PointId>>,
    /// Point ids per frame id, in row order. Transient: only the mask
    /// assigner reads this, it is never persisted.
    pub frames: Vec<Vec<PointId>>,
    /// Frame count fixed by the first row of the table; every row must
    /// agree on it.
    pub frame_count: usize,
}

/// Persisted projection of a [`MaskCandidate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskSummary {
    pub id: usize,
    pub score_dist: Vec<f32>,
}

/// Sparse frame -> candidates mapping for one sequence. Frames where the
/// sequence had no point are absent keys. BTreeMap keeps frame keys
/// ordered, so serialization is deterministic across runs.
pub type SequenceMasks = BTreeMap<usize, Vec<MaskSummary>>;
