// src/lib.rs
//
// Track/mask fusion: joins per-frame instance-segmentation results with
// previously computed motion tracks, producing a per-track sequence of
// detected-class probability distributions keyed by frame.

pub mod detection_frame;
pub mod error;
pub mod mask_assigner;
pub mod persistence;
pub mod pipeline;
pub mod sequence_assembler;
pub mod track_loader;
pub mod types;

pub use detection_frame::DetectionFrame;
pub use error::{PipelineError, Result};
pub use pipeline::RunStats;
pub use types::{MaskCandidate, MaskSummary, Point, SequenceMasks, TrackSet};
