// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the fusion pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort the pipeline. The one deliberately swallowed
/// condition, an out-of-range coordinate during the membership test,
/// never surfaces here: it is an ordinary "not covered" outcome (see
/// [`crate::DetectionFrame::covers`]).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read track table")]
    Csv(#[from] csv::Error),

    #[error("track table row {row}: expected {expected} fields, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("track table row {row}, field {column}: invalid coordinate {value:?}")]
    Coordinate {
        row: usize,
        column: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("detection artifact {path}: {message}")]
    Artifact { path: PathBuf, message: String },

    #[error("failed to serialize output artifact")]
    Serialize(#[from] serde_json::Error),
}
