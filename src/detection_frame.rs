// src/detection_frame.rs
//
// One frame's detector output, consumed as a serialized artifact: class
// ids, per-detection class-probability distributions, and the H x W x N
// boolean indicator volume marking which pixels belong to which
// detection. On disk each frame is a single NPZ archive of the three
// arrays, keyed by frame id + 1:
//
// ```text
// <data_dir>/
//   tracks.csv
//   mrcnn/
//     000001.jpg.npz    # class_ids [N], score_dist [N, C], masks [H, W, N]
//     000002.jpg.npz
//     ...
// ```

use crate::error::{PipelineError, Result};
use ndarray::{Array1, Array2, Array3};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Subdirectory of the data directory holding per-frame artifacts.
pub const MASK_SUBDIR: &str = "mrcnn";

#[derive(Debug)]
pub struct DetectionFrame {
    pub class_ids: Array1<i64>,
    pub score_dist: Array2<f32>,
    pub masks: Array3<bool>,
}

impl DetectionFrame {
    /// Load a frame artifact, validating that the three arrays agree on
    /// the detection count.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut npz = NpzReader::new(file).map_err(|e| artifact_error(path, e))?;
        let class_ids: Array1<i64> = npz
            .by_name("class_ids.npy")
            .map_err(|e| artifact_error(path, e))?;
        let score_dist: Array2<f32> = npz
            .by_name("score_dist.npy")
            .map_err(|e| artifact_error(path, e))?;
        let masks: Array3<bool> = npz
            .by_name("masks.npy")
            .map_err(|e| artifact_error(path, e))?;

        let detections = class_ids.len();
        if score_dist.nrows() != detections || masks.dim().2 != detections {
            return Err(PipelineError::Artifact {
                path: path.to_path_buf(),
                message: format!(
                    "detection counts disagree: {} class ids, {} score rows, {} mask layers",
                    detections,
                    score_dist.nrows(),
                    masks.dim().2
                ),
            });
        }
        Ok(Self {
            class_ids,
            score_dist,
            masks,
        })
    }

    /// Write this frame as an NPZ artifact at `path`. The inverse of
    /// [`DetectionFrame::load`]; lets synthetic detectors and test
    /// fixtures produce artifacts in the on-disk format. Does not
    /// validate shapes, so `load` can be exercised against malformed
    /// archives.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut npz = NpzWriter::new(file);
        npz.add_array("class_ids", &self.class_ids)
            .map_err(|e| artifact_error(path, e))?;
        npz.add_array("score_dist", &self.score_dist)
            .map_err(|e| artifact_error(path, e))?;
        npz.add_array("masks", &self.masks)
            .map_err(|e| artifact_error(path, e))?;
        npz.finish().map_err(|e| artifact_error(path, e))?;
        Ok(())
    }

    /// Number of detections in this frame.
    pub fn detections(&self) -> usize {
        self.class_ids.len()
    }

    /// Membership test for `detection` at pixel (x, y).
    ///
    /// The indicator volume is indexed (row = y, column = x, detection).
    /// Coordinates outside the volume are a definite "not covered",
    /// never an error.
    pub fn covers(&self, detection: usize, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (height, width, _) = self.masks.dim();
        let (row, col) = (y as usize, x as usize);
        if row >= height || col >= width {
            return false;
        }
        self.masks[[row, col, detection]]
    }

    /// The class-probability distribution of one detection.
    pub fn score_row(&self, detection: usize) -> Vec<f32> {
        self.score_dist.row(detection).to_vec()
    }
}

/// Artifact path for a frame: 6-digit zero-padded frame id + 1 under the
/// detector's output subdirectory.
pub fn artifact_path(data_dir: &Path, frame_id: usize) -> PathBuf {
    data_dir
        .join(MASK_SUBDIR)
        .join(format!("{:06}.jpg.npz", frame_id + 1))
}

fn artifact_error(path: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Artifact {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};
    use tempfile::TempDir;

    fn frame_with_mask(masks: Array3<bool>) -> DetectionFrame {
        let detections = masks.dim().2;
        DetectionFrame {
            class_ids: Array1::from(vec![1_i64; detections]),
            score_dist: Array2::zeros((detections, 4)),
            masks,
        }
    }

    #[test]
    fn test_covers_uses_row_y_col_x_axis_order() {
        // Single true cell at (row=5, col=3): covers y=5,x=3 only.
        let mut masks = Array3::from_elem((10, 10, 1), false);
        masks[[5, 3, 0]] = true;
        let frame = frame_with_mask(masks);

        assert!(frame.covers(0, 3, 5));
        assert!(!frame.covers(0, 5, 3));
        assert!(!frame.covers(0, 2, 3));
    }

    #[test]
    fn test_out_of_range_coordinates_are_not_covered() {
        let masks = Array3::from_elem((100, 100, 1), true);
        let frame = frame_with_mask(masks);

        assert!(frame.covers(0, 99, 99));
        assert!(!frame.covers(0, 100, 50));
        assert!(!frame.covers(0, 50, 100));
        assert!(!frame.covers(0, 10000, 10));
        assert!(!frame.covers(0, -1, 10));
        assert!(!frame.covers(0, 10, -3));
    }

    #[test]
    fn test_score_row_returns_matching_distribution() {
        let frame = DetectionFrame {
            class_ids: array![3_i64, 7],
            score_dist: array![[0.1_f32, 0.9], [0.6, 0.4]],
            masks: Array3::from_elem((2, 2, 2), false),
        };
        assert_eq!(frame.score_row(0), vec![0.1, 0.9]);
        assert_eq!(frame.score_row(1), vec![0.6, 0.4]);
    }

    #[test]
    fn test_artifact_path_is_one_based_zero_padded() {
        let path = artifact_path(Path::new("/data"), 0);
        assert_eq!(path, Path::new("/data/mrcnn/000001.jpg.npz"));
        let path = artifact_path(Path::new("/data"), 41);
        assert_eq!(path, Path::new("/data/mrcnn/000042.jpg.npz"));
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let err = DetectionFrame::load(Path::new("/nonexistent/000001.jpg.npz")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_score_row_count_must_match_class_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000001.jpg.npz");
        // Two class ids but only one score row.
        let frame = DetectionFrame {
            class_ids: array![1_i64, 2],
            score_dist: array![[0.5_f32, 0.5]],
            masks: Array3::from_elem((4, 4, 2), false),
        };
        frame.save(&path).unwrap();

        let err = DetectionFrame::load(&path).unwrap_err();
        match err {
            PipelineError::Artifact { message, .. } => {
                assert!(message.contains("detection counts disagree"), "{message}");
            }
            other => panic!("expected Artifact, got {other:?}"),
        }
    }

    #[test]
    fn test_mask_layer_count_must_match_class_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000001.jpg.npz");
        // Two class ids and score rows but a single mask layer.
        let frame = DetectionFrame {
            class_ids: array![1_i64, 2],
            score_dist: array![[0.5_f32, 0.5], [0.1, 0.9]],
            masks: Array3::from_elem((4, 4, 1), false),
        };
        frame.save(&path).unwrap();

        let err = DetectionFrame::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Artifact { .. }));
    }

    #[test]
    fn test_corrupt_archive_is_artifact_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("000001.jpg.npz");
        std::fs::write(&path, b"not an npz archive").unwrap();

        let err = DetectionFrame::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Artifact { .. }));
    }
}
