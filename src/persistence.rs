// src/persistence.rs
//
// Serializes the assembled output to its fixed location inside the data
// directory. The nested structure is the contract with downstream
// consumers; there is no schema negotiation.

use crate::error::{PipelineError, Result};
use crate::types::SequenceMasks;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output artifact filename inside the data directory.
pub const OUTPUT_FILE: &str = "tracks_w_masks.json";

/// Write the ordered sequence list as a single JSON artifact, returning
/// the path written. Ordered maps keep re-runs on unchanged inputs
/// byte-identical.
pub fn save(output: &[SequenceMasks], data_dir: &Path) -> Result<PathBuf> {
    let path = data_dir.join(OUTPUT_FILE);
    let file = File::create(&path).map_err(|source| PipelineError::Io {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, output)?;
    writer.flush().map_err(|source| PipelineError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MaskSummary;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn sample_output() -> Vec<SequenceMasks> {
        let mut sequence = BTreeMap::new();
        sequence.insert(
            0,
            vec![MaskSummary {
                id: 0,
                score_dist: vec![0.25, 0.75],
            }],
        );
        sequence.insert(2, Vec::new());
        vec![sequence, BTreeMap::new()]
    }

    #[test]
    fn test_save_writes_expected_structure() {
        let dir = TempDir::new().unwrap();
        let path = save(&sample_output(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), OUTPUT_FILE);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            r#"[{"0":[{"id":0,"score_dist":[0.25,0.75]}],"2":[]},{}]"#
        );
    }

    #[test]
    fn test_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let output = sample_output();
        let path = save(&output, dir.path()).unwrap();

        let reloaded: Vec<SequenceMasks> =
            serde_json::from_reader(fs::File::open(path).unwrap()).unwrap();
        assert_eq!(reloaded, output);
    }

    #[test]
    fn test_save_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let output = sample_output();
        let path = save(&output, dir.path()).unwrap();
        let first = fs::read(&path).unwrap();
        let path = save(&output, dir.path()).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
