// src/track_loader.rs
//
// Parses the track table into the TrackSet arena. One row per tracked
// sequence; each row holds alternating x, y decimal fields per frame
// slot, plus one trailing artifact field (from the row's trailing
// separator) that is discarded.

use crate::error::{PipelineError, Result};
use crate::types::{Point, TrackSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parse the track table at `path`.
///
/// The first row fixes the frame count (usable fields / 2); every later
/// row must carry the same usable field count or parsing fails. An empty
/// x field is the "no detection this frame" sentinel for that sequence
/// and produces no point.
pub fn parse(path: &Path) -> Result<TrackSet> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reader(file)
}

fn parse_reader<R: Read>(source: R) -> Result<TrackSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut tracks = TrackSet::default();
    let mut expected_fields: Option<usize> = None;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // The trailing separator leaves one empty artifact field per row.
        let usable = record.len().saturating_sub(1);

        let expected = *expected_fields.get_or_insert(usable);
        if usable != expected {
            return Err(PipelineError::RowWidth {
                row,
                expected,
                found: usable,
            });
        }
        if row == 0 {
            tracks.frame_count = usable / 2;
            tracks.frames = vec![Vec::new(); tracks.frame_count];
        }

        let mut sequence = Vec::new();
        for frame_id in 0..tracks.frame_count {
            let x_field = record.get(2 * frame_id).unwrap_or("");
            if x_field.is_empty() {
                continue;
            }
            let y_field = record.get(2 * frame_id + 1).unwrap_or("");
            let x = parse_coordinate(x_field, row, 2 * frame_id)?;
            let y = parse_coordinate(y_field, row, 2 * frame_id + 1)?;

            let point_id = tracks.points.len();
            tracks.points.push(Point::new(x, y, frame_id));
            sequence.push(point_id);
            tracks.frames[frame_id].push(point_id);
        }
        tracks.sequences.push(sequence);
    }

    debug!(
        "Parsed {} sequence(s), {} point(s), {} frame(s)",
        tracks.sequences.len(),
        tracks.points.len(),
        tracks.frame_count
    );
    Ok(tracks)
}

/// Parse a decimal coordinate and round it to the nearest pixel, ties to
/// even. The upstream tracker emits sub-pixel positions; half-to-even is
/// the rounding rule its consumers expect.
fn parse_coordinate(value: &str, row: usize, column: usize) -> Result<i32> {
    let parsed: f64 = value.parse().map_err(|source| PipelineError::Coordinate {
        row,
        column,
        value: value.to_string(),
        source,
    })?;
    Ok(parsed.round_ties_even() as i32)
}
