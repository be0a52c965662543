/// Temporal join of INMET station readings with fire-detection records.
///
/// The station table drives the join: for every station row whose
/// (date, hour) key has at least one eligible detection, one output row
/// is emitted per detection — station columns first, then the projected
/// detection columns under a configurable prefix. Station rows with no
/// match, or whose timestamp fails to parse, emit nothing.
///
/// Detections are eligible only when their locality fold-matches the
/// configured target; they are indexed by hour key in an explicit
/// ordered multimap (`HourIndex`) so the fan-out semantics stay
/// auditable in isolation.

pub mod hour_index;

use std::collections::HashSet;

use crate::config::MergeConfig;
use crate::logging::{self, Tool};
use crate::model::{PrepError, Table};
use crate::textnorm;
use crate::timeparse;

use hour_index::HourIndex;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate counts for one merge run. Row-level problems never abort
/// the join; they end up here and in the summary log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSummary {
    /// Station rows read.
    pub station_rows: usize,
    /// Detection rows read (before any filtering).
    pub detection_rows: usize,
    /// Detection rows surviving the locality filter with a parseable key.
    pub eligible_detections: usize,
    /// Distinct hours present in the detection index.
    pub distinct_hours: usize,
    /// Output rows emitted.
    pub rows_written: usize,
    /// Station rows dropped for an unparseable timestamp.
    pub station_skipped: usize,
    /// Locality-matched detection rows dropped for an unparseable timestamp.
    pub detection_skipped: usize,
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Join `station` against `detections` under `cfg`.
///
/// Structural preconditions (hard failures): the station table must
/// carry its two leading key columns, and the detection table must have
/// `data` and `hora_utc` columns. A missing locality column is not
/// structural — every detection then folds to an empty locality and
/// nothing matches.
pub fn merge_tables(
    station: &Table,
    detections: &Table,
    cfg: &MergeConfig,
) -> Result<(Table, MergeSummary), PrepError> {
    if station.header.len() < 2 {
        return Err(PrepError::MissingColumn {
            file: "station input".to_string(),
            column: "Data/Hora".to_string(),
        });
    }
    let det_date_idx = detections.find_column("data").ok_or_else(|| PrepError::MissingColumn {
        file: "detection input".to_string(),
        column: "data".to_string(),
    })?;
    let det_hour_idx =
        detections.find_column("hora_utc").ok_or_else(|| PrepError::MissingColumn {
            file: "detection input".to_string(),
            column: "hora_utc".to_string(),
        })?;
    let locality_idx = detections.find_column("municipio");

    let mut summary = MergeSummary {
        station_rows: station.rows.len(),
        detection_rows: detections.rows.len(),
        ..MergeSummary::default()
    };

    // Project away excluded detection columns before anything is indexed.
    let excluded: HashSet<String> =
        cfg.excluded_columns.iter().map(|c| textnorm::fold_compact(c)).collect();
    let kept_columns: Vec<usize> = (0..detections.header.len())
        .filter(|&i| !excluded.contains(&textnorm::fold_compact(&detections.header[i])))
        .collect();

    // Index eligible detections by hour key.
    let target = textnorm::fold(&cfg.locality);
    let mut index = HourIndex::new();
    for (line, row) in detections.rows.iter().enumerate() {
        let locality = match locality_idx {
            Some(idx) => detections.cell(row, idx),
            None => "",
        };
        if textnorm::fold(locality) != target {
            continue;
        }
        let key = match timeparse::parse_detection_key(
            detections.cell(row, det_date_idx),
            detections.cell(row, det_hour_idx),
        ) {
            Some(key) => key,
            None => {
                summary.detection_skipped += 1;
                if cfg.report_skipped_rows {
                    logging::debug(
                        Tool::Merge,
                        &format!("detection row {} skipped: unparseable timestamp", line + 2),
                    );
                }
                continue;
            }
        };
        let projected: Vec<String> =
            kept_columns.iter().map(|&i| detections.cell(row, i).to_string()).collect();
        index.insert(key, projected);
        summary.eligible_detections += 1;
    }
    summary.distinct_hours = index.distinct_hours();

    // Output header: station columns, then prefixed detection columns.
    let mut header = station.header.clone();
    header.extend(
        kept_columns
            .iter()
            .map(|&i| format!("{}{}", cfg.prefix, detections.header[i])),
    );

    // Drive the join from the station side, in input order.
    let mut rows = Vec::new();
    for (line, row) in station.rows.iter().enumerate() {
        let key = match timeparse::parse_station_key(
            station.cell(row, 0),
            station.cell(row, 1),
        ) {
            Some(key) => key,
            None => {
                summary.station_skipped += 1;
                if cfg.report_skipped_rows {
                    logging::debug(
                        Tool::Merge,
                        &format!("station row {} skipped: unparseable timestamp", line + 2),
                    );
                }
                continue;
            }
        };
        let Some(matches) = index.get(&key) else {
            continue;
        };
        for detection in matches {
            let mut out: Vec<String> = (0..station.header.len())
                .map(|i| station.cell(row, i).to_string())
                .collect();
            out.extend(detection.iter().cloned());
            rows.push(out);
        }
        summary.rows_written += matches.len();
    }

    Ok((Table::new(header, rows), summary))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
