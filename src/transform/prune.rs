/// Column removal with timestamp-pair expansion.
///
/// Drops the configured columns (fold-insensitive match) and, when the
/// combined `data_pas` timestamp column is present, replaces it with a
/// (`data`, `hora_utc`) pair rounded to the nearest hour. The
/// round-to-nearest policy is exclusive to this split — the join's
/// floor-hour policy is a different animal and the two must not be
/// mixed on the same dataset side.

use std::collections::HashSet;

use crate::config::PruneConfig;
use crate::model::Table;
use crate::textnorm;
use crate::timeparse;

/// Result of a prune pass. `table` is `None` when none of the
/// configured columns were present — the caller reports a no-op and
/// leaves the input untouched.
#[derive(Debug)]
pub struct PruneOutcome {
    pub table: Option<Table>,
    /// Names of the columns that were removed, as spelled in the input.
    pub removed: Vec<String>,
    /// Whether the timestamp column was found and split.
    pub timestamp_split: bool,
    /// Non-empty timestamp cells that failed to parse (kept verbatim in
    /// the date column, with an empty hour).
    pub unparsed_timestamps: usize,
}

pub fn prune_columns(table: &Table, cfg: &PruneConfig) -> PruneOutcome {
    let drop_set: HashSet<String> = cfg.columns.iter().map(|c| textnorm::fold(c)).collect();
    let timestamp_fold = textnorm::fold(&cfg.timestamp_column);

    let mut dropped_idx: HashSet<usize> = HashSet::new();
    let mut removed = Vec::new();
    let mut timestamp_idx = None;
    for (i, name) in table.header.iter().enumerate() {
        let folded = textnorm::fold(name);
        if drop_set.contains(&folded) {
            dropped_idx.insert(i);
            removed.push(name.trim().to_string());
        } else if timestamp_idx.is_none() && folded == timestamp_fold {
            timestamp_idx = Some(i);
        }
    }

    if dropped_idx.is_empty() {
        return PruneOutcome {
            table: None,
            removed,
            timestamp_split: false,
            unparsed_timestamps: 0,
        };
    }

    let mut header = Vec::new();
    for (i, name) in table.header.iter().enumerate() {
        if dropped_idx.contains(&i) {
            continue;
        }
        if Some(i) == timestamp_idx {
            header.push("data".to_string());
            header.push("hora_utc".to_string());
        } else {
            header.push(name.clone());
        }
    }

    let mut unparsed = 0;
    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut out = Vec::with_capacity(header.len());
        for i in 0..table.header.len() {
            if dropped_idx.contains(&i) {
                continue;
            }
            if Some(i) == timestamp_idx {
                let original = table.cell(row, i).trim();
                match timeparse::round_datetime_to_hour(original) {
                    Some(dt) => {
                        out.push(dt.format("%d/%m/%Y").to_string());
                        out.push(format!("{} UTC", dt.format("%H%M")));
                    }
                    None => {
                        if !original.is_empty() {
                            unparsed += 1;
                        }
                        out.push(original.to_string());
                        out.push(String::new());
                    }
                }
            } else {
                out.push(table.cell(row, i).to_string());
            }
        }
        rows.push(out);
    }

    PruneOutcome {
        table: Some(Table::new(header, rows)),
        removed,
        timestamp_split: timestamp_idx.is_some(),
        unparsed_timestamps: unparsed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
