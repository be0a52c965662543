/// Blank/placeholder header pruning.
///
/// Spreadsheet round-trips leave columns named nothing at all, pure
/// whitespace, or `Unnamed: 0`-style placeholders. This transform drops
/// those columns and their cells. Running it twice is a no-op — the
/// second pass finds nothing left to remove.

use crate::model::Table;

/// Result of a header-sanitizing pass. `table` is `None` when every
/// header was already named — the caller reports a no-op.
#[derive(Debug)]
pub struct HeaderOutcome {
    pub table: Option<Table>,
    /// How many columns were dropped.
    pub removed: usize,
}

pub fn remove_empty_headers(table: &Table) -> HeaderOutcome {
    let doomed: Vec<usize> = table
        .header
        .iter()
        .enumerate()
        .filter(|(_, name)| is_placeholder(name))
        .map(|(i, _)| i)
        .collect();

    if doomed.is_empty() {
        return HeaderOutcome { table: None, removed: 0 };
    }

    let keep = |i: &usize| !doomed.contains(i);
    let header: Vec<String> = table
        .header
        .iter()
        .enumerate()
        .filter(|(i, _)| keep(i))
        .map(|(_, name)| name.clone())
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            (0..table.header.len())
                .filter(keep)
                .map(|i| table.cell(row, i).to_string())
                .collect()
        })
        .collect();

    HeaderOutcome {
        table: Some(Table::new(header, rows)),
        removed: doomed.len(),
    }
}

fn is_placeholder(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.to_lowercase().starts_with("unnamed")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
