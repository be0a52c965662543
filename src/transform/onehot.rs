/// Two-pass categorical one-hot encoding.
///
/// The output schema depends on the full category set, so the table is
/// read twice: pass 1 discovers the ordered distinct non-empty values of
/// the target column, pass 2 rewrites every row with one binary column
/// per category. A single-pass variant is infeasible — the header must
/// be fixed before the first data row is written.

use crate::model::{PrepError, Table};
use crate::textnorm;

/// Result of an encoding run. `table` is `None` when the column held no
/// non-empty values — nothing to encode, input left untouched.
#[derive(Debug)]
pub struct OneHotOutcome {
    pub table: Option<Table>,
    /// Discovered categories, in order of first appearance.
    pub categories: Vec<String>,
}

/// One-hot encode `column` of `table`. The encoded column is removed
/// from its position and the binary columns are appended at the end,
/// named `<stem>_<category>` after sanitization, where `<stem>` is the
/// column's own sanitized name minus any `f_` prefix.
pub fn one_hot_encode(table: &Table, column: &str) -> Result<OneHotOutcome, PrepError> {
    let col_idx = table
        .find_column_exact_or_folded(column)
        .ok_or_else(|| PrepError::MissingColumn {
            file: "input".to_string(),
            column: column.to_string(),
        })?;

    // Pass 1: ordered distinct non-empty values.
    let categories = collect_categories(table, col_idx);
    if categories.is_empty() {
        return Ok(OneHotOutcome { table: None, categories });
    }

    let stem = column_stem(column);
    let names = sanitized_unique_names(&categories, &stem);

    // Pass 2: rewrite header and rows.
    let mut header: Vec<String> = table
        .header
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != col_idx)
        .map(|(_, name)| name.clone())
        .collect();
    header.extend(names.iter().map(|n| format!("{}_{}", stem, n)));

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut out: Vec<String> = (0..table.header.len())
            .filter(|i| *i != col_idx)
            .map(|i| table.cell(row, i).to_string())
            .collect();
        let value = table.cell(row, col_idx).trim().to_string();
        for category in &categories {
            out.push(if !value.is_empty() && value == *category {
                "1".to_string()
            } else {
                "0".to_string()
            });
        }
        rows.push(out);
    }

    Ok(OneHotOutcome {
        table: Some(Table::new(header, rows)),
        categories,
    })
}

fn collect_categories(table: &Table, col_idx: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut categories = Vec::new();
    for row in &table.rows {
        let value = table.cell(row, col_idx).trim();
        if !value.is_empty() && seen.insert(value.to_string()) {
            categories.push(value.to_string());
        }
    }
    categories
}

/// The naming stem for the generated columns: the encoded column's
/// sanitized name with a leading `f_` (the merge prefix) stripped, so
/// `f_bioma` produces `bioma_*` columns.
fn column_stem(column: &str) -> String {
    let sanitized = textnorm::sanitize_column_name(column, "col");
    sanitized
        .strip_prefix("f_")
        .map(str::to_string)
        .unwrap_or(sanitized)
}

/// Sanitize category values into column names, de-duplicating
/// collisions with numeric suffixes.
fn sanitized_unique_names(categories: &[String], fallback: &str) -> Vec<String> {
    let mut used = std::collections::HashSet::new();
    let mut names = Vec::with_capacity(categories.len());
    for category in categories {
        let base = textnorm::sanitize_column_name(category, fallback);
        let mut name = base.clone();
        let mut i = 1;
        while !used.insert(name.clone()) {
            name = format!("{}_{}", base, i);
            i += 1;
        }
        names.push(name);
    }
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn biome_table(values: &[&str]) -> Table {
        Table::new(
            vec!["lat".into(), "f_bioma".into()],
            values
                .iter()
                .enumerate()
                .map(|(i, v)| vec![format!("-19.{}", i), v.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_categories_in_first_appearance_order_with_binary_rows() {
        let table = biome_table(&["Cerrado", "Mata", "Cerrado", "", ""]);
        let outcome = one_hot_encode(&table, "f_bioma").unwrap();
        assert_eq!(outcome.categories, vec!["Cerrado", "Mata"]);

        let out = outcome.table.unwrap();
        assert_eq!(out.header, vec!["lat", "bioma_Cerrado", "bioma_Mata"]);
        let bits: Vec<(String, String)> = out
            .rows
            .iter()
            .map(|r| (r[1].clone(), r[2].clone()))
            .collect();
        assert_eq!(
            bits,
            vec![
                ("1".into(), "0".into()),
                ("0".into(), "1".into()),
                ("1".into(), "0".into()),
                ("0".into(), "0".into()),
                ("0".into(), "0".into()),
            ]
        );
    }

    #[test]
    fn test_encoded_column_is_removed_from_its_position() {
        let table = biome_table(&["Cerrado"]);
        let out = one_hot_encode(&table, "f_bioma").unwrap().table.unwrap();
        assert!(!out.header.contains(&"f_bioma".to_string()));
        assert_eq!(out.header[0], "lat");
    }

    #[test]
    fn test_accented_categories_sanitize_to_ascii_names() {
        let table = biome_table(&["Mata Atlântica", "Caatinga"]);
        let out = one_hot_encode(&table, "f_bioma").unwrap().table.unwrap();
        assert!(out.header.contains(&"bioma_Mata_Atlantica".to_string()));
        assert!(out.header.contains(&"bioma_Caatinga".to_string()));
    }

    #[test]
    fn test_sanitization_collisions_get_numeric_suffixes() {
        // Both values sanitize to "Mata_Atlantica".
        let table = biome_table(&["Mata Atlântica", "Mata-Atlantica"]);
        let out = one_hot_encode(&table, "f_bioma").unwrap().table.unwrap();
        assert!(out.header.contains(&"bioma_Mata_Atlantica".to_string()));
        assert!(out.header.contains(&"bioma_Mata_Atlantica_1".to_string()));
    }

    #[test]
    fn test_all_empty_column_short_circuits() {
        let table = biome_table(&["", "  ", ""]);
        let outcome = one_hot_encode(&table, "f_bioma").unwrap();
        assert!(outcome.table.is_none(), "nothing to encode, file untouched");
        assert!(outcome.categories.is_empty());
    }

    #[test]
    fn test_missing_column_is_structural() {
        let table = biome_table(&["Cerrado"]);
        match one_hot_encode(&table, "vegetacao") {
            Err(PrepError::MissingColumn { column, .. }) => assert_eq!(column, "vegetacao"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_column_lookup_prefers_exact_then_falls_back_to_folded() {
        let table = Table::new(
            vec!["F_BIOMA".into()],
            vec![vec!["Cerrado".into()]],
        );
        let outcome = one_hot_encode(&table, "f_bioma").unwrap();
        assert_eq!(outcome.categories, vec!["Cerrado"]);
    }

    #[test]
    fn test_values_compared_after_trimming() {
        let table = biome_table(&[" Cerrado ", "Cerrado"]);
        let outcome = one_hot_encode(&table, "f_bioma").unwrap();
        assert_eq!(
            outcome.categories,
            vec!["Cerrado"],
            "padded and plain spellings are the same category"
        );
        let out = outcome.table.unwrap();
        assert_eq!(out.rows[0][1], "1");
        assert_eq!(out.rows[1][1], "1");
    }
}
