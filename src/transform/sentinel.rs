/// Sentinel-value blanking.
///
/// INMET exports mark missing measurements with a numeric sentinel
/// (canonically -999). Every cell equal to it — numerically, so
/// `-999`, `-999.0` and `-999.00` all count — is replaced with an empty
/// cell. Near-misses such as `-999.5` are real data and stay.

/// Blank every sentinel cell in place and return how many were replaced.
///
/// The rows include the header; a header name can never equal a numeric
/// sentinel, so no special-casing is needed.
pub fn replace_sentinel(rows: &mut [Vec<String>], sentinel: f64) -> usize {
    let canonical = canonical_form(sentinel);
    let mut replaced = 0;
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            let stripped = cell.trim();
            if stripped.is_empty() {
                continue;
            }
            let hit = match stripped.parse::<f64>() {
                Ok(num) => num == sentinel,
                // Fallback for cells that are not parseable numbers but
                // spell the sentinel exactly.
                Err(_) => stripped == canonical,
            };
            if hit {
                cell.clear();
                replaced += 1;
            }
        }
    }
    replaced
}

/// The sentinel's canonical text spelling: integral values print without
/// a fractional part (`-999`), others as-is (`-999.5`).
fn canonical_form(sentinel: f64) -> String {
    if sentinel.fract() == 0.0 {
        format!("{}", sentinel as i64)
    } else {
        format!("{}", sentinel)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&str]) -> Vec<Vec<String>> {
        vec![cells.iter().map(|c| c.to_string()).collect()]
    }

    #[test]
    fn test_exact_integer_sentinel_is_blanked() {
        let mut r = rows(&["-999", "21.4"]);
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 1);
        assert_eq!(r[0], vec!["", "21.4"]);
    }

    #[test]
    fn test_decimal_spellings_of_the_sentinel_are_blanked() {
        let mut r = rows(&["-999.0", "-999.00"]);
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 2);
        assert_eq!(r[0], vec!["", ""]);
    }

    #[test]
    fn test_near_miss_values_are_left_alone() {
        let mut r = rows(&["-999.5", "-998", "999"]);
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 0);
        assert_eq!(r[0], vec!["-999.5", "-998", "999"]);
    }

    #[test]
    fn test_whitespace_padded_sentinel_is_blanked() {
        let mut r = rows(&[" -999 "]);
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 1);
        assert_eq!(r[0][0], "");
    }

    #[test]
    fn test_empty_and_text_cells_pass_through() {
        let mut r = rows(&["", "AQUA", "Belo Horizonte"]);
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 0);
        assert_eq!(r[0], vec!["", "AQUA", "Belo Horizonte"]);
    }

    #[test]
    fn test_configurable_sentinel_value() {
        let mut r = rows(&["-9999", "-999"]);
        let n = replace_sentinel(&mut r, -9999.0);
        assert_eq!(n, 1);
        assert_eq!(r[0], vec!["", "-999"]);
    }

    #[test]
    fn test_counts_span_multiple_rows() {
        let mut r = vec![
            vec!["-999".to_string(), "1".to_string()],
            vec!["2".to_string(), "-999.0".to_string()],
        ];
        let n = replace_sentinel(&mut r, -999.0);
        assert_eq!(n, 2);
    }
}
