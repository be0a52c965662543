/// Temporal feature expansion for model training.
///
/// The date column becomes plain (day, month, year) components. The
/// time column becomes a point on the unit circle (`sin`/`cos` of
/// `2π · fraction-of-day`) so hour 23 and hour 0 stay adjacent in
/// feature space. A plain numeric hour would put them 23 apart, which
/// is exactly the artifact this encoding removes.

use crate::config::CyclicalConfig;
use crate::model::Table;

/// Result of an expansion run. `table` is `None` when neither
/// configured column exists — nothing to transform.
#[derive(Debug)]
pub struct CyclicalOutcome {
    pub table: Option<Table>,
    pub date_expanded: bool,
    pub time_expanded: bool,
}

pub fn expand_temporal_features(table: &Table, cfg: &CyclicalConfig) -> CyclicalOutcome {
    let date_idx = table.find_column(&cfg.date_column);
    let time_idx = table.find_column(&cfg.time_column);

    if date_idx.is_none() && time_idx.is_none() {
        return CyclicalOutcome { table: None, date_expanded: false, time_expanded: false };
    }

    let mut header = Vec::new();
    for (i, name) in table.header.iter().enumerate() {
        if Some(i) == date_idx {
            header.extend(["f_day".to_string(), "f_month".to_string(), "f_year".to_string()]);
        } else if Some(i) == time_idx {
            header.extend(["hour_sin".to_string(), "hour_cos".to_string()]);
        } else {
            header.push(name.clone());
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut out = Vec::with_capacity(header.len());
        for i in 0..table.header.len() {
            let cell = table.cell(row, i).trim();
            if Some(i) == date_idx {
                let (day, month, year) = crate::timeparse::split_date_components(cell);
                out.push(day);
                out.push(month);
                out.push(year);
            } else if Some(i) == time_idx {
                match crate::timeparse::time_fraction(cell) {
                    Some(frac) => {
                        let (sin, cos) = fraction_to_sin_cos(frac);
                        out.push(format!("{:.6}", sin));
                        out.push(format!("{:.6}", cos));
                    }
                    None => {
                        out.push(String::new());
                        out.push(String::new());
                    }
                }
            } else {
                out.push(table.cell(row, i).to_string());
            }
        }
        rows.push(out);
    }

    CyclicalOutcome {
        table: Some(Table::new(header, rows)),
        date_expanded: date_idx.is_some(),
        time_expanded: time_idx.is_some(),
    }
}

/// Map a fraction of the day in [0, 1) onto the unit circle.
pub fn fraction_to_sin_cos(frac: f64) -> (f64, f64) {
    let angle = 2.0 * std::f64::consts::PI * frac;
    (angle.sin(), angle.cos())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CyclicalConfig;

    fn input() -> Table {
        Table::new(
            vec!["f_data".into(), "f_hora_utc".into(), "lat".into()],
            vec![vec!["02/01/2024".into(), "1700 UTC".into(), "-19.1".into()]],
        )
    }

    #[test]
    fn test_both_columns_expand_in_place() {
        let outcome = expand_temporal_features(&input(), &CyclicalConfig::default());
        let table = outcome.table.unwrap();
        assert_eq!(
            table.header,
            vec!["f_day", "f_month", "f_year", "hour_sin", "hour_cos", "lat"]
        );
        assert_eq!(&table.rows[0][..3], &["02", "01", "2024"]);
        assert_eq!(table.rows[0][5], "-19.1");
    }

    #[test]
    fn test_midnight_maps_to_sin_zero_cos_one() {
        let (sin, cos) = fraction_to_sin_cos(0.0);
        assert!(sin.abs() < 1e-12);
        assert!((cos - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_day_boundary_is_cyclically_adjacent() {
        // 23:59 must land almost exactly where 00:00 does.
        let frac = crate::timeparse::time_fraction("2359").unwrap();
        let (sin, cos) = fraction_to_sin_cos(frac);
        assert!(sin.abs() < 0.01, "sin at 23:59 should be ≈0, got {}", sin);
        assert!((cos - 1.0).abs() < 0.01, "cos at 23:59 should be ≈1, got {}", cos);
    }

    #[test]
    fn test_sin_cos_are_formatted_to_six_decimals() {
        let outcome = expand_temporal_features(&input(), &CyclicalConfig::default());
        let table = outcome.table.unwrap();
        // 17:00 -> frac 17/24; spot-check the formatting shape.
        assert_eq!(table.rows[0][3].split('.').nth(1).map(str::len), Some(6));
        assert_eq!(table.rows[0][4].split('.').nth(1).map(str::len), Some(6));
    }

    #[test]
    fn test_unparseable_time_leaves_empty_sin_cos() {
        let mut t = input();
        t.rows[0][1] = "noon-ish".into();
        let outcome = expand_temporal_features(&t, &CyclicalConfig::default());
        let table = outcome.table.unwrap();
        assert_eq!(table.rows[0][3], "");
        assert_eq!(table.rows[0][4], "");
    }

    #[test]
    fn test_date_only_input_still_transforms() {
        let t = Table::new(
            vec!["f_data".into(), "lat".into()],
            vec![vec!["02/01/24".into(), "-19.1".into()]],
        );
        let outcome = expand_temporal_features(&t, &CyclicalConfig::default());
        assert!(outcome.date_expanded);
        assert!(!outcome.time_expanded);
        let table = outcome.table.unwrap();
        assert_eq!(&table.rows[0][..3], &["02", "01", "2024"]);
    }

    #[test]
    fn test_neither_column_is_a_no_op() {
        let t = Table::new(vec!["lat".into()], vec![vec!["-19.1".into()]]);
        let outcome = expand_temporal_features(&t, &CyclicalConfig::default());
        assert!(outcome.table.is_none());
    }

    #[test]
    fn test_short_rows_expand_with_empty_components() {
        let mut t = input();
        t.rows[0].truncate(1); // only f_data present
        let outcome = expand_temporal_features(&t, &CyclicalConfig::default());
        let table = outcome.table.unwrap();
        assert_eq!(table.rows[0].len(), table.header.len());
        assert_eq!(table.rows[0][3], "", "missing time cell yields empty sin");
    }
}
