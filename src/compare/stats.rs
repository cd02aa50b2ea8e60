// rubberband-compare/src/compare/stats.rs

use super::table::ComparisonTable;
use crate::color::ParsedValue;
use ndarray::Array1;
use ndarray_stats::QuantileExt;

/// Numeric summary of one column across every run in the table.
#[derive(Clone, Debug)]
pub struct ColumnStats {
    pub label: String,
    /// Values that parsed as finite numbers.
    pub numeric_count: usize,
    /// All values present, numeric or not.
    pub total_count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Collect the column's values from the base run and every comparison run,
/// keep the ones that parse, and summarize them. `None` when the column
/// does not exist or holds no numeric values.
pub fn compute_column_stats(table: &ComparisonTable, column: usize) -> Option<ColumnStats> {
    let spec = table.columns().get(column)?;

    let mut values = Vec::new();
    let mut total_count = 0;
    for row in 0..table.nrows() {
        let cell = match table.cell(row, column) {
            Some(cell) => cell,
            None => continue,
        };
        let mut collect = |raw: &str| {
            if raw.is_empty() {
                return;
            }
            total_count += 1;
            if let ParsedValue::Numeric(value) = ParsedValue::parse(raw) {
                values.push(value);
            }
        };
        collect(&cell.raw);
        for slot in cell.others.iter().flatten() {
            collect(slot);
        }
    }

    if values.is_empty() {
        return None;
    }

    let numeric_count = values.len();
    let arr = Array1::from(values);
    let min = *arr.min().ok()?;
    let max = *arr.max().ok()?;
    let mean = arr.mean()?;
    let variance = arr.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / numeric_count as f64;
    let std_dev = libm::sqrt(variance);

    Some(ColumnStats {
        label: spec.label.clone(),
        numeric_count,
        total_count,
        min,
        max,
        mean,
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::table::{CellData, ColumnSpec, ComparisonTable};

    fn cell(raw: &str, others: &[Option<&str>]) -> CellData {
        CellData {
            raw: raw.to_string(),
            others: others.iter().map(|o| o.map(str::to_string)).collect(),
        }
    }

    fn stats_table() -> ComparisonTable {
        ComparisonTable::new(
            "base".to_string(),
            vec!["other".to_string()],
            vec![
                ColumnSpec::from_label("Time_total"),
                ColumnSpec::from_label("Status"),
            ],
            vec!["app1".to_string(), "app2".to_string()],
            vec![
                vec![cell("2.0", &[Some("4.0")]), cell("ok", &[Some("ok")])],
                vec![cell("6.0", &[None]), cell("timeout", &[Some("8")])],
            ],
        )
    }

    #[test]
    fn test_stats_cover_all_runs() {
        let stats = compute_column_stats(&stats_table(), 0).unwrap();
        assert_eq!(stats.label, "Time_total");
        // 2.0 and 6.0 from the base, 4.0 from the comparison run
        assert_eq!(stats.numeric_count, 3);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.mean, 4.0);
        // Population variance of [2, 4, 6] is 8/3
        assert!((stats.std_dev - libm::sqrt(8.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_text_values_count_toward_totals_only() {
        let stats = compute_column_stats(&stats_table(), 1).unwrap();
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.numeric_count, 1);
        assert_eq!(stats.min, 8.0);
        assert_eq!(stats.max, 8.0);
    }

    #[test]
    fn test_out_of_range_column_has_no_stats() {
        assert!(compute_column_stats(&stats_table(), 5).is_none());
    }

    #[test]
    fn test_all_text_column_has_no_stats() {
        let table = ComparisonTable::new(
            "base".to_string(),
            vec![],
            vec![ColumnSpec::from_label("Status")],
            vec!["app1".to_string()],
            vec![vec![cell("ok", &[])]],
        );
        assert!(compute_column_stats(&table, 0).is_none());
    }
}
