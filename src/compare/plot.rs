// rubberband-compare/src/compare/plot.rs

use super::table::ComparisonTable;
use crate::color::ParsedValue;
use log::debug;
use plotly::color::NamedColor;
use plotly::common::{Marker, Mode};
use plotly::layout::{Axis, AxisType, Layout};
use plotly::{Plot, Scatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColumnPlotError {
    #[error("No such column index: {0}")]
    NoSuchColumn(usize),
    #[error("Column '{0}' has no numeric values to plot")]
    NoNumericValues(String),
}

/// One scatter trace per run: the column's numeric values over the instance
/// axis. Non-numeric cells are left out of their trace.
pub fn make_column_plot(
    table: &ComparisonTable,
    column: usize,
    log_y: bool,
) -> Result<Plot, ColumnPlotError> {
    let spec = table
        .columns()
        .get(column)
        .ok_or(ColumnPlotError::NoSuchColumn(column))?;

    let mut plot = Plot::new();
    let mut trace_count = 0;

    let base_points = collect_points(table, column, |cell| Some(cell.raw.as_str()));
    if !base_points.0.is_empty() {
        let trace = Scatter::new(base_points.0, base_points.1)
            .mode(Mode::Markers)
            .name(table.base_name())
            .marker(Marker::new().color(NamedColor::Black));
        plot.add_trace(trace);
        trace_count += 1;
    }

    for (slot, run_name) in table.run_names().iter().enumerate() {
        let points = collect_points(table, column, |cell| {
            cell.others.get(slot).and_then(|o| o.as_deref())
        });
        if points.0.is_empty() {
            debug!("Run '{}' has no numeric values in '{}'", run_name, spec.label);
            continue;
        }
        let trace = Scatter::new(points.0, points.1)
            .mode(Mode::Markers)
            .name(run_name);
        plot.add_trace(trace);
        trace_count += 1;
    }

    if trace_count == 0 {
        return Err(ColumnPlotError::NoNumericValues(spec.label.clone()));
    }

    if log_y {
        plot.set_layout(Layout::new().y_axis(Axis::new().type_(AxisType::Log)));
    }

    Ok(plot)
}

fn collect_points<'a, F>(
    table: &'a ComparisonTable,
    column: usize,
    pick: F,
) -> (Vec<String>, Vec<f64>)
where
    F: Fn(&'a super::table::CellData) -> Option<&'a str>,
{
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (row, instance) in table.instances().iter().enumerate() {
        let raw = match table.cell(row, column).and_then(&pick) {
            Some(raw) => raw,
            None => continue,
        };
        if let ParsedValue::Numeric(value) = ParsedValue::parse(raw) {
            x.push(instance.clone());
            y.push(value);
        }
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::table::{CellData, ColumnSpec};

    fn cell(raw: &str, others: &[Option<&str>]) -> CellData {
        CellData {
            raw: raw.to_string(),
            others: others.iter().map(|o| o.map(str::to_string)).collect(),
        }
    }

    fn plot_table() -> ComparisonTable {
        ComparisonTable::new(
            "base".to_string(),
            vec!["other".to_string()],
            vec![
                ColumnSpec::from_label("Time_total"),
                ColumnSpec::from_label("Status"),
            ],
            vec!["app1".to_string(), "app2".to_string()],
            vec![
                vec![cell("5", &[Some("10")]), cell("ok", &[Some("ok")])],
                vec![cell("x", &[Some("7")]), cell("ok", &[None])],
            ],
        )
    }

    #[test]
    fn test_numeric_column_plots() {
        assert!(make_column_plot(&plot_table(), 0, false).is_ok());
        assert!(make_column_plot(&plot_table(), 0, true).is_ok());
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let err = make_column_plot(&plot_table(), 9, false).err().unwrap();
        assert!(matches!(err, ColumnPlotError::NoSuchColumn(9)));
    }

    #[test]
    fn test_text_column_is_an_error() {
        let err = make_column_plot(&plot_table(), 1, false).err().unwrap();
        assert!(matches!(
            err,
            ColumnPlotError::NoNumericValues(ref label) if label == "Status"
        ));
    }

    #[test]
    fn test_non_numeric_cells_are_skipped() {
        let (x, y) = collect_points(&plot_table(), 0, |cell| Some(cell.raw.as_str()));
        assert_eq!(x, vec!["app1".to_string()]);
        assert_eq!(y, vec![5.0]);
    }
}
