// rubberband-compare/src/compare/table.rs

use super::html;
use super::plot::{self, ColumnPlotError};
use crate::color::{colorize, MetricKind, MetricSample, Rgb};
use plotly::Plot;
use std::path::PathBuf;

/// Row membership when the runs disagree on instance sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Instances present in every run.
    #[default]
    Intersection,
    /// Instances present in any run, base order first.
    Union,
}

/// One column of the comparison table.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub label: String,
    pub kind: MetricKind,
    /// Bigger values are better for this column.
    pub invert: bool,
}

impl ColumnSpec {
    /// Column with the kind detected from its label.
    pub fn from_label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: MetricKind::from_column_label(label),
            invert: false,
        }
    }
}

/// One cell: the base run's raw value plus one slot per comparison run.
/// A `None` slot means the run has no value for this instance and column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellData {
    pub raw: String,
    pub others: Vec<Option<String>>,
}

impl CellData {
    /// Comparison values that are actually present, in run order.
    pub fn comparison_values(&self) -> Vec<String> {
        self.others.iter().flatten().cloned().collect()
    }

    /// Build the per-render sample handed to the colorizer.
    pub fn sample(&self, kind: MetricKind, invert: bool) -> MetricSample {
        MetricSample::new(self.raw.clone(), self.comparison_values(), kind, invert)
    }
}

/// A base run merged with its comparison runs, row-major. Built by
/// `ComparisonTableBuilder`; every row holds one cell per column and every
/// cell holds one comparison slot per run.
#[derive(Clone, Debug)]
pub struct ComparisonTable {
    base_name: String,
    run_names: Vec<String>,
    columns: Vec<ColumnSpec>,
    instances: Vec<String>,
    cells: Vec<Vec<CellData>>,
}

impl ComparisonTable {
    pub(crate) fn new(
        base_name: String,
        run_names: Vec<String>,
        columns: Vec<ColumnSpec>,
        instances: Vec<String>,
        cells: Vec<Vec<CellData>>,
    ) -> Self {
        Self {
            base_name,
            run_names,
            columns,
            instances,
            cells,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Comparison run names, in the order the cell slots use.
    pub fn run_names(&self) -> &[String] {
        &self.run_names
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    pub fn nrows(&self) -> usize {
        self.instances.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellData> {
        self.cells.get(row)?.get(column)
    }

    /// Background color for one cell; `None` leaves the cell unstyled.
    /// Recomputed per render from the raw values.
    pub fn cell_color(&self, row: usize, column: usize) -> Option<Rgb> {
        let spec = self.columns.get(column)?;
        let cell = self.cell(row, column)?;
        colorize(&cell.sample(spec.kind, spec.invert))
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|spec| spec.label == label)
    }

    pub fn set_column_kind(&mut self, column: usize, kind: MetricKind) -> bool {
        match self.columns.get_mut(column) {
            Some(spec) => {
                spec.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Flip the bigger-is-better flag; returns the new state.
    pub fn toggle_column_invert(&mut self, column: usize) -> Option<bool> {
        let spec = self.columns.get_mut(column)?;
        spec.invert = !spec.invert;
        Some(spec.invert)
    }

    pub fn set_kind_by_label(&mut self, label: &str, kind: MetricKind) -> bool {
        match self.column_index(label) {
            Some(column) => self.set_column_kind(column, kind),
            None => false,
        }
    }

    pub fn set_invert_by_label(&mut self, label: &str, invert: bool) -> bool {
        match self.column_index(label) {
            Some(column) => {
                self.columns[column].invert = invert;
                true
            }
            None => false,
        }
    }

    /// Static HTML document with colored cells.
    pub fn to_html(&self) -> String {
        html::render_html(self)
    }

    pub fn write_html(&self, filename: &PathBuf) -> std::io::Result<()> {
        html::write_html(self, filename)
    }

    /// Scatter of one column's values across instances, one trace per run.
    pub fn make_column_plot(&self, column: usize, log_y: bool) -> Result<Plot, ColumnPlotError> {
        plot::make_column_plot(self, column, log_y)
    }

    /// Merged wide CSV: for every column, the base run's values followed by
    /// one column per comparison run.
    pub fn write_csv(&self, filename: &PathBuf) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_path(filename)?;

        let mut header = vec!["instance".to_string()];
        for spec in &self.columns {
            header.push(format!("{} [{}]", spec.label, self.base_name));
            for run in &self.run_names {
                header.push(format!("{} [{}]", spec.label, run));
            }
        }
        wtr.write_record(&header)?;

        for (row, instance) in self.instances.iter().enumerate() {
            let mut record = vec![instance.clone()];
            for column in 0..self.columns.len() {
                match self.cell(row, column) {
                    Some(cell) => {
                        record.push(cell.raw.clone());
                        for slot in &cell.others {
                            record.push(slot.clone().unwrap_or_default());
                        }
                    }
                    None => {
                        record.extend(
                            std::iter::repeat(String::new()).take(1 + self.run_names.len()),
                        );
                    }
                }
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(raw: &str, others: &[Option<&str>]) -> CellData {
        CellData {
            raw: raw.to_string(),
            others: others.iter().map(|o| o.map(str::to_string)).collect(),
        }
    }

    fn two_run_table() -> ComparisonTable {
        ComparisonTable::new(
            "base".to_string(),
            vec!["other-a".to_string(), "other-b".to_string()],
            vec![
                ColumnSpec::from_label("Time_total"),
                ColumnSpec::from_label("Gap"),
            ],
            vec!["app1".to_string(), "app2".to_string()],
            vec![
                vec![
                    cell("0.0", &[Some("1.0"), Some("2.0")]),
                    cell("5", &[Some("10"), Some("20")]),
                ],
                vec![
                    cell("3.5", &[Some("3.5"), None]),
                    cell("40", &[Some("10"), Some("30")]),
                ],
            ],
        )
    }

    #[test]
    fn test_kind_detection_from_labels() {
        let table = two_run_table();
        assert_eq!(table.columns()[0].kind, MetricKind::Time);
        assert_eq!(table.columns()[1].kind, MetricKind::Generic);
    }

    #[test]
    fn test_cell_color_uses_column_spec() {
        let mut table = two_run_table();
        // Time normalization turns [0, 1, 2] into [1, 2, 3]: green at 0.5
        assert_eq!(table.cell_color(0, 0), Some(Rgb::new(192, 227, 142)));
        // Generic 5 against [10, 20]: green at 0.5 as well
        assert_eq!(table.cell_color(0, 1), Some(Rgb::new(192, 227, 142)));

        // Reclassifying the column changes the cell color
        assert!(table.set_column_kind(1, MetricKind::Bound));
        assert_eq!(table.cell_color(0, 1), Some(Rgb::new(207, 207, 207)));
    }

    #[test]
    fn test_missing_slots_drop_out_of_the_sample() {
        let table = two_run_table();
        // app2 Time_total: the only present comparison equals the base
        assert_eq!(table.cell_color(1, 0), None);
        let sample = table.cell(1, 0).unwrap().sample(MetricKind::Time, false);
        assert_eq!(sample.others, vec!["3.5".to_string()]);
    }

    #[test]
    fn test_invert_toggle_round_trip() {
        let mut table = two_run_table();
        assert_eq!(table.toggle_column_invert(1), Some(true));
        assert_eq!(table.toggle_column_invert(1), Some(false));
        assert_eq!(table.toggle_column_invert(9), None);

        assert!(table.set_invert_by_label("Gap", true));
        assert!(table.columns()[1].invert);
        assert!(!table.set_invert_by_label("Missing", true));
    }

    #[test]
    fn test_column_index_lookup() {
        let table = two_run_table();
        assert_eq!(table.column_index("Gap"), Some(1));
        assert_eq!(table.column_index("Nodes"), None);
    }
}
