//! Interactive view state over a comparison table
//!
//! Rows are instances, columns are metric columns. Tracks the cursor and
//! the scroll window; cell colors are recomputed per render by the
//! comparison core, so kind and invert changes show up immediately.

use crate::color::{MetricKind, Rgb};
use crate::compare::{CellData, ColumnSpec, ComparisonTable};

/// View state for browsing a comparison table
#[derive(Debug, Clone)]
pub struct TableView {
    /// The merged comparison table being browsed
    pub table: ComparisonTable,

    /// Current cursor position (row_idx, col_idx)
    pub cursor: (usize, usize),

    /// First visible row
    pub row_offset: usize,

    /// First visible column
    pub col_offset: usize,
}

impl TableView {
    pub fn new(table: ComparisonTable) -> Self {
        Self {
            table,
            cursor: (0, 0),
            row_offset: 0,
            col_offset: 0,
        }
    }

    /// Keep the cursor inside the visible window
    pub fn scroll_to_cursor(&mut self, visible_rows: usize, visible_cols: usize) {
        if visible_rows > 0 {
            if self.cursor.0 < self.row_offset {
                self.row_offset = self.cursor.0;
            } else if self.cursor.0 >= self.row_offset + visible_rows {
                self.row_offset = self.cursor.0 + 1 - visible_rows;
            }
        }
        if visible_cols > 0 {
            if self.cursor.1 < self.col_offset {
                self.col_offset = self.cursor.1;
            } else if self.cursor.1 >= self.col_offset + visible_cols {
                self.col_offset = self.cursor.1 + 1 - visible_cols;
            }
        }
    }

    /// Get the cell at the cursor position
    pub fn current_cell(&self) -> Option<&CellData> {
        self.table.cell(self.cursor.0, self.cursor.1)
    }

    /// Get the column spec at the cursor position
    pub fn current_column(&self) -> Option<&ColumnSpec> {
        self.table.columns().get(self.cursor.1)
    }

    /// Get the instance name at the cursor position
    pub fn current_instance(&self) -> Option<&str> {
        self.table
            .instances()
            .get(self.cursor.0)
            .map(String::as_str)
    }

    /// Comparison color of the cell at the cursor position
    pub fn current_color(&self) -> Option<Rgb> {
        self.table.cell_color(self.cursor.0, self.cursor.1)
    }

    /// Cycle the cursor column through the metric kinds; returns the new kind
    pub fn cycle_current_kind(&mut self) -> Option<MetricKind> {
        let column = self.cursor.1;
        let next = match self.table.columns().get(column)?.kind {
            MetricKind::Generic => MetricKind::Time,
            MetricKind::Time => MetricKind::NodeCount,
            MetricKind::NodeCount => MetricKind::Bound,
            MetricKind::Bound => MetricKind::Generic,
        };
        self.table.set_column_kind(column, next);
        Some(next)
    }

    /// Flip bigger-is-better on the cursor column; returns the new state
    pub fn toggle_current_invert(&mut self) -> Option<bool> {
        self.table.toggle_column_invert(self.cursor.1)
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor.0 > 0 {
            self.cursor.0 -= 1;
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor.0 < self.table.nrows().saturating_sub(1) {
            self.cursor.0 += 1;
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if self.cursor.1 > 0 {
            self.cursor.1 -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor.1 < self.table.ncols().saturating_sub(1) {
            self.cursor.1 += 1;
        }
    }
}
