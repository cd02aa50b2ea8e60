//! Main application state machine
//!
//! Manages the overall TUI state including the comparison table view,
//! focus, export options, and user interactions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::table::TableView;
use super::ui;

/// Main application state
pub struct App {
    /// The comparison table view being browsed
    pub view: TableView,

    /// Active UI focus
    pub focus: Focus,

    /// Output directory for exported files
    pub output_dir: PathBuf,

    /// Whether to show help overlay
    pub show_help: bool,

    /// Status message (bottom bar)
    pub status_message: Option<StatusMessage>,

    /// Export options
    pub export_options: ExportOptions,

    /// Cached table area for mouse hit detection
    pub table_area: Rect,

    /// Cached cell detail area for mouse hit detection
    pub detail_area: Rect,

    /// Cached export panel area for mouse hit detection
    pub export_area: Rect,

    /// Whether the app should quit
    pub should_quit: bool,
}

/// Which panel has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    /// Main comparison table
    #[default]
    Table,
    /// Right panel showing the cell under the cursor
    Detail,
    /// Export options panel
    Export,
}

/// Status message displayed at the bottom
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub expires: Instant,
}

/// Status message severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// Export configuration options
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub output_format: OutputFormat,
    pub log_y: bool,
}

/// Output format for export
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone HTML document with colored cells
    Html,
    /// Merged wide CSV with one column per run
    Csv,
    /// Interactive plot of the cursor column
    ColumnPlot,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Html,
            log_y: false,
        }
    }
}

impl App {
    /// Create a new application around a loaded comparison table
    pub fn new(view: TableView, output_dir: PathBuf) -> Self {
        Self {
            view,
            focus: Focus::Table,
            output_dir,
            show_help: false,
            status_message: None,
            export_options: ExportOptions::default(),
            table_area: Rect::default(),
            detail_area: Rect::default(),
            export_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Handle tick events (status message expiry)
    pub fn on_tick(&mut self) {
        if let Some(ref msg) = self.status_message {
            if Instant::now() > msg.expires {
                self.status_message = None;
            }
        }
    }

    /// Handle key events
    pub fn on_key(&mut self, key: KeyEvent) {
        // Global shortcuts (work in any focus)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Table => self.handle_table_key(key),
            Focus::Detail => self.handle_detail_key(key),
            Focus::Export => self.handle_export_key(key),
        }
    }

    /// Handle mouse events
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column;
        let y = mouse.row;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.is_in_rect(x, y, self.table_area) {
                    self.focus = Focus::Table;
                    if let Some((row, col)) = self.mouse_to_cell(x, y) {
                        self.view.cursor = (row, col);
                    }
                } else if self.is_in_rect(x, y, self.export_area) {
                    self.focus = Focus::Export;
                    self.handle_export_click(y);
                } else if self.is_in_rect(x, y, self.detail_area) {
                    self.focus = Focus::Detail;
                }
            }
            MouseEventKind::ScrollUp => {
                self.view.cursor_up();
            }
            MouseEventKind::ScrollDown => {
                self.view.cursor_down();
            }
            _ => {}
        }
    }

    /// Check if coordinates are within a rect
    fn is_in_rect(&self, x: u16, y: u16, rect: Rect) -> bool {
        x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
    }

    /// Handle click within the export panel
    fn handle_export_click(&mut self, y: u16) {
        // Relative position within export panel (accounting for border)
        let rel_y = y.saturating_sub(self.export_area.y + 1);

        // Layout of export panel (0-indexed lines inside border):
        // 0: "Format:"
        // 1:  >[1] HTML table
        // 2:   [2] Merged CSV
        // 3:   [3] Column plot
        // 4: (empty)
        // 5: "Options:"
        // 6:  [l] Log y-axis
        // 7:  Output dir
        // 8: (empty)
        // 9: [Enter] Export

        match rel_y {
            1 => {
                self.export_options.output_format = OutputFormat::Html;
                self.set_status("Format: HTML table", StatusLevel::Info);
            }
            2 => {
                self.export_options.output_format = OutputFormat::Csv;
                self.set_status("Format: Merged CSV", StatusLevel::Info);
            }
            3 => {
                self.export_options.output_format = OutputFormat::ColumnPlot;
                self.set_status("Format: Column plot", StatusLevel::Info);
            }
            6 => {
                self.toggle_log_y();
            }
            9 => {
                self.perform_export();
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match key.code {
            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.view.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.view.cursor_down(),
            KeyCode::Left | KeyCode::Char('h') => self.view.cursor_left(),
            KeyCode::Right | KeyCode::Char('l') => self.view.cursor_right(),

            // Column reclassification
            KeyCode::Char('m') => {
                if let Some(kind) = self.view.cycle_current_kind() {
                    let label = self.current_column_label();
                    self.set_status(format!("Column '{}': {:?}", label, kind), StatusLevel::Info);
                }
            }
            KeyCode::Char('i') => {
                if let Some(invert) = self.view.toggle_current_invert() {
                    let label = self.current_column_label();
                    let direction = if invert {
                        "bigger is better"
                    } else {
                        "smaller is better"
                    };
                    self.set_status(format!("Column '{}': {}", label, direction), StatusLevel::Info);
                }
            }

            // Focus change
            KeyCode::Enter | KeyCode::Tab => {
                self.focus = Focus::Detail;
            }
            KeyCode::BackTab => {
                self.focus = Focus::Export;
            }

            // Export shortcut
            KeyCode::Char('e') => {
                self.focus = Focus::Export;
            }

            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus = Focus::Export,
            KeyCode::BackTab => self.focus = Focus::Table,
            KeyCode::Esc => self.focus = Focus::Table,
            _ => {}
        }
    }

    fn handle_export_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus = Focus::Table,
            KeyCode::BackTab => self.focus = Focus::Detail,
            KeyCode::Esc => self.focus = Focus::Table,
            KeyCode::Char('1') => {
                self.export_options.output_format = OutputFormat::Html;
                self.set_status("Format: HTML table", StatusLevel::Info);
            }
            KeyCode::Char('2') => {
                self.export_options.output_format = OutputFormat::Csv;
                self.set_status("Format: Merged CSV", StatusLevel::Info);
            }
            KeyCode::Char('3') => {
                self.export_options.output_format = OutputFormat::ColumnPlot;
                self.set_status("Format: Column plot", StatusLevel::Info);
            }
            KeyCode::Char('l') => {
                self.toggle_log_y();
            }
            KeyCode::Enter => {
                self.perform_export();
            }
            _ => {}
        }
    }

    fn toggle_log_y(&mut self) {
        self.export_options.log_y = !self.export_options.log_y;
        let state = if self.export_options.log_y { "on" } else { "off" };
        self.set_status(format!("Log y-axis: {}", state), StatusLevel::Info);
    }

    fn current_column_label(&self) -> String {
        self.view
            .current_column()
            .map(|spec| spec.label.clone())
            .unwrap_or_default()
    }

    /// Convert mouse coordinates to table cell indices
    fn mouse_to_cell(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        // Border plus instance labels on the left, border plus column
        // headers on top; the widths are shared with the renderer.
        let first_cell_x = self.table_area.x + 1 + ui::INSTANCE_COL_WIDTH;
        let first_cell_y = self.table_area.y + 1 + ui::HEADER_ROWS;

        if x < first_cell_x || y < first_cell_y {
            return None;
        }
        if x >= self.table_area.x + self.table_area.width
            || y >= self.table_area.y + self.table_area.height
        {
            return None;
        }

        let col = self.view.col_offset + ((x - first_cell_x) / ui::CELL_WIDTH) as usize;
        let row = self.view.row_offset + (y - first_cell_y) as usize;

        if row < self.view.table.nrows() && col < self.view.table.ncols() {
            Some((row, col))
        } else {
            None
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            level,
            expires: Instant::now() + Duration::from_secs(5),
        });
    }

    fn perform_export(&mut self) {
        match self.export_options.output_format {
            OutputFormat::Html => {
                let output_path = self.output_dir.join("comparison.html");
                match self.view.table.write_html(&output_path) {
                    Ok(_) => self.set_status(
                        format!("Wrote {}", output_path.display()),
                        StatusLevel::Success,
                    ),
                    Err(e) => self.set_status(format!("Write error: {}", e), StatusLevel::Error),
                }
            }
            OutputFormat::Csv => {
                let output_path = self.output_dir.join("comparison.csv");
                match self.view.table.write_csv(&output_path) {
                    Ok(_) => self.set_status(
                        format!("Wrote {}", output_path.display()),
                        StatusLevel::Success,
                    ),
                    Err(e) => self.set_status(format!("Write error: {}", e), StatusLevel::Error),
                }
            }
            OutputFormat::ColumnPlot => {
                let column = self.view.cursor.1;
                let label = match self.view.current_column() {
                    Some(spec) => spec.label.clone(),
                    None => {
                        self.set_status("No column under the cursor", StatusLevel::Error);
                        return;
                    }
                };
                match self
                    .view
                    .table
                    .make_column_plot(column, self.export_options.log_y)
                {
                    Ok(plot) => {
                        let sanitized: String = label
                            .chars()
                            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                            .collect();
                        let output_path = self.output_dir.join(format!("plot_{}.html", sanitized));
                        plot.write_html(&output_path);
                        self.set_status(
                            format!("Wrote {}", output_path.display()),
                            StatusLevel::Success,
                        );
                    }
                    Err(e) => self.set_status(format!("Plot error: {}", e), StatusLevel::Error),
                }
            }
        }
    }
}
