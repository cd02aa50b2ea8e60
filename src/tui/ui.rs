//! Main UI layout and rendering
//!
//! Composes all panels into the final TUI layout

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Focus, StatusLevel};
use super::colors::get_cell_colors;
use super::export::render_export_panel;
use super::preview::render_cell_detail;

/// Width of the instance label column
pub(super) const INSTANCE_COL_WIDTH: u16 = 18;

/// Width of each metric cell
pub(super) const CELL_WIDTH: u16 = 12;

/// Column header rows above the cells
pub(super) const HEADER_ROWS: u16 = 1;

/// Draw the complete UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Main layout: header, body, footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header/title
            Constraint::Min(15),   // Body
            Constraint::Length(3), // Status/help bar
        ])
        .split(area);

    render_header(frame, main_layout[0], app);
    render_body(frame, main_layout[1], app);
    render_footer(frame, main_layout[2], app);

    // Help overlay if active
    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let table = &app.view.table;
    let title = Paragraph::new(format!(
        "Rubberband Compare - {} vs {}",
        table.base_name(),
        table.run_names().join(", ")
    ))
    .style(Style::default().fg(Color::Cyan).bold())
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    // Split body: table (left) + detail/export (right)
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Comparison table
            Constraint::Percentage(30), // Detail/export panel
        ])
        .split(area);

    render_table(frame, body_layout[0], app);
    render_side_panel(frame, body_layout[1], app);
}

fn render_side_panel(frame: &mut Frame, area: Rect, app: &mut App) {
    // Split side panel: cell detail (top) + export options (bottom)
    let side_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Cell detail
            Constraint::Percentage(40), // Export options
        ])
        .split(area);

    // Store areas for mouse hit detection
    app.detail_area = side_layout[0];
    app.export_area = side_layout[1];

    render_cell_detail(frame, side_layout[0], app);
    render_export_panel(frame, side_layout[1], app);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let is_focused = app.focus == Focus::Table;

    let block = Block::default()
        .title(" Comparison Table ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Store the outer area for mouse hit detection; the cell math in the
    // mouse handler accounts for the border itself.
    app.table_area = area;

    if inner.width < INSTANCE_COL_WIDTH + CELL_WIDTH || inner.height <= HEADER_ROWS {
        return;
    }

    let available_cols = ((inner.width - INSTANCE_COL_WIDTH) / CELL_WIDTH) as usize;
    let available_rows = (inner.height - HEADER_ROWS) as usize;

    app.view.scroll_to_cursor(available_rows, available_cols);
    let cursor = app.view.cursor;
    let row_offset = app.view.row_offset;
    let col_offset = app.view.col_offset;
    let table = &app.view.table;

    let num_cols = table.ncols().saturating_sub(col_offset).min(available_cols);
    let num_rows = table.nrows().saturating_sub(row_offset).min(available_rows);

    // Column headers
    let corner = Paragraph::new("Instance").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(corner, Rect::new(inner.x, inner.y, INSTANCE_COL_WIDTH, 1));

    for i in 0..num_cols {
        let col_idx = col_offset + i;
        let spec = &table.columns()[col_idx];
        let cell_x = inner.x + INSTANCE_COL_WIDTH + (i as u16 * CELL_WIDTH);

        let mut label = String::new();
        if spec.invert {
            label.push('↑');
        }
        label.push_str(&spec.label);
        let text = fit(&label, CELL_WIDTH as usize - 1);

        let style = if cursor.1 == col_idx {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Cyan)
        };
        let widget = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(widget, Rect::new(cell_x, inner.y, CELL_WIDTH, 1));
    }

    // Rows
    let table_start_y = inner.y + HEADER_ROWS;
    for i in 0..num_rows {
        let row_idx = row_offset + i;
        let row_y = table_start_y + i as u16;

        let instance = &table.instances()[row_idx];
        let label_style = if cursor.0 == row_idx {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let label_widget =
            Paragraph::new(fit(instance, INSTANCE_COL_WIDTH as usize - 1)).style(label_style);
        frame.render_widget(label_widget, Rect::new(inner.x, row_y, INSTANCE_COL_WIDTH, 1));

        for j in 0..num_cols {
            let col_idx = col_offset + j;
            let cell_x = inner.x + INSTANCE_COL_WIDTH + (j as u16 * CELL_WIDTH);

            if let Some(cell) = table.cell(row_idx, col_idx) {
                let is_cursor = cursor == (row_idx, col_idx);
                let is_selected = cursor.1 == col_idx;
                let (fg, bg) = get_cell_colors(
                    table.cell_color(row_idx, col_idx),
                    is_cursor,
                    is_selected,
                );

                let text = format!("{:^w$}", fit(&cell.raw, CELL_WIDTH as usize - 1), w = CELL_WIDTH as usize);
                let style = Style::default().fg(fg).bg(bg);
                let widget = Paragraph::new(text).style(style);
                frame.render_widget(widget, Rect::new(cell_x, row_y, CELL_WIDTH, 1));
            }
        }
    }
}

/// Truncate to the given display width, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let content = if let Some(ref msg) = app.status_message {
        let style = match msg.level {
            StatusLevel::Info => Style::default().fg(Color::White),
            StatusLevel::Warning => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
            StatusLevel::Success => Style::default().fg(Color::Green),
        };
        Paragraph::new(msg.text.as_str())
            .style(style)
            .wrap(Wrap { trim: true })
    } else {
        let help = match app.focus {
            Focus::Table => {
                "arrows/hjkl: move | m: kind | i: invert | e: export | Tab: next | ?: help"
            }
            Focus::Detail => "Tab: next | Esc: back | ?: help",
            Focus::Export => "1/2/3: format | l: log axis | Enter: export | Esc: back | ?: help",
        };
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray))
    };

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(content.alignment(Alignment::Center), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    // Center the help popup, clamped to the terminal size
    let popup_width = 60u16.min(area.width);
    let popup_height = 28u16.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_text = r#"
 Rubberband Compare - Keyboard & Mouse

 NAVIGATION
   arrows / hjkl    Move cursor in table
   Tab / Shift+Tab  Cycle between panels
   Esc              Return to table / close help

 COLUMNS
   m                Cycle metric kind of column
   i                Toggle bigger-is-better

 MOUSE
   Click table      Move cursor to cell
   Click export     Change format/options
   Scroll wheel     Navigate table rows

 EXPORT (in Export panel)
   1/2/3            HTML / CSV / column plot
   l                Toggle log y-axis for plots
   Enter            Write to output directory

 OTHER
   ? / F1           Toggle this help
   q                Quit application
"#;

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Help ")
                .title_style(Style::default().fg(Color::Cyan).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(help, popup_area);
}
