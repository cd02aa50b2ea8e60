//! Export options panel rendering
//!
//! Shows export format selection and plot options. The line layout here
//! is mirrored by the mouse handling in the app, so the two must change
//! together.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, Focus, OutputFormat};

/// Render the export options panel
pub fn render_export_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Export;

    let block = Block::default()
        .title(" Export Options ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![];

    // Output format selection
    lines.push(Line::from(Span::styled("Format:", Style::default().bold())));

    let formats = [
        (OutputFormat::Html, "1", "HTML table"),
        (OutputFormat::Csv, "2", "Merged CSV"),
        (OutputFormat::ColumnPlot, "3", "Column plot"),
    ];

    for (fmt, key, label) in formats {
        let is_selected = app.export_options.output_format == fmt;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let prefix = if is_selected { ">" } else { " " };
        lines.push(Line::from(Span::styled(
            format!(" {}[{}] {}", prefix, key, label),
            style,
        )));
    }

    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Options:",
        Style::default().bold(),
    )));

    let log_state = if app.export_options.log_y { "on" } else { "off" };
    lines.push(Line::from(vec![
        Span::styled(" [l] Log y-axis: ", Style::default().fg(Color::DarkGray)),
        Span::styled(log_state, Style::default().fg(Color::Cyan)),
    ]));

    lines.push(Line::from(vec![
        Span::styled(" Output dir: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.output_dir.display().to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ]));

    lines.push(Line::from(""));

    let export_style = if is_focused {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::Green)
    };
    lines.push(Line::from(Span::styled("[Enter] Export", export_style)));

    if app.export_options.output_format == OutputFormat::ColumnPlot {
        lines.push(Line::from(Span::styled(
            "(plots the cursor column)",
            Style::default().fg(Color::DarkGray).dim(),
        )));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}
