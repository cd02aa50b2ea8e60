//! Cell detail panel rendering
//!
//! Shows the cell under the cursor: the value from every run, where the
//! primary value sits relative to the comparison band, the resulting
//! color, and summary statistics for the whole column.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, Focus};
use crate::color::{MetricSample, ParsedValue};
use crate::compare::compute_column_stats;

/// Run value lines shown before folding the rest into a count
const MAX_RUN_LINES: usize = 8;

/// Render the cell detail panel
pub fn render_cell_detail(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Detail;

    let block = Block::default()
        .title(" Cell Detail ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = &app.view;
    let table = &view.table;

    let mut lines: Vec<Line> = vec![];

    let spec = match view.current_column() {
        Some(spec) => spec,
        None => {
            lines.push(Line::from(Span::styled(
                "No cell under cursor",
                Style::default().fg(Color::DarkGray).italic(),
            )));
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }
    };
    let instance = view.current_instance().unwrap_or("-");

    lines.push(Line::from(vec![
        Span::styled("Instance: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            instance.to_string(),
            Style::default().fg(Color::White).bold(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Column:   ", Style::default().fg(Color::DarkGray)),
        Span::styled(spec.label.clone(), Style::default().fg(Color::Cyan).bold()),
    ]));
    let direction = if spec.invert {
        "bigger is better"
    } else {
        "smaller is better"
    };
    lines.push(Line::from(vec![
        Span::styled("Kind:     ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:?}, {}", spec.kind, direction)),
    ]));
    lines.push(Line::from(Span::styled(
        "─".repeat(30),
        Style::default().fg(Color::DarkGray),
    )));

    // One line per run, primary first
    let cell = view.current_cell();
    lines.push(value_line(
        table.base_name(),
        cell.map(|c| c.raw.as_str()).filter(|raw| !raw.is_empty()),
        true,
    ));
    if let Some(cell) = cell {
        let total = cell.others.len();
        for (i, (slot, run_name)) in cell.others.iter().zip(table.run_names()).enumerate() {
            if i == MAX_RUN_LINES {
                lines.push(Line::from(Span::styled(
                    format!("… {} more", total - i),
                    Style::default().fg(Color::DarkGray),
                )));
                break;
            }
            lines.push(value_line(run_name, slot.as_deref(), false));
        }

        let sample = cell.sample(spec.kind, spec.invert);
        if let Some(detail) = band_detail(&sample) {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Band:  ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("[{:.4}, {:.4}]", detail.smallest, detail.largest)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Value: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{:.4}, {} the band", detail.value, detail.position)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Shade: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{:.2}", detail.factor)),
            ]));
        }
    }

    // Resulting cell color with a swatch
    lines.push(Line::from(""));
    match view.current_color() {
        Some(rgb) => lines.push(Line::from(vec![
            Span::styled("Color: ", Style::default().fg(Color::DarkGray)),
            Span::raw(rgb.css()),
            Span::raw(" "),
            Span::styled("    ", Style::default().bg(Color::Rgb(rgb.r, rgb.g, rgb.b))),
        ])),
        None => lines.push(Line::from(vec![
            Span::styled("Color: ", Style::default().fg(Color::DarkGray)),
            Span::styled("none", Style::default().fg(Color::DarkGray).italic()),
        ])),
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(30),
        Style::default().fg(Color::DarkGray),
    )));

    if let Some(stats) = compute_column_stats(table, view.cursor.1) {
        lines.push(Line::from(Span::styled(
            "Column stats",
            Style::default().fg(Color::White).bold(),
        )));
        lines.push(Line::from(Span::styled(
            format!("n: {} numeric of {}", stats.numeric_count, stats.total_count),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("min: {:.3}  max: {:.3}", stats.min, stats.max),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("mean: {:.3}  std: {:.3}", stats.mean, stats.std_dev),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

fn value_line(name: &str, value: Option<&str>, is_primary: bool) -> Line<'static> {
    let name_style = if is_primary {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let value_span = match value {
        Some(value) => Span::raw(value.to_string()),
        None => Span::styled("(none)", Style::default().fg(Color::DarkGray).italic()),
    };
    Line::from(vec![
        Span::styled(format!("{:>12}: ", name), name_style),
        value_span,
    ])
}

struct BandDetail {
    value: f64,
    smallest: f64,
    largest: f64,
    position: &'static str,
    factor: f64,
}

/// Where the primary value lands, in normalized space. Display only; the
/// cell color itself comes from the comparison core.
fn band_detail(sample: &MetricSample) -> Option<BandDetail> {
    let sign = if sample.invert { -1.0 } else { 1.0 };
    let primary = match ParsedValue::parse(&sample.primary) {
        ParsedValue::Numeric(v) => sample.kind.normalize(sign * v),
        ParsedValue::NonNumeric(_) => return None,
    };
    let normalized: Vec<f64> = sample
        .others
        .iter()
        .filter_map(|raw| match ParsedValue::parse(raw) {
            ParsedValue::Numeric(v) => Some(sample.kind.normalize(sign * v)),
            ParsedValue::NonNumeric(_) => None,
        })
        .collect();
    if normalized.is_empty() {
        return None;
    }

    let smallest = normalized.iter().cloned().fold(f64::INFINITY, f64::min);
    let largest = normalized.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (position, ratio) = if primary < smallest {
        ("below", primary / smallest)
    } else if primary > largest {
        ("above", largest / primary)
    } else {
        ("inside", 1.0)
    };

    Some(BandDetail {
        value: primary,
        smallest,
        largest,
        position,
        factor: 1.0 - ratio,
    })
}
