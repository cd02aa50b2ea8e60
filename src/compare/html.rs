// rubberband-compare/src/compare/html.rs

use super::table::ComparisonTable;
use rayon::prelude::*;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Renders the table as a standalone HTML document. Cell backgrounds carry
/// the comparison colors; hovering a cell shows the comparison values.
pub struct HtmlTable<'a> {
    table: &'a ComparisonTable,
}

impl<'a> HtmlTable<'a> {
    pub fn new(table: &'a ComparisonTable) -> Self {
        Self { table }
    }
}

impl fmt::Display for HtmlTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>{}</title>", escape(self.table.base_name()))?;
        writeln!(f, "<style>")?;
        writeln!(f, "body {{ font-family: sans-serif; }}")?;
        writeln!(f, "table {{ border-collapse: collapse; }}")?;
        writeln!(
            f,
            "th, td {{ border: 1px solid #999; padding: 2px 6px; text-align: right; }}"
        )?;
        writeln!(f, "th {{ background-color: #eee; }}")?;
        writeln!(f, "td.instance {{ text-align: left; }}")?;
        writeln!(f, "</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(
            f,
            "<h1>{} vs {}</h1>",
            escape(self.table.base_name()),
            escape(&self.table.run_names().join(", "))
        )?;
        writeln!(f, "<table>")?;

        write!(f, "<tr><th>Instance</th>")?;
        for spec in self.table.columns() {
            write!(f, "<th>{}</th>", escape(&spec.label))?;
        }
        writeln!(f, "</tr>")?;

        let rows: Vec<String> = (0..self.table.nrows())
            .into_par_iter()
            .map(|row| render_row(self.table, row))
            .collect();
        for row in &rows {
            f.write_str(row)?;
        }

        writeln!(f, "</table>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")?;
        Ok(())
    }
}

fn render_row(table: &ComparisonTable, row: usize) -> String {
    let instance = table.instances().get(row).map(String::as_str).unwrap_or("");
    let mut line = format!("<tr><td class=\"instance\">{}</td>", escape(instance));
    for column in 0..table.ncols() {
        line.push_str(&render_cell(table, row, column));
    }
    line.push_str("</tr>\n");
    line
}

fn render_cell(table: &ComparisonTable, row: usize, column: usize) -> String {
    let cell = match table.cell(row, column) {
        Some(cell) => cell,
        None => return "<td></td>".to_string(),
    };
    let mut attrs = String::new();
    if let Some(rgb) = table.cell_color(row, column) {
        attrs.push_str(&format!(" style=\"background-color: {}\"", rgb.css()));
    }
    let others = cell.comparison_values();
    if !others.is_empty() {
        let joined = others
            .iter()
            .map(|value| escape(value))
            .collect::<Vec<String>>()
            .join("&#10;");
        attrs.push_str(&format!(" title=\"{}\"", joined));
    }
    format!("<td{}>{}</td>", attrs, escape(&cell.raw))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_html(table: &ComparisonTable) -> String {
    HtmlTable::new(table).to_string()
}

pub fn write_html(table: &ComparisonTable, filename: &PathBuf) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    write!(file, "{}", HtmlTable::new(table))?;
    Ok(())
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

    fn html_table() -> ComparisonTable {
        ComparisonTable::new(
            "base".to_string(),
            vec!["other".to_string()],
            vec![ColumnSpec::from_label("Time_total")],
            vec!["app<1>".to_string(), "app2".to_string()],
            vec![
                vec![cell("5", &[Some("10")])],
                vec![cell("7", &[Some("7")])],
            ],
        )
    }

    #[test]
    fn test_colored_cells_carry_a_style() {
        let html = render_html(&html_table());
        assert!(html.contains("style=\"background-color: rgb("));
        assert!(html.contains("title=\"10\""));
    }

    #[test]
    fn test_uncolored_cells_have_no_style() {
        let html = render_html(&html_table());
        // Row app2 compares equal, so its cell gets no style attribute
        assert!(html.contains("<td title=\"7\">7</td>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let html = render_html(&html_table());
        assert!(html.contains("app&lt;1&gt;"));
        assert!(!html.contains("app<1>"));
    }

    #[test]
    fn test_header_lists_every_column() {
        let html = render_html(&html_table());
        assert!(html.contains("<th>Instance</th>"));
        assert!(html.contains("<th>Time_total</th>"));
        assert!(html.contains("<h1>base vs other</h1>"));
    }
}
