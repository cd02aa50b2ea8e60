//! Cell color coding for the comparison table
//!
//! Terminal colors mirror the HTML export:
//! - Green shades: primary value beats the whole comparison band
//! - Red shades: primary value trails the whole comparison band
//! - Gray shades: inside the band, or ratios carry no meaning
//! - Unstyled: values compare equal or are not comparable

use ratatui::style::Color;

use crate::color::Rgb;

/// Returns (foreground, background) colors for a cell
pub fn get_cell_colors(cell_rgb: Option<Rgb>, is_cursor: bool, is_selected: bool) -> (Color, Color) {
    if is_cursor {
        return (Color::Black, Color::White);
    }

    match cell_rgb {
        Some(rgb) => (Color::Black, Color::Rgb(rgb.r, rgb.g, rgb.b)),
        None if is_selected => (Color::Black, Color::Rgb(235, 235, 235)),
        None => (Color::Reset, Color::Reset),
    }
}
