// rubberband-compare/src/color/mod.rs

mod colorize;
mod palette;

pub use colorize::{colorize, MetricKind, MetricSample, ParsedValue};
pub use palette::{background_color, interpolate_color, Rgb};
pub use palette::{DARK_GRAY, GRAY, GREEN, RED, WHITE};
