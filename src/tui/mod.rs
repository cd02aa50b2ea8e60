//! TUI module for Rubberband Compare
//!
//! Interactive terminal application for browsing solver run comparisons.

mod app;
mod colors;
mod event;
mod export;
mod preview;
mod table;
pub mod ui;

pub use app::{App, ExportOptions, Focus, OutputFormat, StatusLevel, StatusMessage};
pub use event::{Event, EventHandler};
pub use table::TableView;
