// rubberband-compare/src/compare/mod.rs

mod errors;
mod html;
mod plot;
mod stats;
mod table;
mod table_builder;
mod testrun;

pub use errors::ComparisonTableBuilderError;
pub use errors::TestRunLoadError;
pub use html::{render_html, write_html, HtmlTable};
pub use plot::{make_column_plot, ColumnPlotError};
pub use stats::{compute_column_stats, ColumnStats};
pub use table::{CellData, ColumnSpec, ComparisonTable, RowPolicy};
pub use table_builder::ComparisonTableBuilder;
pub use testrun::TestRun;
