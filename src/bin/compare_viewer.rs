//! Rubberband Compare - Interactive TUI
//!
//! Terminal application for browsing solver run comparisons with the
//! same cell coloring as the HTML export.
//!
//! ## Usage
//!
//! ```bash
//! # Compare a primary run against two others
//! compare-viewer base.csv -r run_a.csv run_b.csv
//!
//! # Keep instances missing from some runs, export into ./reports/
//! compare-viewer base.csv -r run_a.csv --union-rows -o ./reports/
//! ```

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;

use rubberband_compare::compare::{ComparisonTableBuilder, RowPolicy, TestRun};
use rubberband_compare::tui::{App, Event, EventHandler, TableView};

#[derive(Parser, Debug)]
#[command(
    name = "compare-viewer",
    author,
    version,
    about = "Interactive comparison table viewer for solver test runs"
)]
struct Cli {
    /// Path to the primary run CSV
    base: PathBuf,

    /// Paths to the comparison run CSVs (space-separated)
    #[clap(short, long, value_delimiter = ' ', num_args = 1.., required = true)]
    runs: Vec<PathBuf>,

    /// Output directory for exported files
    #[clap(short, long, default_value = ".", value_name = "DIR")]
    output: PathBuf,

    /// Keep instances missing from some runs instead of intersecting
    #[clap(long, action)]
    union_rows: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load everything before touching the terminal
    let base = TestRun::from_csv_path(&cli.base)?;
    let mut comparisons = Vec::with_capacity(cli.runs.len());
    for path in &cli.runs {
        comparisons.push(TestRun::from_csv_path(path)?);
    }
    let row_policy = if cli.union_rows {
        RowPolicy::Union
    } else {
        RowPolicy::Intersection
    };
    let table = ComparisonTableBuilder::default()
        .base(&base)
        .comparisons(&comparisons)
        .row_policy(&row_policy)
        .build()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(TableView::new(table), cli.output);

    // Create event handler (100ms tick rate)
    let mut event_handler = EventHandler::new(100);

    // Main loop
    loop {
        // Draw the UI
        terminal.draw(|frame| {
            rubberband_compare::tui::ui::draw(frame, &mut app);
        })?;

        // Handle events
        match event_handler.next().await? {
            Event::Tick => {
                app.on_tick();
            }
            Event::Key(key) => {
                app.on_key(key);
                if app.should_quit {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                app.on_mouse(mouse);
            }
            Event::Resize(_, _) => {
                // Terminal will redraw automatically
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    println!(
        "Browsed {} instances x {} columns ({} vs {})",
        app.view.table.nrows(),
        app.view.table.ncols(),
        app.view.table.base_name(),
        app.view.table.run_names().join(", ")
    );

    Ok(())
}
