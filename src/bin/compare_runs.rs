use clap::Parser;
use log::warn;
use pretty_env_logger;
use rubberband_compare::color::MetricKind;
use rubberband_compare::compare::{
    compute_column_stats, ComparisonTable, ComparisonTableBuilder, RowPolicy, TestRun,
};
use std::process::ExitCode;
use std::{error::Error, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    about = "Compare solver test runs and export a colored comparison table",
    long_about = None,
    version = env!("RUBBERBAND_COMPARE_VERSION")
)]
struct Cli {
    /// Path to the primary run CSV
    base: PathBuf,

    /// Paths to the comparison run CSVs (space-separated)
    #[clap(short, long, value_delimiter = ' ', num_args = 1.., required = true)]
    runs: Vec<PathBuf>,

    /// Write the colored comparison table to this HTML file
    #[clap(short, long)]
    output_html: Option<PathBuf>,

    /// Write the merged wide table to this CSV file
    #[clap(long)]
    output_csv: Option<PathBuf>,

    /// Keep instances missing from some runs instead of intersecting
    #[clap(long, action)]
    union_rows: bool,

    /// Override the detected kind of a column, e.g. "Gap=bound" (repeatable)
    #[clap(long, value_parser = parse_kind_override)]
    kind: Vec<(String, MetricKind)>,

    /// Treat these columns as bigger-is-better (comma-separated)
    #[clap(long, value_delimiter = ',')]
    invert: Vec<String>,

    /// Plot this column across instances
    #[clap(long)]
    plot_column: Option<String>,

    /// Save the column plot to an HTML file
    #[clap(long)]
    save_plot: Option<PathBuf>,

    /// Open the column plot in a browser
    #[clap(long, action)]
    show_plot: bool,

    /// Use a logarithmic y-axis for the plot
    #[clap(long, action)]
    log_y: bool,
}

fn parse_kind_override(raw: &str) -> Result<(String, MetricKind), String> {
    let (label, kind) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=KIND, got '{}'", raw))?;
    let kind = match kind.to_ascii_lowercase().as_str() {
        "time" => MetricKind::Time,
        "nodes" | "nodecount" => MetricKind::NodeCount,
        "bound" => MetricKind::Bound,
        "generic" => MetricKind::Generic,
        other => {
            return Err(format!(
                "unknown kind '{}' (use time, nodes, bound or generic)",
                other
            ))
        }
    };
    Ok((label.to_string(), kind))
}

fn entrypoint() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

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

    let mut builder = ComparisonTableBuilder::default();
    builder.base(&base);
    builder.comparisons(&comparisons);
    builder.row_policy(&row_policy);
    let mut table = builder.build()?;

    for (label, kind) in &cli.kind {
        if !table.set_kind_by_label(label, *kind) {
            warn!("No column named '{}' to reclassify", label);
        }
    }
    for label in &cli.invert {
        if !table.set_invert_by_label(label, true) {
            warn!("No column named '{}' to invert", label);
        }
    }

    if let Some(output_path) = &cli.output_html {
        table.write_html(output_path)?;
        println!("Wrote {}", output_path.display());
    }

    if let Some(output_path) = &cli.output_csv {
        table.write_csv(output_path)?;
        println!("Wrote {}", output_path.display());
    }

    if cli.show_plot || cli.save_plot.is_some() {
        let label = cli
            .plot_column
            .as_deref()
            .ok_or("--plot-column is required when plotting")?;
        let column = table
            .column_index(label)
            .ok_or_else(|| format!("No column named '{}'", label))?;
        let plot = table.make_column_plot(column, cli.log_y)?;
        if let Some(save_path) = &cli.save_plot {
            plot.write_html(save_path);
            println!("Saved plot to {}", save_path.display());
        }
        if cli.show_plot {
            plot.show();
        }
    }

    // With no outputs requested, print a per-column summary instead
    if cli.output_html.is_none()
        && cli.output_csv.is_none()
        && cli.save_plot.is_none()
        && !cli.show_plot
    {
        print_summary(&table);
    }

    Ok(())
}

fn print_summary(table: &ComparisonTable) {
    println!(
        "{} instances x {} columns, {} vs {}",
        table.nrows(),
        table.ncols(),
        table.base_name(),
        table.run_names().join(", ")
    );
    for (column, spec) in table.columns().iter().enumerate() {
        match compute_column_stats(table, column) {
            Some(stats) => println!(
                "  {:<20} n={:<4} min={:<12.4} max={:<12.4} mean={:<12.4} std={:.4}",
                spec.label, stats.numeric_count, stats.min, stats.max, stats.mean, stats.std_dev
            ),
            None => println!("  {:<20} (no numeric values)", spec.label),
        }
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
