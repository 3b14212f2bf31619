use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vector_report::demos;

/// Renders the bundled sample reports to PDF files.
///
/// Files are named `<brand>-<kind>-<date>.pdf` and written to `--output-dir`.
#[derive(Parser)]
#[command(author, version, about = "Render the vector_report sample reports")]
struct Cli {
    /// Directory receiving the generated PDF files.
    #[arg(long, global = true, default_value = demos::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the monthly sales report.
    #[command(name = "report", aliases = ["sales"])]
    Report,

    /// Render the web analytics report.
    #[command(name = "analytics")]
    Analytics,

    /// Render the sales report with section bookmarks.
    #[command(name = "report-bookmarks", aliases = ["report_bookmarks", "bookmarks"])]
    ReportBookmarks,

    /// Render every sample report.
    #[command(name = "run-all", aliases = ["run_all", "all"])]
    RunAll,
}

fn main() {
    let cli = Cli::parse();
    let output_dir = cli.output_dir.as_path();

    let result = match cli.command {
        Commands::Report => demos::run_sales(output_dir).map(drop),
        Commands::Analytics => demos::run_analytics(output_dir).map(drop),
        Commands::ReportBookmarks => demos::run_sales_bookmarks(output_dir).map(drop),
        Commands::RunAll => demos::run_all(output_dir).map(drop),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
