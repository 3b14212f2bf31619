//! Sample reports and the runners used by the command line tool.

pub mod analytics;
pub mod sales;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::info;

use crate::builder::{RenderedReport, ReportBuilder};

pub use analytics::analytics_report;
pub use sales::sales_report;

/// Directory used when the caller does not pick one.
pub const DEFAULT_OUTPUT_DIR: &str = "target/reports";

/// File name for an exported report, e.g. `cafe-central-sales-2024-01-31.pdf`.
pub fn export_file_name(brand: &str, kind: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}-{}.pdf",
        slug(brand),
        slug(kind),
        date.format("%Y-%m-%d")
    )
}

fn slug(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-")
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn write_report(
    output_dir: &Path,
    builder: &ReportBuilder,
    kind: &str,
    pdf: &RenderedReport,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(output_dir)?;
    let date = builder.metadata().generated_at().date();
    let path = output_dir.join(export_file_name(builder.config().brand(), kind, date));
    fs::write(&path, &pdf.bytes)?;
    info!("Wrote {}", path.display());
    println!("Generated {} ({} bytes)", path.display(), pdf.bytes.len());
    Ok(path)
}

/// Renders the sales report into `output_dir`.
pub fn run_sales(output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let builder = sales_report(now());
    let pdf = builder.render()?;
    write_report(output_dir, &builder, sales::KIND, &pdf)
}

/// Renders the analytics report into `output_dir`.
pub fn run_analytics(output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let builder = analytics_report(now());
    let pdf = builder.render()?;
    write_report(output_dir, &builder, analytics::KIND, &pdf)
}

/// Renders the sales report with section bookmarks into `output_dir`.
#[cfg(feature = "bookmarks")]
pub fn run_sales_bookmarks(output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let builder = sales_report(now());
    let pdf = builder.render_with_bookmarks()?;
    let kind = format!("{}-bookmarks", sales::KIND);
    write_report(output_dir, &builder, &kind, &pdf)
}

/// Stub used when the `bookmarks` feature is disabled.
#[cfg(not(feature = "bookmarks"))]
pub fn run_sales_bookmarks(_output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Enable the `bookmarks` feature to render bookmarked output",
    )
    .into())
}

/// Renders every sample report into `output_dir`.
pub fn run_all(output_dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    #[cfg_attr(not(feature = "bookmarks"), allow(unused_mut))]
    let mut written = vec![run_sales(output_dir)?, run_analytics(output_dir)?];

    #[cfg(feature = "bookmarks")]
    written.push(run_sales_bookmarks(output_dir)?);

    #[cfg(not(feature = "bookmarks"))]
    println!("Skipping bookmarks render. Enable the `bookmarks` feature to include it.");

    println!("All renders completed successfully.");
    Ok(written)
}
