//! Native vector PDF reports: a themed cover, banded content pages and charts drawn
//! from canvas primitives.
//!
//! A [`builder::ReportBuilder`] draws onto any [`canvas::Canvas`].  Use
//! [`canvas::PdfCanvas`] for real documents and [`canvas::RecordingCanvas`] to inspect
//! the exact sequence of drawing calls.

pub mod builder;
pub mod canvas;
pub mod charts;
pub mod config;
pub mod demos;
pub mod elements;
pub mod fonts;
pub mod geometry;
pub mod model;
pub mod page;
pub mod theme;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{BuildOutcome, RenderedReport, ReportBuilder, ReportError};
pub use config::ReportConfig;
pub use theme::{Theme, ThemeColor};
