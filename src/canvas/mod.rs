//! The drawing surface a report is composed on.
//!
//! [`Canvas`] is the small set of stateful vector primitives every renderer in this crate
//! relies on.  Two hosts ship with the crate: [`pdf::PdfCanvas`] writes a real PDF through
//! `printpdf`, and [`recording::RecordingCanvas`] captures the calls for inspection.
//!
//! Coordinates are millimetres, measured from the top-left corner of a fixed A4 portrait
//! page.  The y coordinate passed to [`Canvas::draw_text`] is the text baseline.

use std::fmt;
use std::io;

use genpdf::style::Color;

pub mod pdf;
pub mod recording;

pub use pdf::PdfCanvas;
pub use recording::{DrawCommand, RecordingCanvas};

/// Horizontal anchoring of a text run relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// The run starts at x.
    #[default]
    Left,
    /// The run is centered on x.
    Center,
    /// The run ends at x.
    Right,
}

/// Per-call text styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextOptions {
    /// Font size in points.
    pub font_size: f64,
    /// Whether the bold face is used.
    pub bold: bool,
    /// Anchoring of the run.
    pub align: TextAlign,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            bold: false,
            align: TextAlign::Left,
        }
    }
}

impl TextOptions {
    /// Regular text of the given size, left aligned.
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    /// Sets the bold flag and returns the updated options.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Sets the alignment and returns the updated options.
    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Shorthand for centered text.
    pub fn centered(self) -> Self {
        self.aligned(TextAlign::Center)
    }

    /// Shorthand for right aligned text.
    pub fn right(self) -> Self {
        self.aligned(TextAlign::Right)
    }
}

/// Errors raised by a canvas host.
#[derive(Debug)]
pub enum CanvasError {
    /// A font could not be registered with the document.
    Font(String),
    /// The finished document could not be written out.
    Serialize(String),
    /// An I/O failure while writing the document.
    Io(io::Error),
}

impl From<io::Error> for CanvasError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Font(message) => write!(f, "Failed to register font: {message}"),
            Self::Serialize(message) => write!(f, "Failed to serialize document: {message}"),
            Self::Io(err) => write!(f, "I/O error while writing document: {err}"),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Font(_) | Self::Serialize(_) => None,
        }
    }
}

/// Stateful vector drawing surface.
///
/// Fill color, stroke color, text color and line width persist until changed.  A fresh
/// canvas holds exactly one blank page; [`Canvas::advance_page`] appends another and makes
/// it current.  A canvas is owned by a single build and is never shared.
pub trait Canvas {
    /// Sets the color used by fill operations.
    fn set_fill_color(&mut self, color: Color);

    /// Sets the color used by stroke and line operations.
    fn set_stroke_color(&mut self, color: Color);

    /// Sets the color used for text runs.
    fn set_text_color(&mut self, color: Color);

    /// Sets the stroke width in millimetres.
    fn set_line_width(&mut self, width: f64);

    /// Fills a rectangle with the current fill color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Outlines a rectangle with the current stroke color and line width.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fills a rectangle whose corners are rounded by the radii `rx` and `ry`.
    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64);

    /// Strokes a straight segment.
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Prints a single line of text with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, options: TextOptions);

    /// Starts a new page of the same size and makes it current.
    fn advance_page(&mut self);

    /// One-based number of the current page.
    fn page_number(&self) -> usize;

    /// Consumes the canvas and returns the finished document.
    fn serialize(self) -> Result<Vec<u8>, CanvasError>
    where
        Self: Sized;
}
