//! [`Canvas`] host that records every primitive call.
//!
//! Useful wherever the exact sequence of drawing operations matters more than the pixels:
//! layout assertions, determinism checks, and debugging a misplaced element.

use genpdf::style::Color;

use super::{Canvas, CanvasError, TextOptions};

/// One recorded primitive call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `set_fill_color`
    FillColor(Color),
    /// `set_stroke_color`
    StrokeColor(Color),
    /// `set_text_color`
    TextColor(Color),
    /// `set_line_width`
    LineWidth(f64),
    /// `fill_rect`
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// `stroke_rect`
    StrokeRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// `fill_rounded_rect`
    FillRoundedRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },
    /// `draw_line`
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// `draw_text`
    Text {
        /// Printed text.
        text: String,
        /// Anchor x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Styling.
        options: TextOptions,
    },
    /// `advance_page`
    AdvancePage,
}

/// Canvas that keeps the drawing calls instead of rendering them.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    pages: usize,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Creates an empty recording with one blank page.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            pages: 1,
        }
    }

    /// Every recorded call, in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded calls grouped per page; index 0 is the first page.
    pub fn pages(&self) -> Vec<&[DrawCommand]> {
        self.commands
            .split(|command| matches!(command, DrawCommand::AdvancePage))
            .collect()
    }

    /// All text runs in issue order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawCommand::StrokeColor(color));
    }

    fn set_text_color(&mut self, color: Color) {
        self.push(DrawCommand::TextColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) {
        self.push(DrawCommand::FillRoundedRect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, options: TextOptions) {
        self.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            options,
        });
    }

    fn advance_page(&mut self) {
        self.pages += 1;
        self.push(DrawCommand::AdvancePage);
    }

    fn page_number(&self) -> usize {
        self.pages
    }

    /// Renders the recording as one `Debug` line per call.
    fn serialize(self) -> Result<Vec<u8>, CanvasError> {
        let mut out = String::new();
        for command in &self.commands {
            out.push_str(&format!("{command:?}\n"));
        }
        Ok(out.into_bytes())
    }
}
