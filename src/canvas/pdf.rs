//! [`Canvas`] host backed by `printpdf`.

use std::io::BufWriter;

use genpdf::style::Color;
use log::debug;
use printpdf::{
    BuiltinFont, Cmyk, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use super::{Canvas, CanvasError, TextAlign, TextOptions};
use crate::fonts::{self, MM_PER_PT};
use crate::geometry::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const LAYER_NAME: &str = "Layer 1";
/// Bézier handle length for a quarter circle, relative to the radius.
const KAPPA: f64 = 0.552_284_75;

fn pdf_color(color: Color) -> printpdf::Color {
    match color {
        Color::Rgb(r, g, b) => printpdf::Color::Rgb(Rgb::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            None,
        )),
        Color::Cmyk(c, m, y, k) => printpdf::Color::Cmyk(Cmyk::new(
            f64::from(c) / 255.0,
            f64::from(m) / 255.0,
            f64::from(y) / 255.0,
            f64::from(k) / 255.0,
            None,
        )),
        Color::Greyscale(value) => {
            printpdf::Color::Greyscale(Greyscale::new(f64::from(value) / 255.0, None))
        }
    }
}

/// Style state that has to be replayed onto every new page's content stream.
#[derive(Clone, Copy, Debug)]
struct GraphicsState {
    fill: Color,
    stroke: Color,
    text: Color,
    line_width_mm: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill: Color::Rgb(0, 0, 0),
            stroke: Color::Rgb(0, 0, 0),
            text: Color::Rgb(0, 0, 0),
            line_width_mm: 0.2,
        }
    }
}

/// Writes a fixed-size A4 portrait PDF using the built-in Helvetica faces.
pub struct PdfCanvas {
    document: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    state: GraphicsState,
    pages: usize,
}

impl PdfCanvas {
    /// Creates a document with a single blank page.
    pub fn new(title: &str) -> Result<Self, CanvasError> {
        let (document, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let regular = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| CanvasError::Font(err.to_string()))?;
        let bold = document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| CanvasError::Font(err.to_string()))?;
        let layer = document.get_page(page).get_layer(layer);

        let canvas = Self {
            document,
            layer,
            regular,
            bold,
            state: GraphicsState::default(),
            pages: 1,
        };
        canvas.apply_state();
        Ok(canvas)
    }

    fn apply_state(&self) {
        self.layer.set_fill_color(pdf_color(self.state.fill));
        self.layer.set_outline_color(pdf_color(self.state.stroke));
        self.layer.set_outline_thickness(self.state.line_width_mm / MM_PER_PT);
    }

    fn point(x: f64, y: f64) -> Point {
        Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - y))
    }

    fn rect_path(x: f64, y: f64, width: f64, height: f64) -> Vec<(Point, bool)> {
        vec![
            (Self::point(x, y), false),
            (Self::point(x + width, y), false),
            (Self::point(x + width, y + height), false),
            (Self::point(x, y + height), false),
        ]
    }

    fn add_path(&self, points: Vec<(Point, bool)>, fill: bool, stroke: bool) {
        self.layer.add_shape(Line {
            points,
            is_closed: true,
            has_fill: fill,
            has_stroke: stroke,
            is_clipping_path: false,
        });
    }
}

impl Canvas for PdfCanvas {
    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
        self.layer.set_fill_color(pdf_color(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
        self.layer.set_outline_color(pdf_color(color));
    }

    fn set_text_color(&mut self, color: Color) {
        self.state.text = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width_mm = width;
        self.layer.set_outline_thickness(width / MM_PER_PT);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.add_path(Self::rect_path(x, y, width, height), true, false);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.add_path(Self::rect_path(x, y, width, height), false, true);
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) {
        let rx = rx.min(width / 2.0);
        let ry = ry.min(height / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            self.fill_rect(x, y, width, height);
            return;
        }

        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let (right, bottom) = (x + width, y + height);
        // A point flagged `true` followed by two handles starts a cubic segment.
        let points = vec![
            (Self::point(x + rx, y), false),
            (Self::point(right - rx, y), true),
            (Self::point(right - rx + kx, y), true),
            (Self::point(right, y + ry - ky), false),
            (Self::point(right, y + ry), false),
            (Self::point(right, bottom - ry), true),
            (Self::point(right, bottom - ry + ky), true),
            (Self::point(right - rx + kx, bottom), false),
            (Self::point(right - rx, bottom), false),
            (Self::point(x + rx, bottom), true),
            (Self::point(x + rx - kx, bottom), true),
            (Self::point(x, bottom - ry + ky), false),
            (Self::point(x, bottom - ry), false),
            (Self::point(x, y + ry), true),
            (Self::point(x, y + ry - ky), true),
            (Self::point(x + rx - kx, y), false),
            (Self::point(x + rx, y), false),
        ];
        self.add_path(points, true, false);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.layer.add_shape(Line {
            points: vec![(Self::point(x1, y1), false), (Self::point(x2, y2), false)],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, options: TextOptions) {
        if text.is_empty() {
            return;
        }

        let width = fonts::text_width_mm(text, options.font_size, options.bold);
        let start_x = match options.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let font = if options.bold {
            &self.bold
        } else {
            &self.regular
        };

        // PDF text is painted with the fill color.
        self.layer.set_fill_color(pdf_color(self.state.text));
        self.layer.use_text(
            text,
            options.font_size,
            Mm(start_x),
            Mm(PAGE_HEIGHT_MM - y),
            font,
        );
        self.layer.set_fill_color(pdf_color(self.state.fill));
    }

    fn advance_page(&mut self) {
        let (page, layer) = self
            .document
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.document.get_page(page).get_layer(layer);
        self.pages += 1;
        self.apply_state();
        debug!("PDF canvas advanced to page {}", self.pages);
    }

    fn page_number(&self) -> usize {
        self.pages
    }

    fn serialize(self) -> Result<Vec<u8>, CanvasError> {
        let Self { document, .. } = self;
        let mut writer = BufWriter::new(Vec::new());
        document
            .save(&mut writer)
            .map_err(|err| CanvasError::Serialize(err.to_string()))?;
        writer
            .into_inner()
            .map_err(|err| CanvasError::Io(err.into_error()))
    }
}
