//! Page lifecycle of a report: the cover, then numbered content pages.
//!
//! The composer walks `Idle -> Cover -> Content(1) -> ... -> Content(N) -> Done`.  Moving to
//! a new page advances the canvas before that page's header is drawn; drawing headers and
//! footers never advances by itself.  The footer is a separate call so the page body can
//! be drawn in between.

use std::fmt;

use log::debug;

use crate::canvas::{Canvas, TextOptions};
use crate::config::ReportConfig;
use crate::fonts;
use crate::geometry::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::model::{PageMetadata, ReportMetadata};
use crate::theme::{Theme, ThemeColor};

/// Horizontal page margin.
pub const MARGIN_MM: f64 = 15.0;
/// Height of the banded header of content pages.
pub const HEADER_HEIGHT_MM: f64 = 30.0;
/// Top of the footer area of content pages.
pub const FOOTER_TOP_MM: f64 = 282.0;
/// First free line of a content page, below the section heading.
pub const BODY_TOP_MM: f64 = 50.0;

const SECTION_TITLE_BASELINE: f64 = 40.0;
const SECTION_SUBTITLE_BASELINE: f64 = 46.0;

const COVER_BAND_HEIGHT: f64 = 110.0;
const COVER_STRIPE_HEIGHT: f64 = 4.0;
const LOGO_WIDTH: f64 = 50.0;
const LOGO_HEIGHT: f64 = 20.0;
const LOGO_TOP: f64 = 28.0;
const COVER_TITLE_SIZE: f64 = 26.0;
const COVER_TITLE_LINE_HEIGHT: f64 = 11.0;

/// Position of the composer in the page sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    /// Nothing has been drawn yet.
    Idle,
    /// The cover is the current page.
    Cover,
    /// A content page is current.
    Content(PageMetadata),
    /// The sequence is complete.
    Done,
}

/// Out-of-order page transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageError {
    /// The cover can only be composed once, as the first page.
    CoverAlreadyComposed,
    /// A content page was requested before the cover.
    CoverMissing,
    /// All announced content pages have already been composed.
    PagesExhausted {
        /// Number of content pages announced up front.
        total_pages: usize,
    },
    /// The sequence was already finished.
    Finished,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoverAlreadyComposed => write!(f, "The cover page was already composed"),
            Self::CoverMissing => write!(f, "Content pages require the cover to be composed first"),
            Self::PagesExhausted { total_pages } => write!(
                f,
                "All {} announced content pages were already composed",
                total_pages
            ),
            Self::Finished => write!(f, "The page sequence is already finished"),
        }
    }
}

impl std::error::Error for PageError {}

/// Draws the page shell (cover, headers, footers) and tracks page numbering.
pub struct PageComposer<'a> {
    theme: &'a Theme,
    metadata: &'a ReportMetadata,
    config: &'a ReportConfig,
    total_pages: usize,
    state: PageState,
}

impl<'a> PageComposer<'a> {
    /// Creates a composer for a report with `total_pages` content pages.
    pub fn new(
        theme: &'a Theme,
        metadata: &'a ReportMetadata,
        config: &'a ReportConfig,
        total_pages: usize,
    ) -> Self {
        Self {
            theme,
            metadata,
            config,
            total_pages,
            state: PageState::Idle,
        }
    }

    /// Current position in the page sequence.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Number of content pages, excluding the cover.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Draws the cover on the canvas' current page, which must be its first.
    pub fn compose_cover<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), PageError> {
        match self.state {
            PageState::Idle => {}
            PageState::Done => return Err(PageError::Finished),
            _ => return Err(PageError::CoverAlreadyComposed),
        }

        self.draw_cover(canvas);
        self.state = PageState::Cover;
        debug!("Composed cover for '{}'", self.metadata.title());
        Ok(())
    }

    /// Advances to the next content page and draws its header and section heading.
    pub fn begin_content_page<C: Canvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        heading: &str,
        subheading: Option<&str>,
    ) -> Result<PageMetadata, PageError> {
        let page = match self.state {
            PageState::Idle => return Err(PageError::CoverMissing),
            PageState::Done => return Err(PageError::Finished),
            PageState::Cover if self.total_pages > 0 => PageMetadata::first(self.total_pages),
            PageState::Cover => {
                return Err(PageError::PagesExhausted {
                    total_pages: self.total_pages,
                })
            }
            PageState::Content(current) => current.advance().ok_or(PageError::PagesExhausted {
                total_pages: self.total_pages,
            })?,
        };

        canvas.advance_page();
        self.state = PageState::Content(page);
        self.draw_header(canvas);
        self.draw_section_heading(canvas, heading, subheading);
        debug!(
            "Composing content page {} of {}",
            page.page_number(),
            page.total_pages()
        );
        Ok(page)
    }

    /// Marks the sequence as finished.
    pub fn finish(&mut self) {
        self.state = PageState::Done;
    }

    fn draw_cover<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let theme = self.theme;
        let center = PAGE_WIDTH_MM / 2.0;

        canvas.set_fill_color(theme.color(ThemeColor::Light));
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        canvas.set_fill_color(theme.color(ThemeColor::Primary));
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, COVER_BAND_HEIGHT);
        canvas.set_fill_color(theme.color(ThemeColor::Secondary));
        canvas.fill_rect(0.0, COVER_BAND_HEIGHT, PAGE_WIDTH_MM, COVER_STRIPE_HEIGHT);

        canvas.set_fill_color(theme.color(ThemeColor::White));
        canvas.fill_rounded_rect(
            center - LOGO_WIDTH / 2.0,
            LOGO_TOP,
            LOGO_WIDTH,
            LOGO_HEIGHT,
            4.0,
            4.0,
        );
        canvas.set_text_color(theme.color(ThemeColor::Primary));
        canvas.draw_text(
            &fonts::fit_text(self.config.brand(), LOGO_WIDTH - 6.0, 14.0, true),
            center,
            LOGO_TOP + LOGO_HEIGHT / 2.0 + 2.0,
            TextOptions::sized(14.0).bold().centered(),
        );

        canvas.set_text_color(theme.color(ThemeColor::White));
        let title_lines = fonts::wrap_text(
            self.metadata.title(),
            PAGE_WIDTH_MM - 2.0 * MARGIN_MM,
            COVER_TITLE_SIZE,
            true,
        );
        let mut y = 70.0;
        for line in title_lines.iter().take(2) {
            canvas.draw_text(
                line,
                center,
                y,
                TextOptions::sized(COVER_TITLE_SIZE).bold().centered(),
            );
            y += COVER_TITLE_LINE_HEIGHT;
        }

        if let Some(subtitle) = self.metadata.subtitle() {
            canvas.draw_text(subtitle, center, y + 4.0, TextOptions::sized(14.0).centered());
        }

        canvas.set_text_color(theme.color(ThemeColor::Text));
        if let Some(period) = self.metadata.period_label() {
            canvas.draw_text(
                period,
                center,
                140.0,
                TextOptions::sized(13.0).bold().centered(),
            );
        }
        canvas.set_text_color(theme.color(ThemeColor::Muted));
        canvas.draw_text(
            &self.config.generated_stamp(self.metadata.generated_at()),
            center,
            150.0,
            TextOptions::sized(11.0).centered(),
        );
        canvas.draw_text(
            self.config.cover_footer(),
            center,
            PAGE_HEIGHT_MM - 12.0,
            TextOptions::sized(9.0).centered(),
        );
    }

    fn draw_header<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let theme = self.theme;
        canvas.set_fill_color(theme.color(ThemeColor::Primary));
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, HEADER_HEIGHT_MM);

        let date = self.config.format_date(self.metadata.generated_at());
        let date_width = fonts::text_width_mm(&date, 9.0, false);
        let title_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - date_width - 5.0;

        canvas.set_text_color(theme.color(ThemeColor::White));
        canvas.draw_text(
            &fonts::fit_text(self.metadata.title(), title_width, 16.0, true),
            MARGIN_MM,
            13.0,
            TextOptions::sized(16.0).bold(),
        );
        if let Some(subtitle) = self.metadata.subtitle() {
            canvas.draw_text(
                &fonts::fit_text(subtitle, title_width, 10.0, false),
                MARGIN_MM,
                21.0,
                TextOptions::sized(10.0),
            );
        }
        canvas.draw_text(
            &date,
            PAGE_WIDTH_MM - MARGIN_MM,
            13.0,
            TextOptions::sized(9.0).right(),
        );
    }

    fn draw_section_heading<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        heading: &str,
        subheading: Option<&str>,
    ) {
        let width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        canvas.set_text_color(self.theme.color(ThemeColor::Text));
        canvas.draw_text(
            &fonts::fit_text(heading, width, 14.0, true),
            MARGIN_MM,
            SECTION_TITLE_BASELINE,
            TextOptions::sized(14.0).bold(),
        );
        if let Some(subheading) = subheading {
            canvas.set_text_color(self.theme.color(ThemeColor::Muted));
            canvas.draw_text(
                &fonts::fit_text(subheading, width, 9.0, false),
                MARGIN_MM,
                SECTION_SUBTITLE_BASELINE,
                TextOptions::sized(9.0),
            );
        }
    }

    /// Draws the footer of a content page: rule, timestamp, page marker and stamp.
    pub fn draw_footer<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        page_number: usize,
        total_pages: usize,
    ) {
        let theme = self.theme;
        canvas.set_stroke_color(theme.color(ThemeColor::Border));
        canvas.set_line_width(0.3);
        canvas.draw_line(
            MARGIN_MM,
            FOOTER_TOP_MM,
            PAGE_WIDTH_MM - MARGIN_MM,
            FOOTER_TOP_MM,
        );

        let baseline = FOOTER_TOP_MM + 6.0;
        canvas.set_text_color(theme.color(ThemeColor::Muted));
        canvas.draw_text(
            &self.config.generated_stamp(self.metadata.generated_at()),
            MARGIN_MM,
            baseline,
            TextOptions::sized(8.0),
        );
        canvas.draw_text(
            &self.config.page_label(page_number, total_pages),
            PAGE_WIDTH_MM / 2.0,
            baseline,
            TextOptions::sized(8.0).bold().centered(),
        );
        canvas.draw_text(
            &format!("{} \u{2022} {}", self.config.brand(), self.config.confidentiality()),
            PAGE_WIDTH_MM - MARGIN_MM,
            baseline,
            TextOptions::sized(8.0).right(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{PageComposer, PageError, PageState};
    use crate::canvas::{Canvas, DrawCommand, RecordingCanvas};
    use crate::config::ReportConfig;
    use crate::model::ReportMetadata;
    use crate::theme::Theme;
    use chrono::NaiveDate;

    fn metadata() -> ReportMetadata {
        let generated_at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(9, 15, 0))
            .expect("valid timestamp");
        ReportMetadata::new("Sales Report", generated_at).with_subtitle(Some("Q1".to_owned()))
    }

    #[test]
    fn content_pages_advance_the_canvas_first() {
        let (theme, meta, config) = (Theme::default(), metadata(), ReportConfig::default());
        let mut composer = PageComposer::new(&theme, &meta, &config, 2);
        let mut canvas = RecordingCanvas::new();

        composer.compose_cover(&mut canvas).expect("cover");
        assert_eq!(canvas.page_number(), 1);

        let start = canvas.commands().len();
        let page = composer
            .begin_content_page(&mut canvas, "Overview", None)
            .expect("page 1");
        assert_eq!(canvas.commands()[start], DrawCommand::AdvancePage);
        assert_eq!(page.page_number(), 1);
        assert_eq!(composer.state(), PageState::Content(page));
        assert_eq!(canvas.page_number(), 2);
    }

    #[test]
    fn rejects_out_of_order_transitions() {
        let (theme, meta, config) = (Theme::default(), metadata(), ReportConfig::default());
        let mut composer = PageComposer::new(&theme, &meta, &config, 1);
        let mut canvas = RecordingCanvas::new();

        assert_eq!(
            composer.begin_content_page(&mut canvas, "Overview", None),
            Err(PageError::CoverMissing)
        );
        composer.compose_cover(&mut canvas).expect("cover");
        assert_eq!(
            composer.compose_cover(&mut canvas),
            Err(PageError::CoverAlreadyComposed)
        );
        composer
            .begin_content_page(&mut canvas, "Overview", None)
            .expect("page 1");
        assert_eq!(
            composer.begin_content_page(&mut canvas, "Overview", None),
            Err(PageError::PagesExhausted { total_pages: 1 })
        );
        composer.finish();
        assert_eq!(
            composer.begin_content_page(&mut canvas, "Overview", None),
            Err(PageError::Finished)
        );
    }

    #[test]
    fn section_heading_follows_the_header_band() {
        let (theme, meta, config) = (Theme::default(), metadata(), ReportConfig::default());
        let mut composer = PageComposer::new(&theme, &meta, &config, 1);
        let mut canvas = RecordingCanvas::new();
        composer.compose_cover(&mut canvas).expect("cover");
        composer
            .begin_content_page(&mut canvas, "Per-category breakdown", Some("By branch"))
            .expect("page 1");

        let page = canvas.pages()[1];
        let heading = page
            .iter()
            .find_map(|command| match command {
                DrawCommand::Text { text, y, options, .. } if text == "Per-category breakdown" => {
                    Some((*y, options.bold))
                }
                _ => None,
            })
            .expect("section heading drawn");
        assert_eq!(heading, (40.0, true));
        assert!(canvas.texts().contains(&"By branch"));
        assert!(heading.0 > super::HEADER_HEIGHT_MM && heading.0 < super::BODY_TOP_MM);
    }

    #[test]
    fn cover_has_no_page_marker() {
        let (theme, meta, config) = (Theme::default(), metadata(), ReportConfig::default());
        let mut composer = PageComposer::new(&theme, &meta, &config, 3);
        let mut canvas = RecordingCanvas::new();
        composer.compose_cover(&mut canvas).expect("cover");

        assert!(canvas.texts().iter().all(|text| !text.starts_with("Page ")));
        assert!(canvas.texts().contains(&"Sales Report"));
        assert!(canvas.texts().contains(&"Generated at 05/03/2024 09:15"));
    }

    #[test]
    fn footer_prints_running_marker() {
        let (theme, meta, config) = (Theme::default(), metadata(), ReportConfig::default());
        let composer = PageComposer::new(&theme, &meta, &config, 3);
        let mut canvas = RecordingCanvas::new();
        composer.draw_footer(&mut canvas, 2, 3);

        assert!(canvas.texts().contains(&"Page 2 of 3"));
        assert!(!canvas
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::AdvancePage)));
    }
}
