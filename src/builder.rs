//! Report orchestration: cover, one content page per section, then serialization.

use std::fmt;

use log::{debug, info};

use crate::canvas::{Canvas, CanvasError, PdfCanvas};
use crate::charts;
use crate::config::ReportConfig;
use crate::elements;
use crate::model::{Block, ReportMetadata, Section};
use crate::page::{PageComposer, PageError};
use crate::theme::Theme;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::{self, BookmarkError};

/// Errors that abort a report build.
#[derive(Debug)]
pub enum ReportError {
    /// The canvas failed to set up or to serialize the document.
    Canvas(CanvasError),
    /// Pages were composed out of order.
    Page(PageError),
    /// Outline injection failed after rendering.
    #[cfg(feature = "bookmarks")]
    Bookmarks(BookmarkError),
}

impl From<CanvasError> for ReportError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas(err)
    }
}

impl From<PageError> for ReportError {
    fn from(err: PageError) -> Self {
        Self::Page(err)
    }
}

#[cfg(feature = "bookmarks")]
impl From<BookmarkError> for ReportError {
    fn from(err: BookmarkError) -> Self {
        Self::Bookmarks(err)
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(_) => write!(f, "Failed to produce the report document"),
            Self::Page(_) => write!(f, "Failed to lay out report pages"),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(_) => write!(f, "Failed to add section bookmarks"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            Self::Page(err) => Some(err),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => Some(err),
        }
    }
}

/// A canvas with a complete report drawn on it.
#[derive(Debug)]
pub struct BuildOutcome<C> {
    /// The canvas, ready to serialize.
    pub canvas: C,
    /// Physical page of each section (the cover is page 1).
    pub section_pages: Vec<usize>,
}

/// Serialized report returned by [`ReportBuilder::render`].
#[derive(Clone, Debug)]
pub struct RenderedReport {
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,
    /// Physical page of each section (the cover is page 1).
    pub section_pages: Vec<usize>,
}

/// Collects metadata, styling and sections, then draws the report.
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    metadata: ReportMetadata,
    theme: Theme,
    config: ReportConfig,
    sections: Vec<Section>,
}

impl ReportBuilder {
    /// Creates a builder with the default theme and configuration.
    pub fn new(metadata: ReportMetadata) -> Self {
        Self {
            metadata,
            theme: Theme::default(),
            config: ReportConfig::default(),
            sections: Vec::new(),
        }
    }

    /// Replaces the color palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replaces the branding and wording configuration.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a section; each section becomes one content page.
    pub fn add_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Appends several sections in order.
    pub fn with_sections<I>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = Section>,
    {
        self.sections.extend(sections);
        self
    }

    /// Report metadata.
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Branding and wording configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Sections in page order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Draws the whole report on `canvas`, which must still be on its first page.
    pub fn build<C: Canvas>(&self, mut canvas: C) -> Result<BuildOutcome<C>, ReportError> {
        let total_pages = self.sections.len();
        let mut composer =
            PageComposer::new(&self.theme, &self.metadata, &self.config, total_pages);

        composer.compose_cover(&mut canvas)?;

        let mut section_pages = Vec::with_capacity(total_pages);
        for section in &self.sections {
            let page =
                composer.begin_content_page(&mut canvas, section.title(), section.subtitle())?;
            section_pages.push(canvas.page_number());
            debug!(
                "Section '{}' on page {} with {} blocks",
                section.title(),
                canvas.page_number(),
                section.blocks().len()
            );

            for block in section.blocks() {
                self.draw_block(&mut canvas, block);
            }

            composer.draw_footer(&mut canvas, page.page_number(), page.total_pages());
        }
        composer.finish();

        Ok(BuildOutcome {
            canvas,
            section_pages,
        })
    }

    /// Builds the report on a fresh PDF canvas and serializes it.
    pub fn render(&self) -> Result<RenderedReport, ReportError> {
        let canvas = PdfCanvas::new(self.metadata.title())?;
        let BuildOutcome {
            canvas,
            section_pages,
        } = self.build(canvas)?;
        let bytes = canvas.serialize()?;
        info!(
            "Rendered '{}': {} content pages, {} bytes",
            self.metadata.title(),
            section_pages.len(),
            bytes.len()
        );
        Ok(RenderedReport {
            bytes,
            section_pages,
        })
    }

    /// Renders the report and adds one outline entry per section.
    #[cfg(feature = "bookmarks")]
    pub fn render_with_bookmarks(&self) -> Result<RenderedReport, ReportError> {
        let RenderedReport {
            bytes,
            section_pages,
        } = self.render()?;
        let bytes = bookmarks::apply_section_bookmarks(&bytes, &self.sections, &section_pages)?;
        Ok(RenderedReport {
            bytes,
            section_pages,
        })
    }

    fn draw_block<C: Canvas + ?Sized>(&self, canvas: &mut C, block: &Block) {
        let theme = &self.theme;
        match block {
            Block::BarChart {
                title,
                series,
                frame,
            } => charts::render_bar_chart(canvas, theme, series, frame, title),
            Block::PieChart {
                title,
                series,
                center,
                radius,
            } => charts::render_pie_chart(canvas, theme, series, *center, *radius, title),
            Block::StatCards { cards, area } => {
                elements::render_stat_cards(canvas, theme, cards, area)
            }
            Block::Insight { insight, area } => {
                elements::render_insight(canvas, theme, insight, area)
            }
            Block::Table { table, area } => {
                elements::render_table(canvas, theme, table, area);
            }
        }
    }
}
