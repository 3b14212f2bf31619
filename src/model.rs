//! Data structures describing what a report contains.
//!
//! Chart data arrives already aggregated: the renderers never filter, group or compute
//! statistics, they only scale what they are given.  Sections carry explicitly placed
//! blocks in page coordinates, one section per content page.

use chrono::NaiveDateTime;

use crate::geometry::{Point, Rect};
use crate::theme::ThemeColor;

/// A single labeled value of a chart.
///
/// Values are expected to be finite and non-negative.  Anything else is treated as a
/// zero contribution by the renderers instead of being rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartDataPoint {
    name: String,
    value: f64,
    color: Option<ThemeColor>,
}

impl ChartDataPoint {
    /// Creates a point without an explicit color.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            color: None,
        }
    }

    /// Label printed next to the bar or wedge.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value as supplied by the caller.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Explicit color, if any.
    pub fn color(&self) -> Option<ThemeColor> {
        self.color
    }

    /// Value clamped into a usable proportional contribution.
    ///
    /// NaN, infinities and negative values contribute nothing.
    pub fn contribution(&self) -> f64 {
        if self.value.is_finite() && self.value > 0.0 {
            self.value
        } else {
            0.0
        }
    }

    /// Sets the color and returns the updated point.
    pub fn with_color(mut self, color: impl Into<Option<ThemeColor>>) -> Self {
        self.color = color.into();
        self
    }
}

/// Ordered data points; order fixes bar position and clockwise wedge order.
pub type ChartSeries = Vec<ChartDataPoint>;

/// Document level information shown on the cover and in every header and footer.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportMetadata {
    title: String,
    subtitle: Option<String>,
    period_label: Option<String>,
    generated_at: NaiveDateTime,
}

impl ReportMetadata {
    /// Creates metadata with the given title and generation timestamp.
    pub fn new(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            period_label: None,
            generated_at,
        }
    }

    /// Report title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional subtitle.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Optional human readable period, such as `"Last 30 days"`.
    pub fn period_label(&self) -> Option<&str> {
        self.period_label.as_deref()
    }

    /// Timestamp printed in headers and footers.
    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// Sets the subtitle and returns the updated metadata.
    pub fn with_subtitle(mut self, subtitle: impl Into<Option<String>>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the period label and returns the updated metadata.
    pub fn with_period_label(mut self, period_label: impl Into<Option<String>>) -> Self {
        self.period_label = period_label.into();
        self
    }
}

/// Running page counter of the content pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageMetadata {
    page_number: usize,
    total_pages: usize,
}

impl PageMetadata {
    /// Counter positioned on the first of `total_pages` pages.
    pub fn first(total_pages: usize) -> Self {
        Self {
            page_number: 1,
            total_pages: total_pages.max(1),
        }
    }

    /// One-based number of the current page.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Total number of content pages, constant for one build.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Moves to the next page, returning `None` once the last page has been reached.
    pub fn advance(self) -> Option<Self> {
        if self.page_number < self.total_pages {
            Some(Self {
                page_number: self.page_number + 1,
                ..self
            })
        } else {
            None
        }
    }
}

/// A headline figure shown in a small card.
#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    label: String,
    value: String,
    trend: Option<f64>,
    accent: ThemeColor,
}

impl StatCard {
    /// Creates a card with the primary accent and no trend.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            trend: None,
            accent: ThemeColor::Primary,
        }
    }

    /// Caption above the value.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Preformatted value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Change against the previous period, in percent.
    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Color of the accent strip.
    pub fn accent(&self) -> ThemeColor {
        self.accent
    }

    /// Sets the trend and returns the updated card.
    pub fn with_trend(mut self, trend: impl Into<Option<f64>>) -> Self {
        self.trend = trend.into();
        self
    }

    /// Sets the accent color and returns the updated card.
    pub fn with_accent(mut self, accent: ThemeColor) -> Self {
        self.accent = accent;
        self
    }
}

/// Titled panel of short findings.
#[derive(Clone, Debug, PartialEq)]
pub struct Insight {
    title: String,
    lines: Vec<String>,
    accent: ThemeColor,
}

impl Insight {
    /// Creates an empty insight panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            accent: ThemeColor::Primary,
        }
    }

    /// Panel title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Findings, one bullet each.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Color of the title and bullets.
    pub fn accent(&self) -> ThemeColor {
        self.accent
    }

    /// Appends a finding and returns the updated panel.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Sets the accent color and returns the updated panel.
    pub fn with_accent(mut self, accent: ThemeColor) -> Self {
        self.accent = accent;
        self
    }
}

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    /// Text starts at the left cell padding.
    #[default]
    Left,
    /// Text is centered in the cell.
    Center,
    /// Text ends at the right cell padding.
    Right,
}

/// Column definition of a [`Table`].
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    header: String,
    width: f64,
    align: ColumnAlign,
}

impl Column {
    /// Creates a left aligned column taking `width` as a relative share of the table.
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
            align: ColumnAlign::Left,
        }
    }

    /// Header text.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Relative width share.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Cell alignment.
    pub fn align(&self) -> ColumnAlign {
        self.align
    }

    /// Sets the alignment and returns the updated column.
    pub fn with_align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }
}

/// Simple data table with a header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given columns and no rows.
    pub fn new(columns: impl Into<Vec<Column>>) -> Self {
        Self {
            columns: columns.into(),
            rows: Vec::new(),
        }
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Data rows; missing cells render empty and extra cells are ignored.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Appends a row and returns the updated table.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

/// An explicitly placed element of a content page.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Proportional bar chart inside `frame`.
    BarChart {
        /// Chart title.
        title: String,
        /// Bars, left to right.
        series: ChartSeries,
        /// Chart frame.
        frame: Rect,
    },
    /// Proportional pie chart around `center`.
    PieChart {
        /// Chart title.
        title: String,
        /// Wedges, clockwise from 0°.
        series: ChartSeries,
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
    },
    /// Row of stat cards sharing `area` evenly.
    StatCards {
        /// Cards, left to right.
        cards: Vec<StatCard>,
        /// Area split across the cards.
        area: Rect,
    },
    /// Findings panel.
    Insight {
        /// Panel content.
        insight: Insight,
        /// Panel rectangle.
        area: Rect,
    },
    /// Data table; `area` fixes width and top, rows extend downwards.
    Table {
        /// Table content.
        table: Table,
        /// Table rectangle.
        area: Rect,
    },
}

impl Block {
    /// Convenience helper for a bar chart block.
    pub fn bar_chart(title: impl Into<String>, series: ChartSeries, frame: Rect) -> Self {
        Self::BarChart {
            title: title.into(),
            series,
            frame,
        }
    }

    /// Convenience helper for a pie chart block.
    pub fn pie_chart(
        title: impl Into<String>,
        series: ChartSeries,
        center: Point,
        radius: f64,
    ) -> Self {
        Self::PieChart {
            title: title.into(),
            series,
            center,
            radius,
        }
    }

    /// Convenience helper for a row of stat cards.
    pub fn stat_cards(cards: impl Into<Vec<StatCard>>, area: Rect) -> Self {
        Self::StatCards {
            cards: cards.into(),
            area,
        }
    }

    /// Convenience helper for an insight panel.
    pub fn insight(insight: Insight, area: Rect) -> Self {
        Self::Insight { insight, area }
    }

    /// Convenience helper for a data table.
    pub fn table(table: Table, area: Rect) -> Self {
        Self::Table { table, area }
    }
}

/// One content page of a report.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    identifier: Option<String>,
    title: String,
    subtitle: Option<String>,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates a new section with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            identifier: None,
            title: title.into(),
            subtitle: None,
            blocks: Vec::new(),
        }
    }

    /// Identifier used for bookmarks.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Heading printed at the top of the section's page and used for bookmarks.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional line printed under the heading.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// The blocks placed on the section's page.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Sets the identifier and returns the updated section.
    pub fn with_identifier(mut self, identifier: impl Into<Option<String>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Sets the subtitle and returns the updated section.
    pub fn with_subtitle(mut self, subtitle: impl Into<Option<String>>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartDataPoint, PageMetadata};

    #[test]
    fn degenerate_values_contribute_nothing() {
        assert_eq!(ChartDataPoint::new("a", -4.0).contribution(), 0.0);
        assert_eq!(ChartDataPoint::new("b", f64::NAN).contribution(), 0.0);
        assert_eq!(ChartDataPoint::new("c", f64::INFINITY).contribution(), 0.0);
        assert_eq!(ChartDataPoint::new("d", 12.5).contribution(), 12.5);
    }

    #[test]
    fn page_counter_stops_at_total() {
        let first = PageMetadata::first(2);
        let second = first.advance().expect("second page exists");
        assert_eq!(second.page_number(), 2);
        assert_eq!(second.total_pages(), 2);
        assert!(second.advance().is_none());
    }
}
