//! Non-chart page elements: stat cards, insight panels and data tables.
//!
//! Every element validates its rectangles before drawing and skips whatever cannot be
//! drawn, logging the reason, so a single bad value never aborts the page.

use log::{debug, warn};

use crate::canvas::{Canvas, TextAlign, TextOptions};
use crate::fonts;
use crate::geometry::{self, Rect};
use crate::model::{ColumnAlign, Insight, StatCard, Table};
use crate::theme::{Theme, ThemeColor};

const CARD_GAP: f64 = 5.0;
const CARD_RADIUS: f64 = 3.0;
const CARD_STRIP_WIDTH: f64 = 2.0;
const CARD_PADDING: f64 = 6.0;

const INSIGHT_RADIUS: f64 = 3.0;
const INSIGHT_PADDING: f64 = 6.0;
const INSIGHT_LINE_HEIGHT: f64 = 5.0;
const INSIGHT_FONT_SIZE: f64 = 9.0;
const BULLET_INDENT: f64 = 4.0;

const TABLE_HEADER_HEIGHT: f64 = 8.0;
const TABLE_ROW_HEIGHT: f64 = 7.0;
const TABLE_FONT_SIZE: f64 = 9.0;
const CELL_PADDING: f64 = 2.0;
const TABLE_RULE_WIDTH: f64 = 0.2;

/// Formats a period-over-period change, always signed.
pub fn format_trend(trend: f64) -> String {
    format!("{trend:+.1}% vs previous period")
}

/// Draws `cards` side by side, sharing `area` evenly.
pub fn render_stat_cards<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    cards: &[StatCard],
    area: &Rect,
) {
    if cards.is_empty() {
        return;
    }

    for (card, rect) in cards.iter().zip(area.columns(cards.len(), CARD_GAP)) {
        render_stat_card(canvas, theme, card, &rect);
    }
}

fn render_stat_card<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    card: &StatCard,
    rect: &Rect,
) {
    if !geometry::ensure_drawable(rect, "stat card") {
        return;
    }

    canvas.set_fill_color(theme.color(ThemeColor::Lighter));
    canvas.fill_rounded_rect(rect.x, rect.y, rect.width, rect.height, CARD_RADIUS, CARD_RADIUS);
    canvas.set_fill_color(theme.color(card.accent()));
    canvas.fill_rect(rect.x, rect.y, CARD_STRIP_WIDTH, rect.height);

    let text_width = rect.width - CARD_PADDING - CARD_STRIP_WIDTH;
    canvas.set_text_color(theme.color(ThemeColor::Muted));
    canvas.draw_text(
        &fonts::fit_text(card.label(), text_width, 9.0, false),
        rect.x + CARD_PADDING,
        rect.y + 8.0,
        TextOptions::sized(9.0),
    );

    canvas.set_text_color(theme.color(ThemeColor::Text));
    canvas.draw_text(
        &fonts::fit_text(card.value(), text_width, 16.0, true),
        rect.x + CARD_PADDING,
        rect.y + 17.0,
        TextOptions::sized(16.0).bold(),
    );

    if let Some(trend) = card.trend().filter(|trend| trend.is_finite()) {
        let color = if trend >= 0.0 {
            ThemeColor::Success
        } else {
            ThemeColor::Danger
        };
        canvas.set_text_color(theme.color(color));
        canvas.draw_text(
            &format_trend(trend),
            rect.x + CARD_PADDING,
            rect.bottom() - 4.0,
            TextOptions::sized(8.0),
        );
    }
}

/// Draws a titled panel of bullet points, wrapping long lines to the panel width.
///
/// Lines that do not fit vertically are dropped.
pub fn render_insight<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    insight: &Insight,
    area: &Rect,
) {
    if !geometry::ensure_drawable(area, "insight panel") {
        return;
    }

    canvas.set_fill_color(theme.color(ThemeColor::Light));
    canvas.fill_rounded_rect(
        area.x,
        area.y,
        area.width,
        area.height,
        INSIGHT_RADIUS,
        INSIGHT_RADIUS,
    );

    canvas.set_text_color(theme.color(insight.accent()));
    canvas.draw_text(
        insight.title(),
        area.x + INSIGHT_PADDING,
        area.y + 9.0,
        TextOptions::sized(11.0).bold(),
    );

    let text_x = area.x + INSIGHT_PADDING + BULLET_INDENT;
    let text_width = area.width - 2.0 * INSIGHT_PADDING - BULLET_INDENT;
    let limit = area.bottom() - INSIGHT_PADDING / 2.0;
    let mut y = area.y + 9.0 + INSIGHT_LINE_HEIGHT + 2.0;

    'lines: for line in insight.lines() {
        let wrapped = fonts::wrap_text(line, text_width, INSIGHT_FONT_SIZE, false);
        for (index, segment) in wrapped.iter().enumerate() {
            if y > limit {
                debug!(
                    "Insight '{}' overflows its panel; remaining lines dropped",
                    insight.title()
                );
                break 'lines;
            }
            if index == 0 {
                canvas.set_text_color(theme.color(insight.accent()));
                canvas.draw_text(
                    "\u{2022}",
                    area.x + INSIGHT_PADDING,
                    y,
                    TextOptions::sized(INSIGHT_FONT_SIZE),
                );
            }
            canvas.set_text_color(theme.color(ThemeColor::Text));
            canvas.draw_text(segment, text_x, y, TextOptions::sized(INSIGHT_FONT_SIZE));
            y += INSIGHT_LINE_HEIGHT;
        }
    }
}

/// Resolved column width in millimetres for every column of `table`.
///
/// Returns `None` when the relative widths cannot be normalised.
pub fn column_widths(table: &Table, total_width: f64) -> Option<Vec<f64>> {
    let shares: Vec<f64> = table
        .columns()
        .iter()
        .map(|column| {
            if column.width().is_finite() && column.width() > 0.0 {
                column.width()
            } else {
                0.0
            }
        })
        .collect();
    let sum: f64 = shares.iter().sum();
    if sum <= 0.0 || !total_width.is_finite() {
        return None;
    }
    Some(
        shares
            .iter()
            .map(|share| share / sum * total_width)
            .collect(),
    )
}

fn draw_cell<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    cell: &Rect,
    align: ColumnAlign,
    options: TextOptions,
) {
    if !geometry::ensure_drawable(cell, "table cell") {
        return;
    }

    let fitted = fonts::fit_text(
        text,
        cell.width - 2.0 * CELL_PADDING,
        options.font_size,
        options.bold,
    );
    let (x, text_align) = match align {
        ColumnAlign::Left => (cell.x + CELL_PADDING, TextAlign::Left),
        ColumnAlign::Center => (cell.center_x(), TextAlign::Center),
        ColumnAlign::Right => (cell.right() - CELL_PADDING, TextAlign::Right),
    };
    let baseline = cell.y + cell.height / 2.0 + options.font_size * fonts::MM_PER_PT / 3.0;
    canvas.draw_text(&fitted, x, baseline, options.aligned(text_align));
}

/// Draws `table` starting at the top of `area`; rows that would pass its bottom are dropped.
///
/// Returns the number of data rows drawn.
pub fn render_table<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    table: &Table,
    area: &Rect,
) -> usize {
    if !geometry::ensure_drawable(area, "table") {
        return 0;
    }
    let Some(widths) = column_widths(table, area.width) else {
        warn!("Skipping table: column widths do not add up to a positive total");
        return 0;
    };

    let header = Rect::new(area.x, area.y, area.width, TABLE_HEADER_HEIGHT);
    canvas.set_fill_color(theme.color(ThemeColor::Primary));
    canvas.fill_rect(header.x, header.y, header.width, header.height);
    canvas.set_text_color(theme.color(ThemeColor::White));

    let mut x = area.x;
    for (column, width) in table.columns().iter().zip(&widths) {
        let cell = Rect::new(x, header.y, *width, header.height);
        draw_cell(
            canvas,
            column.header(),
            &cell,
            column.align(),
            TextOptions::sized(TABLE_FONT_SIZE).bold(),
        );
        x += width;
    }

    canvas.set_stroke_color(theme.color(ThemeColor::Border));
    canvas.set_line_width(TABLE_RULE_WIDTH);

    let mut y = header.bottom();
    let mut drawn = 0;
    for (index, row) in table.rows().iter().enumerate() {
        if y + TABLE_ROW_HEIGHT > area.bottom() {
            debug!(
                "Table truncated after {} of {} rows",
                drawn,
                table.rows().len()
            );
            break;
        }

        if index % 2 == 1 {
            canvas.set_fill_color(theme.color(ThemeColor::Light));
            canvas.fill_rect(area.x, y, area.width, TABLE_ROW_HEIGHT);
        }

        canvas.set_text_color(theme.color(ThemeColor::Text));
        let mut x = area.x;
        for (column_index, (column, width)) in table.columns().iter().zip(&widths).enumerate() {
            let text = row.get(column_index).map(String::as_str).unwrap_or("");
            let cell = Rect::new(x, y, *width, TABLE_ROW_HEIGHT);
            draw_cell(
                canvas,
                text,
                &cell,
                column.align(),
                TextOptions::sized(TABLE_FONT_SIZE),
            );
            x += width;
        }

        y += TABLE_ROW_HEIGHT;
        canvas.draw_line(area.x, y, area.right(), y);
        drawn += 1;
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::{column_widths, format_trend, render_insight, render_stat_cards, render_table};
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::geometry::Rect;
    use crate::model::{Column, Insight, StatCard, Table};
    use crate::theme::{Theme, ThemeColor};

    fn products() -> Table {
        Table::new(vec![Column::new("Product", 3.0), Column::new("Units", 1.0)])
            .with_row(["Notebook", "12"])
            .with_row(["Monitor", "7"])
            .with_row(["Keyboard", "31"])
    }

    #[test]
    fn trend_is_signed() {
        assert_eq!(format_trend(12.5), "+12.5% vs previous period");
        assert_eq!(format_trend(-3.0), "-3.0% vs previous period");
    }

    #[test]
    fn negative_trend_uses_danger_color() {
        let theme = Theme::default();
        let mut canvas = RecordingCanvas::new();
        render_stat_cards(
            &mut canvas,
            &theme,
            &[StatCard::new("Revenue", "R$ 10.000").with_trend(-4.0)],
            &Rect::new(20.0, 50.0, 170.0, 30.0),
        );
        assert!(canvas
            .commands()
            .contains(&DrawCommand::TextColor(theme.color(ThemeColor::Danger))));
        assert!(canvas.texts().contains(&"-4.0% vs previous period"));
    }

    #[test]
    fn invalid_card_area_is_skipped() {
        let mut canvas = RecordingCanvas::new();
        render_stat_cards(
            &mut canvas,
            &Theme::default(),
            &[StatCard::new("Orders", "10")],
            &Rect::new(20.0, 50.0, 170.0, f64::NAN),
        );
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn column_shares_are_normalised() {
        let widths = column_widths(&products(), 160.0).expect("positive shares");
        assert_eq!(widths, vec![120.0, 40.0]);

        let broken = Table::new(vec![Column::new("A", 0.0), Column::new("B", f64::NAN)]);
        assert!(column_widths(&broken, 160.0).is_none());
    }

    #[test]
    fn table_rows_stop_at_the_area_bottom() {
        let mut canvas = RecordingCanvas::new();
        // Header (8) plus two rows (14) fit into 23 units.
        let drawn = render_table(
            &mut canvas,
            &Theme::default(),
            &products(),
            &Rect::new(20.0, 100.0, 160.0, 23.0),
        );
        assert_eq!(drawn, 2);
        assert!(canvas.texts().contains(&"Monitor"));
        assert!(!canvas.texts().contains(&"Keyboard"));
    }

    #[test]
    fn insight_wraps_and_bullets_each_line() {
        let insight = Insight::new("Highlights")
            .with_line("Weekend traffic converts noticeably better than weekday traffic overall")
            .with_line("Returns fell");
        let mut canvas = RecordingCanvas::new();
        render_insight(
            &mut canvas,
            &Theme::default(),
            &insight,
            &Rect::new(20.0, 200.0, 80.0, 60.0),
        );
        let bullets = canvas
            .texts()
            .iter()
            .filter(|text| **text == "\u{2022}")
            .count();
        assert_eq!(bullets, 2);
        assert!(canvas.texts().len() > 4);
    }
}
