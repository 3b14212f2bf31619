//! Proportional bar chart.

use log::{debug, warn};

use super::{format_value, LABEL_FONT_SIZE, TITLE_FONT_SIZE};
use crate::canvas::{Canvas, TextOptions};
use crate::fonts;
use crate::geometry::{self, Rect};
use crate::model::ChartDataPoint;
use crate::theme::{Theme, ThemeColor};

/// Horizontal padding reserved inside the frame, split evenly left and right.
const HORIZONTAL_PADDING: f64 = 20.0;
/// Vertical space reserved for the category and value label rows.
const VERTICAL_PADDING: f64 = 30.0;
/// Distance between the frame bottom and the bar baseline.
const BASELINE_OFFSET: f64 = 15.0;
const BAR_GUTTER: f64 = 2.0;
const MIN_BAR_WIDTH: f64 = 1.0;
const LABEL_CHARS: usize = 8;
const FRAME_BORDER_WIDTH: f64 = 1.0;
const TITLE_OFFSET: f64 = 5.0;

/// Computed placement of one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// Position of the point in the series.
    pub index: usize,
    /// Slot of the bar: full slot width, proportional height, bottom on the baseline.
    pub slot: Rect,
    /// Width of the painted rectangle once the gutter is removed.
    pub painted_width: f64,
}

impl BarGeometry {
    /// Horizontal center of the painted bar.
    pub fn center_x(&self) -> f64 {
        self.slot.x + self.painted_width / 2.0
    }
}

/// Geometry of a whole bar chart body.
#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    /// Largest value of the series; always positive.
    pub max_value: f64,
    /// Slot width shared by every bar.
    pub bar_width: f64,
    /// Height of a bar whose value equals `max_value`.
    pub chart_height: f64,
    /// One entry per point, left to right.
    pub bars: Vec<BarGeometry>,
}

/// Lays out `series` inside `frame`.
///
/// Returns `None` for an empty series or when no value is positive, in which case only
/// the frame is drawn.
pub fn bar_layout(series: &[ChartDataPoint], frame: &Rect) -> Option<BarLayout> {
    if series.is_empty() {
        return None;
    }

    let max_value = series
        .iter()
        .map(ChartDataPoint::contribution)
        .fold(0.0_f64, f64::max);
    if max_value <= 0.0 {
        return None;
    }

    let bar_width = (frame.width - HORIZONTAL_PADDING) / series.len() as f64;
    let chart_height = frame.height - VERTICAL_PADDING;
    let baseline = frame.bottom() - BASELINE_OFFSET;

    let bars = series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let height = point.contribution() / max_value * chart_height;
            BarGeometry {
                index,
                slot: Rect::new(
                    frame.x + HORIZONTAL_PADDING / 2.0 + index as f64 * bar_width,
                    baseline - height,
                    bar_width,
                    height,
                ),
                painted_width: (bar_width - BAR_GUTTER).max(MIN_BAR_WIDTH),
            }
        })
        .collect();

    Some(BarLayout {
        max_value,
        bar_width,
        chart_height,
        bars,
    })
}

/// Bars may be flat, but never narrower than zero or non-finite.
fn bar_is_valid(slot: &Rect) -> bool {
    slot.x.is_finite()
        && slot.y.is_finite()
        && slot.width.is_finite()
        && slot.height.is_finite()
        && slot.width > 0.0
        && slot.height >= 0.0
}

/// Draws a titled, framed bar chart.
///
/// Nothing at all is drawn when `frame` fails validation.  An empty or all-zero series
/// yields the title and the empty frame.  Individual bars with invalid geometry are
/// skipped without affecting the rest of the series.
pub fn render_bar_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    series: &[ChartDataPoint],
    frame: &Rect,
    title: &str,
) {
    if !geometry::ensure_drawable(frame, "bar chart frame") {
        return;
    }

    canvas.set_text_color(theme.color(ThemeColor::Text));
    canvas.draw_text(
        title,
        frame.x,
        frame.y - TITLE_OFFSET,
        TextOptions::sized(TITLE_FONT_SIZE).bold(),
    );

    canvas.set_fill_color(theme.color(ThemeColor::Light));
    canvas.fill_rect(frame.x, frame.y, frame.width, frame.height);
    canvas.set_stroke_color(theme.color(ThemeColor::Border));
    canvas.set_line_width(FRAME_BORDER_WIDTH);
    canvas.stroke_rect(frame.x, frame.y, frame.width, frame.height);

    let Some(layout) = bar_layout(series, frame) else {
        debug!("Bar chart '{}' has no positive values; drawing frame only", title);
        return;
    };

    let label_y = frame.bottom() - BASELINE_OFFSET / 2.0;
    for (bar, point) in layout.bars.iter().zip(series) {
        if !bar_is_valid(&bar.slot) {
            warn!(
                "Skipping bar {} ('{}') of '{}': invalid geometry {:?}",
                bar.index,
                point.name(),
                title,
                bar.slot
            );
            continue;
        }

        if bar.slot.height > 0.0 {
            let color = point.color().unwrap_or(ThemeColor::Accent);
            canvas.set_fill_color(theme.color(color));
            canvas.fill_rect(bar.slot.x, bar.slot.y, bar.painted_width, bar.slot.height);
        }

        canvas.set_text_color(theme.color(ThemeColor::Muted));
        canvas.draw_text(
            &fonts::truncate_chars(point.name(), LABEL_CHARS),
            bar.center_x(),
            label_y,
            TextOptions::sized(LABEL_FONT_SIZE).centered(),
        );

        canvas.set_text_color(theme.color(ThemeColor::Text));
        canvas.draw_text(
            &format_value(point.value()),
            bar.center_x(),
            bar.slot.y - 2.0,
            TextOptions::sized(LABEL_FONT_SIZE).bold().centered(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{bar_layout, render_bar_chart};
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::geometry::Rect;
    use crate::model::ChartDataPoint;
    use crate::theme::Theme;

    fn weekly() -> Vec<ChartDataPoint> {
        vec![
            ChartDataPoint::new("Sem 1", 120.0),
            ChartDataPoint::new("Sem 2", 150.0),
            ChartDataPoint::new("Sem 3", 180.0),
            ChartDataPoint::new("Sem 4", 200.0),
        ]
    }

    #[test]
    fn heights_are_proportional_to_the_maximum() {
        let frame = Rect::new(20.0, 40.0, 170.0, 80.0);
        let layout = bar_layout(&weekly(), &frame).expect("positive series");

        assert!((layout.bar_width - 37.5).abs() < 1e-9);
        assert!((layout.chart_height - 50.0).abs() < 1e-9);
        for (bar, point) in layout.bars.iter().zip(weekly()) {
            let expected = point.value() / layout.max_value * layout.chart_height;
            assert!((bar.slot.height - expected).abs() < 1e-9);
            assert!(bar.slot.height <= layout.chart_height + 1e-9);
        }
        assert!((layout.bars[3].slot.height - layout.chart_height).abs() < 1e-9);
    }

    #[test]
    fn bars_sit_on_a_common_baseline() {
        let frame = Rect::new(20.0, 40.0, 170.0, 80.0);
        let layout = bar_layout(&weekly(), &frame).expect("positive series");
        for bar in &layout.bars {
            assert!((bar.slot.bottom() - (frame.bottom() - 15.0)).abs() < 1e-9);
        }
        assert!((layout.bars[0].slot.x - 30.0).abs() < 1e-9);
        assert!((layout.bars[1].slot.x - 67.5).abs() < 1e-9);
        assert!((layout.bars[0].painted_width - 35.5).abs() < 1e-9);
    }

    #[test]
    fn single_point_uses_the_full_inner_width() {
        let frame = Rect::new(0.0, 0.0, 100.0, 60.0);
        let layout = bar_layout(&[ChartDataPoint::new("only", 3.0)], &frame)
            .expect("positive series");
        assert_eq!(layout.bars.len(), 1);
        assert!((layout.bar_width - 80.0).abs() < 1e-9);
    }

    #[test]
    fn narrow_slots_keep_a_minimum_painted_width() {
        let frame = Rect::new(0.0, 0.0, 30.0, 60.0);
        let series: Vec<_> = (0..20)
            .map(|i| ChartDataPoint::new(format!("p{i}"), 1.0))
            .collect();
        let layout = bar_layout(&series, &frame).expect("positive series");
        assert!((layout.bars[0].painted_width - 1.0).abs() < 1e-9);
    }

    #[test]
    fn negative_and_nan_values_are_flat_bars() {
        let frame = Rect::new(20.0, 40.0, 170.0, 80.0);
        let series = vec![
            ChartDataPoint::new("neg", -10.0),
            ChartDataPoint::new("nan", f64::NAN),
            ChartDataPoint::new("pos", 10.0),
        ];
        let layout = bar_layout(&series, &frame).expect("one positive value");
        assert_eq!(layout.bars[0].slot.height, 0.0);
        assert_eq!(layout.bars[1].slot.height, 0.0);

        let mut canvas = RecordingCanvas::new();
        render_bar_chart(&mut canvas, &Theme::default(), &series, &frame, "Mixed");
        let bar_fills = canvas
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::FillRect { .. }))
            .count();
        // Frame plus the single positive bar.
        assert_eq!(bar_fills, 2);
        assert!(canvas.texts().contains(&"neg"));
    }

    #[test]
    fn all_zero_series_draws_frame_only() {
        let frame = Rect::new(20.0, 40.0, 170.0, 80.0);
        let series = vec![ChartDataPoint::new("a", 0.0), ChartDataPoint::new("b", -1.0)];
        assert!(bar_layout(&series, &frame).is_none());

        let mut canvas = RecordingCanvas::new();
        render_bar_chart(&mut canvas, &Theme::default(), &series, &frame, "Zero");
        assert_eq!(canvas.texts(), vec!["Zero"]);
    }

    #[test]
    fn labels_are_truncated_to_eight_characters() {
        let frame = Rect::new(20.0, 40.0, 170.0, 80.0);
        let series = vec![ChartDataPoint::new("Electronics & Gadgets", 5.0)];
        let mut canvas = RecordingCanvas::new();
        render_bar_chart(&mut canvas, &Theme::default(), &series, &frame, "Categories");
        assert!(canvas.texts().contains(&"Electron"));
        assert!(canvas.texts().contains(&"5"));
    }
}
