//! Proportional pie chart.
//!
//! Wedges are approximated by a fan of radial strokes from the center, since the canvas
//! offers no arc fill.  Angle accounting is exact: the sweeps of a series with a positive
//! total always add up to 360°.

use log::debug;

use super::{format_value, LABEL_FONT_SIZE, TITLE_FONT_SIZE};
use crate::canvas::{Canvas, TextOptions};
use crate::geometry::{self, Point, Rect};
use crate::model::ChartDataPoint;
use crate::theme::{Theme, ThemeColor};

const FULL_CIRCLE: f64 = 360.0;
const MIN_STEPS: usize = 10;
const DEGREES_PER_STEP: f64 = 10.0;
const LABEL_OFFSET: f64 = 15.0;
const TITLE_OFFSET: f64 = 10.0;
const WEDGE_STROKE_WIDTH: f64 = 0.8;

/// Angular placement of one wedge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Position of the point in the series.
    pub index: usize,
    /// Angle where the wedge starts, in degrees clockwise from the positive x axis.
    pub start_angle: f64,
    /// Angular size of the wedge in degrees.
    pub sweep: f64,
    /// Number of angular subdivisions of the stroke fan.
    pub steps: usize,
}

impl PieSlice {
    /// Angle halfway through the wedge.
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    /// Angles of the radial strokes, both wedge edges included.
    pub fn stroke_angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(move |step| {
            self.start_angle + self.sweep * step as f64 / self.steps as f64
        })
    }
}

/// Splits the full circle between the points of `series`.
///
/// Returns an empty list when the total of all contributions is not positive.
pub fn pie_slices(series: &[ChartDataPoint]) -> Vec<PieSlice> {
    let largest = series
        .iter()
        .map(ChartDataPoint::contribution)
        .fold(0.0_f64, f64::max);
    if largest <= 0.0 {
        return Vec::new();
    }

    // Shares relative to the largest point keep the total finite for values near f64::MAX.
    let shares: Vec<f64> = series
        .iter()
        .map(|point| point.contribution() / largest)
        .collect();
    let total: f64 = shares.iter().sum();

    let mut current_angle = 0.0;
    shares
        .iter()
        .enumerate()
        .map(|(index, share)| {
            let sweep = share / total * FULL_CIRCLE;
            let steps = ((sweep / DEGREES_PER_STEP).floor() as usize).max(MIN_STEPS);
            let slice = PieSlice {
                index,
                start_angle: current_angle,
                sweep,
                steps,
            };
            current_angle += sweep;
            slice
        })
        .collect()
}

/// Draws a titled pie chart centered on `center`.
///
/// A zero total draws the title only.  Zero-valued points draw no wedge but still place
/// their label at the current angle.
pub fn render_pie_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    theme: &Theme,
    series: &[ChartDataPoint],
    center: Point,
    radius: f64,
    title: &str,
) {
    let bounds = Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
    if !geometry::ensure_drawable(&bounds, "pie chart") {
        return;
    }

    canvas.set_text_color(theme.color(ThemeColor::Text));
    canvas.draw_text(
        title,
        center.x,
        center.y - radius - TITLE_OFFSET,
        TextOptions::sized(TITLE_FONT_SIZE).bold().centered(),
    );

    let slices = pie_slices(series);
    if slices.is_empty() {
        debug!("Pie chart '{}' has a zero total; drawing title only", title);
        return;
    }

    canvas.set_line_width(WEDGE_STROKE_WIDTH);
    for (slice, point) in slices.iter().zip(series) {
        if slice.sweep > 0.0 {
            let color = point
                .color()
                .map(|name| theme.color(name))
                .unwrap_or_else(|| theme.series_color(slice.index));
            canvas.set_stroke_color(color);
            for angle in slice.stroke_angles() {
                let edge = center.on_circle(radius, angle);
                canvas.draw_line(center.x, center.y, edge.x, edge.y);
            }
        }

        let anchor = center.on_circle(radius + LABEL_OFFSET, slice.mid_angle());
        canvas.set_text_color(theme.color(ThemeColor::Text));
        canvas.draw_text(
            &format!("{}: {}", point.name(), format_value(point.value())),
            anchor.x,
            anchor.y,
            TextOptions::sized(LABEL_FONT_SIZE).centered(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{pie_slices, render_pie_chart};
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::geometry::Point;
    use crate::model::ChartDataPoint;
    use crate::theme::Theme;

    fn branches() -> Vec<ChartDataPoint> {
        vec![
            ChartDataPoint::new("Matriz", 35.0),
            ChartDataPoint::new("Centro", 30.0),
            ChartDataPoint::new("Norte", 20.0),
            ChartDataPoint::new("Sul", 15.0),
        ]
    }

    fn line_count(canvas: &RecordingCanvas) -> usize {
        canvas
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }

    #[test]
    fn sweeps_follow_the_shares() {
        let slices = pie_slices(&branches());
        let sweeps: Vec<f64> = slices.iter().map(|slice| slice.sweep).collect();
        for (sweep, expected) in sweeps.iter().zip([126.0, 108.0, 72.0, 54.0]) {
            assert!((sweep - expected).abs() < 1e-9);
        }
        assert!((sweeps.iter().sum::<f64>() - 360.0).abs() < 1e-9);
        assert!((slices[1].start_angle - 126.0).abs() < 1e-9);
    }

    #[test]
    fn sweeps_sum_to_full_circle_for_uneven_series() {
        let series: Vec<_> = [0.1, 7.0, 1e6, 3.3333, 0.0, 42.0]
            .iter()
            .enumerate()
            .map(|(i, value)| ChartDataPoint::new(format!("p{i}"), *value))
            .collect();
        let total: f64 = pie_slices(&series).iter().map(|slice| slice.sweep).sum();
        assert!((total - 360.0).abs() < 1e-6);
    }

    #[test]
    fn huge_values_still_fill_the_circle() {
        let series = vec![
            ChartDataPoint::new("a", 1e308),
            ChartDataPoint::new("b", 1e308),
            ChartDataPoint::new("c", f64::MAX),
        ];
        let slices = pie_slices(&series);
        let total: f64 = slices.iter().map(|slice| slice.sweep).sum();
        assert!((total - 360.0).abs() < 1e-9);
        assert!(slices.iter().all(|slice| slice.sweep.is_finite() && slice.sweep > 0.0));
        assert!((slices[0].sweep - slices[1].sweep).abs() < 1e-9);
    }

    #[test]
    fn step_count_has_a_floor_of_ten() {
        let full = pie_slices(&[ChartDataPoint::new("all", 5.0)]);
        assert_eq!(full[0].steps, 36);
        assert!((full[0].sweep - 360.0).abs() < 1e-9);

        let slices = pie_slices(&branches());
        assert_eq!(slices[0].steps, 12);
        assert_eq!(slices[3].steps, 10);
    }

    #[test]
    fn zero_total_draws_only_the_title() {
        for series in [Vec::new(), vec![ChartDataPoint::new("none", 0.0)]] {
            let mut canvas = RecordingCanvas::new();
            render_pie_chart(
                &mut canvas,
                &Theme::default(),
                &series,
                Point::new(105.0, 150.0),
                40.0,
                "Branches",
            );
            assert_eq!(canvas.texts(), vec!["Branches"]);
            assert_eq!(line_count(&canvas), 0);
        }
    }

    #[test]
    fn zero_point_keeps_its_label_but_no_wedge() {
        let series = vec![
            ChartDataPoint::new("Online", 10.0),
            ChartDataPoint::new("Phone", 0.0),
        ];
        let mut canvas = RecordingCanvas::new();
        render_pie_chart(
            &mut canvas,
            &Theme::default(),
            &series,
            Point::new(105.0, 150.0),
            40.0,
            "Channels",
        );
        assert_eq!(canvas.texts(), vec!["Channels", "Online: 10", "Phone: 0"]);
        // 36 steps, both edges included.
        assert_eq!(line_count(&canvas), 37);
    }

    #[test]
    fn invalid_radius_draws_nothing() {
        let mut canvas = RecordingCanvas::new();
        render_pie_chart(
            &mut canvas,
            &Theme::default(),
            &branches(),
            Point::new(105.0, 150.0),
            f64::NAN,
            "Broken",
        );
        assert!(canvas.commands().is_empty());
    }
}
