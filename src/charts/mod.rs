//! Native vector charts drawn from canvas primitives.
//!
//! Each chart is split into a pure layout step ([`bar::bar_layout`], [`pie::pie_slices`])
//! and a drawing step that feeds the computed geometry to a [`crate::canvas::Canvas`].

pub mod bar;
pub mod pie;

pub use bar::{bar_layout, render_bar_chart, BarGeometry, BarLayout};
pub use pie::{pie_slices, render_pie_chart, PieSlice};

/// Font size of chart titles, in points.
pub(crate) const TITLE_FONT_SIZE: f64 = 12.0;
/// Font size of value and category annotations, in points.
pub(crate) const LABEL_FONT_SIZE: f64 = 8.0;

/// Formats a chart value: whole numbers without decimals, everything else with one.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        "-".to_owned()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
