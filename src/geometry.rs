//! Page-space geometry and the drawability checks applied before every primitive call.
//!
//! All values are millimetres on an A4 portrait page with the origin in the top-left
//! corner.  Validation never fails loudly: callers ask [`is_drawable`] and skip the
//! offending element, so one malformed data point cannot abort a whole document.

use log::warn;

/// Width of the fixed page size in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// Height of the fixed page size in millimetres.
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// A position on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal distance from the left page edge.
    pub x: f64,
    /// Vertical distance from the top page edge.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point at `angle_deg` degrees on a circle of `radius` around `self`.
    ///
    /// Angles grow clockwise on the page because the y axis points down.
    pub fn on_circle(self, radius: f64, angle_deg: f64) -> Point {
        let radians = angle_deg.to_radians();
        Point::new(
            self.x + radians.cos() * radius,
            self.y + radians.sin() * radius,
        )
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Splits the rectangle into `count` columns separated by `gap`.
    pub fn columns(&self, count: usize, gap: f64) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let width = (self.width - gap * (count as f64 - 1.0)) / count as f64;
        (0..count)
            .map(|index| {
                Rect::new(
                    self.x + index as f64 * (width + gap),
                    self.y,
                    width,
                    self.height,
                )
            })
            .collect()
    }
}

/// Returns false when any component is NaN or infinite, or when the size is not positive.
pub fn is_drawable(x: f64, y: f64, width: f64, height: f64) -> bool {
    x.is_finite()
        && y.is_finite()
        && width.is_finite()
        && height.is_finite()
        && width > 0.0
        && height > 0.0
}

/// [`is_drawable`] applied to a [`Rect`].
pub fn is_drawable_rect(rect: &Rect) -> bool {
    is_drawable(rect.x, rect.y, rect.width, rect.height)
}

/// Checks `rect` and logs a diagnostic naming `what` when it cannot be drawn.
pub(crate) fn ensure_drawable(rect: &Rect, what: &str) -> bool {
    if is_drawable_rect(rect) {
        true
    } else {
        warn!(
            "Skipping {}: invalid geometry x={} y={} w={} h={}",
            what, rect.x, rect.y, rect.width, rect.height
        );
        false
    }
}
