//! Semantic color palette shared by every drawing routine of a report.
//!
//! A [`Theme`] is a plain lookup table from [`ThemeColor`] names to concrete
//! [`genpdf::style::Color`] values.  It carries no behavior beyond the lookup and is
//! shared by reference for the whole build.

use genpdf::style::Color;

/// Semantic color names understood by the renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Main brand color, used for banded headers and table headings.
    Primary,
    /// Secondary brand color.
    Secondary,
    /// Default bar color.
    Accent,
    /// Positive trends.
    Success,
    /// Attention states.
    Warning,
    /// Negative trends.
    Danger,
    /// Chart frame and zebra row background.
    Light,
    /// Card background.
    Lighter,
    /// Body text.
    Text,
    /// Secondary text such as captions and footer stamps.
    Muted,
    /// Strokes around frames and cards.
    Border,
    /// Text printed on top of primary-colored bands.
    White,
}

impl ThemeColor {
    /// Every semantic name, in declaration order.
    pub const ALL: [ThemeColor; 12] = [
        ThemeColor::Primary,
        ThemeColor::Secondary,
        ThemeColor::Accent,
        ThemeColor::Success,
        ThemeColor::Warning,
        ThemeColor::Danger,
        ThemeColor::Light,
        ThemeColor::Lighter,
        ThemeColor::Text,
        ThemeColor::Muted,
        ThemeColor::Border,
        ThemeColor::White,
    ];
}

/// Rotation used for wedges and bars that do not carry their own color.
const SERIES_ROTATION: [ThemeColor; 6] = [
    ThemeColor::Primary,
    ThemeColor::Success,
    ThemeColor::Warning,
    ThemeColor::Danger,
    ThemeColor::Accent,
    ThemeColor::Secondary,
];

/// Immutable palette consulted by all drawing code.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    primary: Color,
    secondary: Color,
    accent: Color,
    success: Color,
    warning: Color,
    danger: Color,
    light: Color,
    lighter: Color,
    text: Color,
    muted: Color,
    border: Color,
    white: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(59, 130, 246),
            secondary: Color::Rgb(99, 102, 241),
            accent: Color::Rgb(139, 92, 246),
            success: Color::Rgb(16, 185, 129),
            warning: Color::Rgb(245, 158, 11),
            danger: Color::Rgb(239, 68, 68),
            light: Color::Rgb(248, 250, 252),
            lighter: Color::Rgb(241, 245, 249),
            text: Color::Rgb(30, 41, 59),
            muted: Color::Rgb(100, 116, 139),
            border: Color::Rgb(226, 232, 240),
            white: Color::Rgb(255, 255, 255),
        }
    }
}

impl Theme {
    /// Creates the default brand palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a single entry and returns the updated theme.
    ///
    /// Intended for construction time only; a theme is never changed once a build has
    /// started.
    pub fn with_color(mut self, name: ThemeColor, color: Color) -> Self {
        *self.slot_mut(name) = color;
        self
    }

    /// Looks up the concrete color for a semantic name.
    pub fn color(&self, name: ThemeColor) -> Color {
        match name {
            ThemeColor::Primary => self.primary,
            ThemeColor::Secondary => self.secondary,
            ThemeColor::Accent => self.accent,
            ThemeColor::Success => self.success,
            ThemeColor::Warning => self.warning,
            ThemeColor::Danger => self.danger,
            ThemeColor::Light => self.light,
            ThemeColor::Lighter => self.lighter,
            ThemeColor::Text => self.text,
            ThemeColor::Muted => self.muted,
            ThemeColor::Border => self.border,
            ThemeColor::White => self.white,
        }
    }

    /// Color for the `index`-th element of a series without an explicit color.
    pub fn series_color(&self, index: usize) -> Color {
        self.color(SERIES_ROTATION[index % SERIES_ROTATION.len()])
    }

    fn slot_mut(&mut self, name: ThemeColor) -> &mut Color {
        match name {
            ThemeColor::Primary => &mut self.primary,
            ThemeColor::Secondary => &mut self.secondary,
            ThemeColor::Accent => &mut self.accent,
            ThemeColor::Success => &mut self.success,
            ThemeColor::Warning => &mut self.warning,
            ThemeColor::Danger => &mut self.danger,
            ThemeColor::Light => &mut self.light,
            ThemeColor::Lighter => &mut self.lighter,
            ThemeColor::Text => &mut self.text,
            ThemeColor::Muted => &mut self.muted,
            ThemeColor::Border => &mut self.border,
            ThemeColor::White => &mut self.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, ThemeColor};
    use genpdf::style::Color;

    #[test]
    fn overrides_only_the_requested_slot() {
        let theme = Theme::new().with_color(ThemeColor::Accent, Color::Rgb(1, 2, 3));

        assert_eq!(theme.color(ThemeColor::Accent), Color::Rgb(1, 2, 3));
        assert_eq!(
            theme.color(ThemeColor::Primary),
            Theme::default().color(ThemeColor::Primary)
        );
    }

    #[test]
    fn series_colors_wrap_around() {
        let theme = Theme::new();
        assert_eq!(theme.series_color(0), theme.series_color(6));
        assert_ne!(theme.series_color(0), theme.series_color(1));
    }

    #[test]
    fn every_name_resolves() {
        let theme = Theme::new();
        for name in ThemeColor::ALL {
            let _ = theme.color(name);
        }
    }
}
