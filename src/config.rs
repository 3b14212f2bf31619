//! Branding and wording applied to the page shell of a report.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use log::warn;

/// Format used when the configured one cannot be rendered.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Strings and formats used by the cover, headers and footers.
///
/// Every field has a sensible default; override only what the report needs.  The page
/// label is a template where `{page}` and `{total}` are replaced by the running counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    brand: String,
    cover_footer: String,
    confidentiality: String,
    page_label: String,
    generated_label: String,
    date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            brand: "Analytics".to_owned(),
            cover_footer: "Automatically generated report".to_owned(),
            confidentiality: "Confidential".to_owned(),
            page_label: "Page {page} of {total}".to_owned(),
            generated_label: "Generated at".to_owned(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

impl ReportConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Brand name shown in the cover logo block.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Static text at the bottom of the cover.
    pub fn cover_footer(&self) -> &str {
        &self.cover_footer
    }

    /// Right-aligned footer stamp of content pages.
    pub fn confidentiality(&self) -> &str {
        &self.confidentiality
    }

    /// Prefix of the generation timestamp.
    pub fn generated_label(&self) -> &str {
        &self.generated_label
    }

    /// Sets the brand and returns the updated configuration.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Sets the cover footer and returns the updated configuration.
    pub fn with_cover_footer(mut self, text: impl Into<String>) -> Self {
        self.cover_footer = text.into();
        self
    }

    /// Sets the confidentiality stamp and returns the updated configuration.
    pub fn with_confidentiality(mut self, text: impl Into<String>) -> Self {
        self.confidentiality = text.into();
        self
    }

    /// Sets the page label template and returns the updated configuration.
    pub fn with_page_label(mut self, template: impl Into<String>) -> Self {
        self.page_label = template.into();
        self
    }

    /// Sets the timestamp prefix and returns the updated configuration.
    pub fn with_generated_label(mut self, label: impl Into<String>) -> Self {
        self.generated_label = label.into();
        self
    }

    /// Sets the `chrono` format string for timestamps and returns the updated configuration.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Renders the page label for `page` of `total`.
    pub fn page_label(&self, page: usize, total: usize) -> String {
        self.page_label
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }

    /// Formats `timestamp`, falling back to [`DEFAULT_DATE_FORMAT`] on an invalid format.
    pub fn format_date(&self, timestamp: NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", timestamp.format(&self.date_format)).is_ok() {
            return out;
        }

        warn!(
            "Invalid date format '{}'; using '{}'",
            self.date_format, DEFAULT_DATE_FORMAT
        );
        timestamp.format(DEFAULT_DATE_FORMAT).to_string()
    }

    /// Left footer stamp, e.g. `"Generated at 05/03/2024 14:30"`.
    pub fn generated_stamp(&self, timestamp: NaiveDateTime) -> String {
        format!("{} {}", self.generated_label, self.format_date(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::ReportConfig;
    use chrono::NaiveDate;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn page_label_substitutes_counters() {
        let config = ReportConfig::default();
        assert_eq!(config.page_label(2, 3), "Page 2 of 3");

        let localized = config.with_page_label("Página {page} de {total}");
        assert_eq!(localized.page_label(1, 5), "Página 1 de 5");
    }

    #[test]
    fn formats_dates_with_the_configured_pattern() {
        let config = ReportConfig::default();
        assert_eq!(config.format_date(timestamp()), "05/03/2024 14:30");
        assert_eq!(
            config.generated_stamp(timestamp()),
            "Generated at 05/03/2024 14:30"
        );

        let iso = ReportConfig::default().with_date_format("%Y-%m-%d");
        assert_eq!(iso.format_date(timestamp()), "2024-03-05");
    }

    #[test]
    fn invalid_format_falls_back() {
        let config = ReportConfig::default().with_date_format("%Q");
        assert_eq!(config.format_date(timestamp()), "05/03/2024 14:30");
    }
}
