//! Web analytics report: traffic sources, daily sessions and page ranking.

use chrono::NaiveDateTime;

use crate::builder::ReportBuilder;
use crate::config::ReportConfig;
use crate::geometry::{Point, Rect};
use crate::model::{
    Block, ChartDataPoint, ChartSeries, Column, ColumnAlign, Insight, ReportMetadata, Section,
    StatCard, Table,
};
use crate::theme::ThemeColor;

/// Report kind used in export file names.
pub const KIND: &str = "analytics";

/// Sessions per weekday.
pub fn daily_sessions() -> ChartSeries {
    [
        ("Monday", 4_820.0),
        ("Tuesday", 5_130.0),
        ("Wednesday", 5_410.0),
        ("Thursday", 5_020.0),
        ("Friday", 4_470.0),
        ("Saturday", 2_310.0),
        ("Sunday", 1_980.0),
    ]
    .into_iter()
    .map(|(day, sessions)| ChartDataPoint::new(day, sessions))
    .collect()
}

/// Sessions per acquisition channel.
pub fn traffic_sources() -> ChartSeries {
    vec![
        ChartDataPoint::new("Organic", 14_200.0),
        ChartDataPoint::new("Direct", 8_900.0),
        ChartDataPoint::new("Referral", 3_100.0),
        ChartDataPoint::new("Social", 2_450.0),
        ChartDataPoint::new("Email", 1_250.0),
    ]
}

fn page_ranking() -> Table {
    Table::new(vec![
        Column::new("Page", 2.6),
        Column::new("Views", 1.0).with_align(ColumnAlign::Right),
        Column::new("Avg. time", 1.0).with_align(ColumnAlign::Right),
        Column::new("Bounce", 0.9).with_align(ColumnAlign::Right),
    ])
    .with_row(["/", "18,402", "0:48", "41%"])
    .with_row(["/pricing", "6,215", "1:52", "28%"])
    .with_row(["/blog/quarterly-roadmap", "4,870", "3:05", "35%"])
    .with_row(["/docs/getting-started", "3,944", "4:21", "22%"])
    .with_row(["/contact", "1,208", "0:57", "46%"])
}

/// Builds the analytics report generated at `generated_at`.
pub fn analytics_report(generated_at: NaiveDateTime) -> ReportBuilder {
    let metadata = ReportMetadata::new("Website Analytics", generated_at)
        .with_subtitle(Some("Traffic and engagement".to_owned()))
        .with_period_label(Some("Week 5, 2024".to_owned()));

    let traffic = Section::new("Traffic")
        .with_identifier(Some("traffic".to_owned()))
        .with_block(Block::stat_cards(
            vec![
                StatCard::new("Sessions", "29,140").with_trend(8.3),
                StatCard::new("Users", "21,775").with_trend(5.9),
                StatCard::new("Bounce rate", "37%")
                    .with_trend(-2.4)
                    .with_accent(ThemeColor::Success),
                StatCard::new("Avg. session", "2m 14s").with_accent(ThemeColor::Accent),
            ],
            Rect::new(15.0, 50.0, 180.0, 28.0),
        ))
        .with_block(Block::bar_chart(
            "Sessions per weekday",
            daily_sessions(),
            Rect::new(20.0, 100.0, 170.0, 95.0),
        ))
        .with_block(Block::insight(
            Insight::new("Weekly pattern")
                .with_line("Traffic concentrates on weekdays with a Wednesday peak.")
                .with_line("Weekend sessions fall to less than half of the weekday average."),
            Rect::new(15.0, 210.0, 180.0, 35.0),
        ));

    let acquisition = Section::new("Acquisition")
        .with_identifier(Some("acquisition".to_owned()))
        .with_subtitle(Some("Where sessions come from".to_owned()))
        .with_block(Block::pie_chart(
            "Sessions by channel",
            traffic_sources(),
            Point::new(105.0, 115.0),
            50.0,
        ))
        .with_block(Block::insight(
            Insight::new("Channel mix")
                .with_line("Organic search remains the main source with almost half of all sessions.")
                .with_line("Email drives the smallest share but has the longest sessions.")
                .with_accent(ThemeColor::Accent),
            Rect::new(15.0, 200.0, 180.0, 40.0),
        ));

    let content = Section::new("Content")
        .with_identifier(Some("content".to_owned()))
        .with_block(Block::table(
            page_ranking(),
            Rect::new(15.0, 50.0, 180.0, 60.0),
        ));

    ReportBuilder::new(metadata)
        .with_config(
            ReportConfig::default()
                .with_brand("Northwind Web")
                .with_confidentiality("Internal use"),
        )
        .with_sections([traffic, acquisition, content])
}
