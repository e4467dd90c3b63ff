//! Terminal line chart of an aligned rate table.
//!
//! The chart is drawn with ratatui's `Chart` widget into an off-screen
//! buffer and then printed line by line, so it scrolls with normal output
//! instead of taking over the terminal.

use super::ui;
use crate::core::config::AppConfig;
use crate::core::{AlignedTable, DateRange, MaturityKey, SeriesProvider};
use anyhow::Result;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};

pub async fn run(
    provider: &(dyn SeriesProvider + Send + Sync),
    config: &AppConfig,
    range: &DateRange,
) -> Result<()> {
    let outcome = super::fetch_rates(provider, &config.maturities, range).await;

    match outcome.table() {
        Some(table) => println!(
            "{}",
            render_to_string(
                table,
                &super::chart_title(range),
                config.chart.width,
                config.chart.height,
                console::colors_enabled(),
            )
        ),
        None => println!(
            "{}",
            ui::style_text(&super::unavailable_notice(range), ui::StyleType::Subtle)
        ),
    }
    Ok(())
}

/// Line colour of each maturity.
pub fn series_color(key: MaturityKey) -> Color {
    match key {
        MaturityKey::OneMonth => Color::Cyan,
        MaturityKey::ThreeMonths => Color::Green,
        MaturityKey::SixMonths => Color::Yellow,
        MaturityKey::TwelveMonths => Color::Magenta,
    }
}

/// Chart widget: one line per maturity that has at least one value.
pub struct RateChart<'a> {
    table: &'a AlignedTable,
    title: String,
}

impl<'a> RateChart<'a> {
    pub fn new(table: &'a AlignedTable, title: impl Into<String>) -> Self {
        Self {
            table,
            title: title.into(),
        }
    }

    fn first_date(&self) -> Option<NaiveDate> {
        self.table.rows().first().map(|row| row.date)
    }

    fn x_of(first: NaiveDate, date: NaiveDate) -> f64 {
        (date - first).num_days() as f64
    }
}

impl Widget for RateChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(format!(" {} ", self.title));

        let (Some(first), Some(last), Some((y_min, y_max))) = (
            self.first_date(),
            self.table.rows().last().map(|row| row.date),
            self.table.value_bounds(),
        ) else {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(inner.x, inner.y, "No Data", Style::default());
            return;
        };

        let points: Vec<(MaturityKey, Vec<(f64, f64)>)> = self
            .table
            .columns()
            .iter()
            .map(|key| {
                let data: Vec<(f64, f64)> = self
                    .table
                    .series(*key)
                    .into_iter()
                    .map(|(date, value)| (Self::x_of(first, date), value))
                    .collect();
                (*key, data)
            })
            .filter(|(_, data)| !data.is_empty())
            .collect();

        let datasets = points
            .iter()
            .map(|(key, data)| {
                Dataset::default()
                    .name(key.label())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series_color(*key)))
                    .data(data)
            })
            .collect::<Vec<_>>();

        let x_max = Self::x_of(first, last).max(1.0);
        let x_labels = date_labels(first, last);

        // Pad the y range so flat series do not sit on the border.
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 0.1 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;
        let y_labels = vec![
            format!("{y_lower:.2}"),
            format!("{:.2}", (y_lower + y_upper) / 2.0),
            format!("{y_upper:.2}"),
        ];

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Rate (%)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

/// x-axis labels spread over `first..=last` without repeating a date.
fn date_labels(first: NaiveDate, last: NaiveDate) -> Vec<String> {
    let span = (last - first).num_days();
    match span {
        // A single centred label; the outer slots stay blank.
        0 => vec![String::new(), first.to_string(), String::new()],
        1 => vec![first.to_string(), last.to_string()],
        _ => {
            let mid = first + chrono::Duration::days(span / 2);
            vec![first.to_string(), mid.to_string(), last.to_string()]
        }
    }
}

/// Draws the chart off-screen and returns it as printable text. With
/// `colored`, each cell keeps its foreground colour.
pub fn render_to_string(
    table: &AlignedTable,
    title: &str,
    width: u16,
    height: u16,
    colored: bool,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    RateChart::new(table, title).render(area, &mut buf);

    let mut lines = Vec::with_capacity(area.height as usize);
    for y in 0..area.height {
        let mut line = String::new();
        for x in 0..area.width {
            let Some(cell) = buf.cell((x, y)) else {
                continue;
            };
            match to_console_color(cell.fg).filter(|_| colored) {
                Some(color) => line.push_str(
                    &console::Style::new()
                        .fg(color)
                        .force_styling(true)
                        .apply_to(cell.symbol())
                        .to_string(),
                ),
                None => line.push_str(cell.symbol()),
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn to_console_color(color: Color) -> Option<console::Color> {
    match color {
        Color::Cyan => Some(console::Color::Cyan),
        Color::Green => Some(console::Color::Green),
        Color::Yellow => Some(console::Color::Yellow),
        Color::Magenta => Some(console::Color::Magenta),
        Color::Gray => Some(console::Color::White),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::align::align;
    use crate::core::fetch::tests::series;
    use std::collections::BTreeMap;

    fn sample_table() -> AlignedTable {
        align(&BTreeMap::from([
            (
                MaturityKey::OneMonth,
                series(&[("2024-01-01", 3.90), ("2024-01-15", 3.88), ("2024-02-01", 3.86)]),
            ),
            (
                MaturityKey::TwelveMonths,
                series(&[("2024-01-01", 3.60), ("2024-02-01", 3.55)]),
            ),
        ]))
        .unwrap()
    }

    fn buffer_text(table: &AlignedTable, title: &str) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        RateChart::new(table, title).render(area, &mut buf);

        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        content
    }

    #[test]
    fn test_chart_renders_title_legend_and_axes() {
        let content = buffer_text(&sample_table(), "Euribor rates 2024-01-01 - 2024-02-01");

        assert!(content.contains("Euribor rates 2024-01-01 - 2024-02-01"));
        assert!(content.contains("1M"));
        assert!(content.contains("12M"));
        assert!(content.contains("2024-01-01"));
        assert!(content.contains("2024-02-01"));
        assert!(content.contains("Rate (%)"));
    }

    #[test]
    fn test_chart_without_values_shows_no_data() {
        let empty = align(&BTreeMap::from([(MaturityKey::OneMonth, Default::default())])).unwrap();
        let content = buffer_text(&empty, "Euribor rates");
        assert!(content.contains("No Data"));
    }

    #[test]
    fn test_series_lines_use_maturity_colors() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        RateChart::new(&sample_table(), "t").render(area, &mut buf);

        let colors: Vec<Color> = buf.content().iter().map(|cell| cell.fg).collect();
        assert!(colors.contains(&series_color(MaturityKey::OneMonth)));
        assert!(colors.contains(&series_color(MaturityKey::TwelveMonths)));
        assert!(!colors.contains(&series_color(MaturityKey::SixMonths)));
    }

    #[test]
    fn test_date_labels_never_repeat() {
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();

        assert_eq!(
            date_labels(day("2024-01-01"), day("2024-01-01")),
            vec!["", "2024-01-01", ""]
        );
        assert_eq!(
            date_labels(day("2024-01-01"), day("2024-01-02")),
            vec!["2024-01-01", "2024-01-02"]
        );
        assert_eq!(
            date_labels(day("2024-01-01"), day("2024-02-01")),
            vec!["2024-01-01", "2024-01-16", "2024-02-01"]
        );
    }

    #[test]
    fn test_single_date_chart_shows_date_once() {
        let table = align(&BTreeMap::from([(
            MaturityKey::ThreeMonths,
            series(&[("2024-01-01", 3.95)]),
        )]))
        .unwrap();

        let text = render_to_string(&table, "Euribor rates", 60, 12, false);

        assert_eq!(text.matches("2024-01-01").count(), 1, "\n{text}");
        assert!(!text.contains("024-01-0 "), "\n{text}");
    }

    #[test]
    fn test_render_to_string_plain() {
        let text = render_to_string(&sample_table(), "Euribor rates", 60, 20, false);

        assert_eq!(text.lines().count(), 20);
        assert!(text.contains("Euribor rates"));
        assert!(!text.contains('\u{1b}'));
        assert!(text.lines().all(|line| !line.ends_with(' ')));
    }

    #[test]
    fn test_render_to_string_colored() {
        let text = render_to_string(&sample_table(), "Euribor rates", 60, 20, true);
        assert!(text.contains('\u{1b}'));
    }
}
