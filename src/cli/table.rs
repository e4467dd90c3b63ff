use super::ui;
use crate::core::config::AppConfig;
use crate::core::{AlignedTable, DateRange, SeriesProvider};
use anyhow::Result;
use comfy_table::Cell;

impl AlignedTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        let mut header = vec![ui::header_cell("Date")];
        header.extend(
            self.columns()
                .iter()
                .map(|key| ui::header_cell(&format!("{key} (%)"))),
        );
        table.set_header(header);

        for row in self.rows() {
            let mut cells = vec![Cell::new(row.date.to_string())];
            cells.extend(
                self.columns()
                    .iter()
                    .map(|key| ui::format_optional_cell(row.value(*key), |v| format!("{v:.3}"))),
            );
            table.add_row(cells);
        }

        table.to_string()
    }
}

pub async fn run(
    provider: &(dyn SeriesProvider + Send + Sync),
    config: &AppConfig,
    range: &DateRange,
) -> Result<()> {
    let outcome = super::fetch_rates(provider, &config.maturities, range).await;

    match outcome.table() {
        Some(table) => {
            println!(
                "{}\n",
                ui::style_text(&super::chart_title(range), ui::StyleType::Title)
            );
            println!("{}", table.display_as_table());
        }
        None => println!(
            "{}",
            ui::style_text(&super::unavailable_notice(range), ui::StyleType::Subtle)
        ),
    }
    Ok(())
}
