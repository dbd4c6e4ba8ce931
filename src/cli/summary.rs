use super::ui;
use crate::core::rates::RateSource;
use crate::core::summary::{BreakdownMode, SummaryResult};
use crate::service::FxService;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

impl SummaryResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("Rate (EUR→USD)"),
            ui::header_cell("Change"),
        ]);

        for day in self.breakdown.iter().flatten() {
            table.add_row(vec![
                Cell::new(day.date),
                ui::rate_cell(day.rate),
                ui::change_cell(day.pct_change),
            ]);
        }

        let source = match self.source {
            RateSource::Api => ui::style_text("live data", ui::StyleType::Subtle),
            RateSource::Fallback => ui::style_text("fallback data", ui::StyleType::Error),
        };
        let mut output = format!(
            "{} ({})\n\n",
            ui::style_text("EUR → USD", ui::StyleType::Title),
            source
        );

        if self.breakdown.is_some() {
            output.push_str(&table.to_string());
            output.push_str("\n\n");
        }

        let totals = &self.totals;
        output.push_str(&format!(
            "{} {:.4} → {:.4}\n{} {:+.4}%\n{} {:.4}",
            ui::style_text("Range:", ui::StyleType::TotalLabel),
            totals.start_rate,
            totals.end_rate,
            ui::style_text("Total change:", ui::StyleType::TotalLabel),
            totals.total_pct_change,
            ui::style_text("Mean rate:", ui::StyleType::TotalLabel),
            totals.mean_rate,
        ));
        output
    }
}

pub async fn run(
    service: &FxService,
    start: NaiveDate,
    end: NaiveDate,
    mode: BreakdownMode,
) -> Result<()> {
    let summary = service.summary(start, end, mode).await?;
    println!("{}", summary.display_as_table());
    Ok(())
}
