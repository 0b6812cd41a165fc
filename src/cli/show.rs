//! Renders the dashboard for one selected currency: rate card plus the
//! 30-day history table. Each feed renders independently, so a history
//! failure never blanks the rate and vice versa.

use anyhow::Result;
use comfy_table::Cell;

use crate::cli::ui;
use crate::core::currency::CurrencyCode;
use crate::core::feed::FeedState;
use crate::core::model::{HistorySeries, RatePoint};
use crate::dashboard::Dashboard;

pub async fn run(
    dashboard: &Dashboard,
    currency: CurrencyCode,
    reference: CurrencyCode,
) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching {currency} rates..."));
    dashboard.select_currency(currency).await;
    spinner.finish_and_clear();

    let snapshot = dashboard.snapshot().await;

    println!(
        "{}",
        ui::style_text(
            &format!("{} ({})", currency.label(), currency),
            ui::StyleType::Title
        )
    );
    println!();

    render_rate(&snapshot.rate, currency, reference);
    println!();
    render_history(&snapshot.history, currency, reference);

    Ok(())
}

fn render_rate(state: &FeedState<RatePoint>, currency: CurrencyCode, reference: CurrencyCode) {
    match state {
        FeedState::Ready(rate) => {
            println!(
                "1 {} = {}",
                currency,
                ui::style_text(
                    &ui::format_amount(rate.rate_to_reference, reference),
                    ui::StyleType::Value
                )
            );
        }
        FeedState::Failed(message) => {
            println!("{}", ui::style_text(message, ui::StyleType::Error));
        }
        FeedState::Idle | FeedState::Loading => {
            println!("{}", ui::style_text("No rate yet", ui::StyleType::Subtle));
        }
    }
}

fn render_history(
    state: &FeedState<HistorySeries>,
    currency: CurrencyCode,
    reference: CurrencyCode,
) {
    println!(
        "{}",
        ui::style_text(
            &format!("Last 30 days ({currency} to {reference})"),
            ui::StyleType::Title
        )
    );

    match state {
        FeedState::Ready(series) if series.is_empty() => {
            println!("{}", ui::style_text("No history data", ui::StyleType::Subtle));
        }
        FeedState::Ready(series) => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Date"),
                ui::header_cell(&format!("Rate ({reference})")),
            ]);

            for point in series.points() {
                table.add_row(vec![
                    Cell::new(point.date.to_string()),
                    ui::rate_cell(ui::format_amount(point.rate, reference)),
                ]);
            }

            println!("{table}");
        }
        FeedState::Failed(message) => {
            println!("{}", ui::style_text(message, ui::StyleType::Error));
        }
        FeedState::Idle | FeedState::Loading => {
            println!("{}", ui::style_text("No history yet", ui::StyleType::Subtle));
        }
    }
}
