//! Renders a one-shot conversion between two currencies.

use anyhow::Result;

use crate::cli::ui;
use crate::core::currency::CurrencyCode;
use crate::core::feed::FeedState;
use crate::dashboard::Dashboard;

pub async fn run(
    dashboard: &Dashboard,
    from: CurrencyCode,
    to: CurrencyCode,
    amount: f64,
) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Converting {amount} {from} to {to}..."));
    dashboard.request_conversion(from, to, amount).await;
    spinner.finish_and_clear();

    let snapshot = dashboard.snapshot().await;
    match &snapshot.conversion {
        FeedState::Ready(result) => {
            println!(
                "{} = {}",
                ui::format_amount(result.input_amount, result.from),
                ui::style_text(
                    &ui::format_amount(result.converted_amount, result.to),
                    ui::StyleType::Value
                )
            );
        }
        FeedState::Failed(message) => {
            println!("{}", ui::style_text(message, ui::StyleType::Error));
        }
        FeedState::Idle | FeedState::Loading => {
            println!("{}", ui::style_text("No result", ui::StyleType::Subtle));
        }
    }

    Ok(())
}
