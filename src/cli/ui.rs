use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::currency::CurrencyCode;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Value,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn rate_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown while the feeds are loading.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Formats an amount using the decimal conventions of the currency's
/// formatting locale, suffixed with the currency code.
pub fn format_amount(value: f64, currency: CurrencyCode) -> String {
    let (group_sep, decimal_sep) = match currency.locale() {
        "pt-BR" | "de-DE" => ('.', ','),
        _ => (',', '.'),
    };

    let negative = value < 0.0;
    let rendered = format!("{:.2}", value.abs());
    let (whole, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}{decimal_sep}{frac} {currency}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_brl_uses_comma_decimal() {
        assert_eq!(
            format_amount(1234.5, CurrencyCode::Brl),
            "1.234,50 BRL"
        );
    }

    #[test]
    fn test_format_amount_usd_uses_dot_decimal() {
        assert_eq!(
            format_amount(1234567.891, CurrencyCode::Usd),
            "1,234,567.89 USD"
        );
    }

    #[test]
    fn test_format_amount_small_values_have_no_grouping() {
        assert_eq!(format_amount(5.43, CurrencyCode::Brl), "5,43 BRL");
        assert_eq!(format_amount(0.5, CurrencyCode::Usd), "0.50 USD");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(-1000.0, CurrencyCode::Eur), "-1.000,00 EUR");
    }
}
