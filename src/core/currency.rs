//! Catalog of supported currencies and their metadata.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Btc,
    Brl,
}

impl CurrencyCode {
    pub fn all() -> [CurrencyCode; 5] {
        [
            CurrencyCode::Usd,
            CurrencyCode::Eur,
            CurrencyCode::Gbp,
            CurrencyCode::Btc,
            CurrencyCode::Brl,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "US Dollar",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Gbp => "British Pound",
            CurrencyCode::Btc => "Bitcoin",
            CurrencyCode::Brl => "Brazilian Real",
        }
    }

    /// Formatting locale for amounts quoted in this currency. Each code maps
    /// to exactly one locale.
    pub fn locale(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "en-US",
            CurrencyCode::Eur => "de-DE",
            CurrencyCode::Gbp => "en-GB",
            CurrencyCode::Btc => "en-US",
            CurrencyCode::Brl => "pt-BR",
        }
    }

    /// History for crypto currencies comes from the external market-data
    /// service instead of the internal history service.
    pub fn is_crypto(&self) -> bool {
        matches!(self, CurrencyCode::Btc)
    }

    /// Coin identifier on the market-data service, for crypto codes only.
    pub fn coin_id(&self) -> Option<&'static str> {
        match self {
            CurrencyCode::Btc => Some("bitcoin"),
            _ => None,
        }
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CurrencyCode::Usd => "USD",
                CurrencyCode::Eur => "EUR",
                CurrencyCode::Gbp => "GBP",
                CurrencyCode::Btc => "BTC",
                CurrencyCode::Brl => "BRL",
            }
        )
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            "GBP" => Ok(CurrencyCode::Gbp),
            "BTC" => Ok(CurrencyCode::Btc),
            "BRL" => Ok(CurrencyCode::Brl),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("Btc".parse::<CurrencyCode>().unwrap(), CurrencyCode::Btc);
        assert_eq!("BRL".parse::<CurrencyCode>().unwrap(), CurrencyCode::Brl);
    }

    #[test]
    fn test_parse_rejects_unknown_code() {
        let result = "XYZ".parse::<CurrencyCode>();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Unsupported currency: XYZ");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for code in CurrencyCode::all() {
            assert_eq!(code.to_string().parse::<CurrencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_every_code_has_label_and_locale() {
        for code in CurrencyCode::all() {
            assert!(!code.label().is_empty());
            assert!(!code.locale().is_empty());
        }
    }

    #[test]
    fn test_only_btc_is_crypto() {
        for code in CurrencyCode::all() {
            assert_eq!(code.is_crypto(), code == CurrencyCode::Btc);
            assert_eq!(code.coin_id().is_some(), code.is_crypto());
        }
    }

    #[test]
    fn test_serde_uses_upper_case_code() {
        let json = serde_json::to_string(&CurrencyCode::Eur).unwrap();
        assert_eq!(json, "\"EUR\"");
        let back: CurrencyCode = serde_json::from_str("\"GBP\"").unwrap();
        assert_eq!(back, CurrencyCode::Gbp);
    }
}
