//! Conversion between user-facing decimal amounts and stored minor units.

use serde::{Deserialize, Serialize};

use crate::errors::{FinanceError, Result};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware rendering of cent amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub currency: CurrencyCode,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::for_locale("en-US", CurrencyCode::default())
    }
}

impl MoneyFormat {
    /// Locales written with a decimal comma (`pt-BR`, `de-DE`, ...) swap the separators.
    pub fn for_locale(locale: &str, currency: CurrencyCode) -> Self {
        let language = locale
            .split(|ch| ch == '-' || ch == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let decimal_comma = matches!(
            language.as_str(),
            "pt" | "de" | "es" | "fr" | "it" | "nl" | "tr"
        );
        if decimal_comma {
            Self {
                currency,
                decimal_separator: ',',
                grouping_separator: '.',
            }
        } else {
            Self {
                currency,
                decimal_separator: '.',
                grouping_separator: ',',
            }
        }
    }

    pub fn format(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let magnitude = cents.unsigned_abs();
        let whole = (magnitude / 100).to_string();
        let fraction = magnitude % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(digit);
        }

        format!(
            "{}{} {}{}{:02}",
            sign,
            self.currency.as_str(),
            grouped,
            self.decimal_separator,
            fraction
        )
    }

    /// Parses user input such as `1234.5`, `1,234.56` or `12` into cents.
    /// Grouping separators are ignored; at most two fraction digits are accepted.
    pub fn parse(&self, input: &str) -> Result<i64> {
        let invalid = || FinanceError::Validation(format!("invalid amount `{}`", input));
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|ch| *ch != self.grouping_separator && !ch.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(invalid());
        }
        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };
        let (whole, fraction) = match digits.split_once(self.decimal_separator) {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if fraction.len() > 2
            || !whole.chars().all(|ch| ch.is_ascii_digit())
            || !fraction.chars().all(|ch| ch.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|value| value.checked_add(fraction))
            .ok_or_else(invalid)?;
        Ok(if negative { -cents } else { cents })
    }
}
