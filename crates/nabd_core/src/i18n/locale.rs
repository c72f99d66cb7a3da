//! Locale context shared by renderers.

use serde::{Deserialize, Serialize};

/// Supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Arabic,
}

impl Language {
    /// BCP-47 style short code.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "ar" => Some(Self::Arabic),
            _ => None,
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Self::English => TextDirection::Ltr,
            Self::Arabic => TextDirection::Rtl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// Read-only formatting parameters supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    pub language: Language,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl LocaleContext {
    pub fn new(
        language: Language,
        currency_code: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            language,
            currency_code: currency_code.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn direction(&self) -> TextDirection {
        self.language.direction()
    }

    /// Formats an amount with two decimals and the currency symbol.
    ///
    /// LTR places the symbol before the amount; RTL places it after.
    pub fn format_money(&self, amount: f64) -> String {
        let formatted = format_decimal(amount, 2);
        match self.direction() {
            TextDirection::Ltr => format!("{}{formatted}", self.currency_symbol),
            TextDirection::Rtl => format!("{formatted} {}", self.currency_symbol),
        }
    }
}

impl Default for LocaleContext {
    fn default() -> Self {
        Self::new(Language::English, "USD", "$")
    }
}

/// Formats a number with thousands separators and fixed precision.
pub(crate) fn format_decimal(value: f64, precision: usize) -> String {
    let raw = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && raw.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
