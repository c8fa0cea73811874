//! Currency symbols and the list of symbols the app accepts

use std::fmt::Display;

/// ISO 4217 codes supported by the exchange rate provider.
pub const VALID_CURRENCY_SYMBOLS: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "FOK", "GBP", "GEL", "GGP", "GHS", "GIP", "GMD",
    "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "IMP", "INR", "IQD",
    "IRR", "ISK", "JEP", "JMD", "JOD", "JPY", "KES", "KGS", "KHR", "KID", "KMF", "KRW", "KWD",
    "KYD", "KZT", "LAK", "LBP", "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK",
    "MNT", "MOP", "MRU", "MUR", "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK",
    "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD",
    "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL", "SOS", "SRD",
    "SSP", "STN", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TVD", "TWD",
    "TZS", "UAH", "UGX", "USD", "UYU", "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD", "XDR",
    "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

/// A validated, uppercase 3-letter currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencySymbol(String);

impl CurrencySymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencySymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CurrencySymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trims and uppercases raw user input.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Fixed, ordered list of symbols a user may pick from.
#[derive(Debug, Clone)]
pub struct SymbolList {
    symbols: Vec<String>,
}

impl SymbolList {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols
                .into_iter()
                .map(|s| {
                    let s: String = s.into();
                    normalize(&s)
                })
                .collect(),
        }
    }

    /// Normalizes `raw` and returns it as a symbol if it is in the list.
    pub fn parse(&self, raw: &str) -> Option<CurrencySymbol> {
        let candidate = normalize(raw);
        self.symbols
            .iter()
            .any(|s| *s == candidate)
            .then_some(CurrencySymbol(candidate))
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.parse(raw).is_some()
    }

    /// Symbols starting with `prefix`, in list order. An empty prefix
    /// suggests nothing.
    pub fn suggest(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize(prefix);
        if prefix.is_empty() {
            return Vec::new();
        }
        self.symbols
            .iter()
            .filter(|s| s.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolList {
    fn default() -> Self {
        Self::new(VALID_CURRENCY_SYMBOLS.iter().copied())
    }
}
