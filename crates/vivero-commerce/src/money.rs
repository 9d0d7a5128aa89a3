//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest currency unit, which is also how the
//! platform stores prices (`amount: 900` is $9.00).

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::CommerceError;

/// An ISO 4217 currency code.
///
/// Stored lowercase, the way the platform writes codes (`"usd"`), and
/// serialized as that string. Any three-letter code is accepted; the
/// associated constants cover the common ones.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    pub const USD: Currency = Currency(*b"usd");
    pub const EUR: Currency = Currency(*b"eur");
    pub const GBP: Currency = Currency(*b"gbp");
    pub const JPY: Currency = Currency(*b"jpy");
    pub const CAD: Currency = Currency(*b"cad");
    pub const AUD: Currency = Currency(*b"aud");
    pub const CHF: Currency = Currency(*b"chf");
    pub const CNY: Currency = Currency(*b"cny");
    pub const INR: Currency = Currency(*b"inr");
    pub const MXN: Currency = Currency(*b"mxn");

    /// Get the platform currency code (e.g., "usd").
    pub fn code(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Get the currency symbol (e.g., "$"). Unknown codes use the uppercase code.
    pub fn symbol(&self) -> String {
        let known = match &self.0 {
            b"usd" => "$",
            b"eur" => "\u{20ac}",
            b"gbp" => "\u{00a3}",
            b"jpy" | b"cny" => "\u{00a5}",
            b"cad" => "CA$",
            b"aud" => "A$",
            b"chf" => "CHF ",
            b"inr" => "\u{20b9}",
            b"mxn" => "MX$",
            _ => return format!("{} ", self.code().to_uppercase()),
        };
        known.to_string()
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match &self.0 {
            b"jpy" | b"krw" | b"clp" | b"vnd" | b"isk" | b"pyg" => 0,
            b"bhd" | b"kwd" | b"omr" | b"jod" | b"tnd" => 3,
            _ => 2,
        }
    }

    /// Parse a three-letter currency code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        let bytes = code.trim().as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        Some(Currency([
            bytes[0].to_ascii_lowercase(),
            bytes[1].to_ascii_lowercase(),
            bytes[2].to_ascii_lowercase(),
        ]))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::str::FromStr for Currency {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CommerceError::InvalidCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::from_code(&code)
            .ok_or_else(|| de::Error::custom(format!("invalid currency code: {}", code)))
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount: i64,
    /// The currency.
    #[serde(rename = "currency_code")]
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$34.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(3499, Currency::USD).display(), "$34.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_money_wire_shape() {
        let json = serde_json::to_value(Money::new(900, Currency::USD)).unwrap();
        assert_eq!(json, serde_json::json!({ "amount": 900, "currency_code": "usd" }));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
        assert_eq!(Currency::from_code("u5d"), None);
        assert!("xy".parse::<Currency>().is_err());
    }

    #[test]
    fn test_unlisted_currency_is_accepted() {
        let ars: Currency = "ARS".parse().unwrap();
        assert_eq!(ars.code(), "ars");
        assert_eq!(Money::new(150_000, ars).display(), "ARS 1500.00");
        assert_eq!(Money::new(500, "krw".parse().unwrap()).display(), "KRW 500");
    }

    #[test]
    fn test_currency_rejects_malformed_code_on_decode() {
        let err = serde_json::from_value::<Money>(serde_json::json!({
            "amount": 100,
            "currency_code": "dollars"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid currency code"));
    }
}
