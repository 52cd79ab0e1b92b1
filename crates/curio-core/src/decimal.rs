//! Precision-safe monetary type.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors when comparing bid amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Monetary amount with exact decimal precision.
///
/// Wraps `Decimal` so item prices and offer amounts cannot be
/// accidentally mixed with other numeric quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Lossy conversion for wire payloads that carry JSON numbers.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Parse a positive price from raw user input.
    ///
    /// Rejects non-numeric strings, zero, and negative amounts.
    pub fn parse_positive(raw: &str) -> Result<Self, CoreError> {
        let value = Decimal::from_str(raw.trim())
            .map_err(|_| CoreError::InvalidPrice(raw.to_string()))?;
        let price = Self(value);
        if !price.is_positive() {
            return Err(CoreError::InvalidPrice(raw.to_string()));
        }
        Ok(price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_ordering() {
        let a = Price::new(dec!(500.0));
        let b = Price::new(dec!(600.0));
        assert!(b > a);
        assert_eq!(a, Price::new(dec!(500.00)));
    }

    #[test]
    fn test_parse_positive_accepts_decimals() {
        let p = Price::parse_positive("123.45").unwrap();
        assert_eq!(p.inner(), dec!(123.45));

        // Leading/trailing whitespace is tolerated
        let p = Price::parse_positive(" 600 ").unwrap();
        assert_eq!(p.inner(), dec!(600));
    }

    #[test]
    fn test_parse_positive_rejects_garbage() {
        assert!(Price::parse_positive("abc").is_err());
        assert!(Price::parse_positive("").is_err());
        assert!(Price::parse_positive("0").is_err());
        assert!(Price::parse_positive("-5").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let p = Price::new(dec!(500.0));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"500.0\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
