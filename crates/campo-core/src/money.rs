//! # Money Module
//!
//! Provides the `Money` type used for every amount in the store: prices,
//! drawer balances, transfers, audit differences.
//!
//! ## Integer Cents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Binary floats cannot hold most decimal fractions exactly:             │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A drawer audit that is off by 0.00000000000004 is not "Cuadrada".      │
//! │                                                                         │
//! │  Money stores i64 cents, so every sum and difference is exact:         │
//! │    "25.50" → 2550      2 × 2550 + 4500 = 9600 → $96.00                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts enter through [`Money::from_str`] (strict decimal text) or the
//! [`decimal`] serde adapter on the REST boundary, never through `f64`
//! arithmetic. Operator input is capped at [`crate::MAX_AMOUNT`], which
//! keeps the plain operators below from overflowing on validated values.
//!
//! ## Usage
//! ```rust
//! use campo_core::money::Money;
//!
//! let price: Money = "25.50".parse().unwrap();
//! assert_eq!(price.cents(), 2550);
//!
//! let line = price * 2u32 + Money::from_major(45);
//! assert_eq!(line.to_string(), "$96.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed, because an audit difference is negative when the drawer is
/// short. Serializes as the raw cent count; use [`decimal`] where a
/// decimal number is expected on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use campo_core::money::Money;
    ///
    /// let price = Money::from_cents(2550);
    /// assert_eq!(price.major(), 25);
    /// assert_eq!(price.cents_part(), 50);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Denomination face values and opening balances are whole pesos, so
    /// this is the usual constructor in the cash audit.
    ///
    /// ## Example
    /// ```rust
    /// use campo_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(200_000).cents(), 20_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use campo_core::money::Money;
    ///
    /// let shortage = Money::from_major(-200);
    /// assert_eq!(shortage.abs(), Money::from_major(200));
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use campo_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2550);
    /// assert_eq!(unit_price.checked_mul_quantity(2), Some(Money::from_cents(5100)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Strict decimal parsing.
///
/// Accepts an optional leading `-`, at least one integer digit, and an
/// optional fraction of one or two digits. Anything else (thousands
/// separators, exponents, currency symbols, `"1."`, `".5"`) is rejected.
///
/// ## Example
/// ```rust
/// use campo_core::money::Money;
///
/// assert_eq!("25.5".parse::<Money>().unwrap().cents(), 2550);
/// assert_eq!("-3".parse::<Money>().unwrap().cents(), -300);
/// assert!("1.234".parse::<Money>().is_err());
/// assert!("abc".parse::<Money>().is_err());
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("'{}' is not a decimal number", s.trim()),
            ));
        }

        let fraction_cents = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(ValidationError::invalid_format(
                    "amount",
                    format!("'{}' must have one or two decimal digits", s.trim()),
                ));
            }
            Some(f) => {
                let value: i64 = f
                    .parse()
                    .map_err(|_| ValidationError::invalid_format("amount", "bad fraction"))?;
                if f.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let cents = whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(100))
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(|| {
                ValidationError::invalid_format("amount", format!("'{}' is too large", s.trim()))
            })?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1234.56`. The CLI applies the configured currency
/// symbol and grouping on top of this.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a count (denomination counts, item quantities).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * i64::from(qty))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Decimal Wire Format
// =============================================================================

/// Serde adapter for amounts that travel as decimal numbers (`25.5`).
///
/// Use with `#[serde(with = "campo_core::money::decimal")]`. On input it
/// accepts a JSON number or a numeric string (some backends send
/// `"25.50"`). Numbers are converted through their textual form so `25.5`
/// becomes exactly 2550 cents; only values with more than two fraction
/// digits fall back to rounding.
///
/// Fractional amounts are written from their decimal text (`"25.50"`),
/// not from a division. JSON numbers are doubles on most backends; up to
/// [`crate::MAX_AMOUNT`] every two-digit decimal reads back as the same
/// cents.
pub mod decimal {
    use super::Money;
    use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.cents_part() == 0 {
            return serializer.serialize_i64(money.major());
        }

        let sign = if money.is_negative() { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, money.major().abs(), money.cents_part());
        let number: serde_json::Number = text
            .parse()
            .map_err(<S::Error as ser::Error>::custom)?;
        number.serialize(serializer)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(serde_json::Number),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => from_number(&n).map_err(de::Error::custom),
            Wire::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }

    fn from_number(n: &serde_json::Number) -> Result<Money, String> {
        if let Some(whole) = n.as_i64() {
            return whole
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| format!("{n} is too large"));
        }
        if let Ok(money) = n.to_string().parse::<Money>() {
            return Ok(money);
        }
        match n.as_f64() {
            Some(f) if f.is_finite() && f.abs() < (i64::MAX / 100) as f64 => {
                Ok(Money::from_cents((f * 100.0).round() as i64))
            }
            _ => Err(format!("{n} is not a valid amount")),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_major() {
        let money = Money::from_cents(2550);
        assert_eq!(money.cents(), 2550);
        assert_eq!(money.major(), 25);
        assert_eq!(money.cents_part(), 50);

        assert_eq!(Money::from_major(601_000).cents(), 60_100_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_major(401_000).to_string(), "$401000.00");
        assert_eq!(Money::from_cents(-20_000).to_string(), "-$200.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_accepts_plain_decimals() {
        assert_eq!("1000".parse::<Money>().unwrap(), Money::from_major(1000));
        assert_eq!("25.5".parse::<Money>().unwrap(), Money::from_cents(2550));
        assert_eq!("25.05".parse::<Money>().unwrap(), Money::from_cents(2505));
        assert_eq!(" 0.10 ".parse::<Money>().unwrap(), Money::from_cents(10));
        assert_eq!("-7.25".parse::<Money>().unwrap(), Money::from_cents(-725));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "-", "abc", "1.", ".5", "1.234", "1,000", "1e3", "$5", "--1", "1.-5"] {
            assert!(bad.parse::<Money>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!("92233720368547758070".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((a * 3u32).cents(), 3000);
        assert_eq!((-a).cents(), -1000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_float_drift_does_not_exist() {
        let tenth: Money = "0.1".parse().unwrap();
        let fifth: Money = "0.2".parse().unwrap();
        assert_eq!(tenth + fifth, "0.3".parse().unwrap());
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Priced {
        #[serde(with = "decimal")]
        price: Money,
    }

    #[test]
    fn test_decimal_wire_reads_numbers_and_strings() {
        let from_float: Priced = serde_json::from_str(r#"{"price": 25.5}"#).unwrap();
        assert_eq!(from_float.price.cents(), 2550);

        let from_int: Priced = serde_json::from_str(r#"{"price": 45}"#).unwrap();
        assert_eq!(from_int.price.cents(), 4500);

        let from_text: Priced = serde_json::from_str(r#"{"price": "12000.00"}"#).unwrap();
        assert_eq!(from_text.price, Money::from_major(12_000));

        let noisy: Priced = serde_json::from_str(r#"{"price": 0.30000000000000004}"#).unwrap();
        assert_eq!(noisy.price.cents(), 30);

        assert!(serde_json::from_str::<Priced>(r#"{"price": "cheap"}"#).is_err());
    }

    #[test]
    fn test_decimal_wire_writes_numbers() {
        let whole = serde_json::to_string(&Priced { price: Money::from_major(45) }).unwrap();
        assert_eq!(whole, r#"{"price":45}"#);

        let fractional = serde_json::to_string(&Priced { price: Money::from_cents(2550) }).unwrap();
        assert_eq!(fractional, r#"{"price":25.5}"#);

        let small = serde_json::to_string(&Priced { price: Money::from_cents(7) }).unwrap();
        assert_eq!(small, r#"{"price":0.07}"#);

        let refund = serde_json::to_string(&Priced { price: Money::from_cents(-50) }).unwrap();
        assert_eq!(refund, r#"{"price":-0.5}"#);
    }

    #[test]
    fn test_decimal_wire_is_exact_up_to_the_cap() {
        let largest = crate::MAX_AMOUNT - Money::from_cents(1);
        let json = serde_json::to_string(&Priced { price: largest }).unwrap();
        assert_eq!(json, r#"{"price":9999999999999.99}"#);

        let back: Priced = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, largest);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(1).checked_add(Money::from_cents(2)), Some(Money::from_cents(3)));
        assert_eq!(Money::from_cents(2550).checked_mul_quantity(100_000), Some(Money::from_cents(255_000_000)));
        assert_eq!(max.checked_mul_quantity(2), None);
    }
}
