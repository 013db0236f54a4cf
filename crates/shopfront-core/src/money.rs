//! # Money Module
//!
//! Prices and cart totals as exact decimals.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart totals with f64                                                   │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    9.99 × 3 = 29.969999999999995  ❌                                    │
//! │                                                                         │
//! │  Cart totals with Money                                                 │
//! │    9.99 × 3 = 29.97   ✅ exact                                          │
//! │    0.125 × 3 = 0.375  ✅ exact, shown as $0.38                          │
//! │                                                                         │
//! │  Catalog prices arrive as JSON decimals ("109.95"). They are parsed    │
//! │  from their decimal TEXT, never through f64 arithmetic. Rounding to   │
//! │  whole cents happens only when an amount is rendered.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::parse_decimal("9.99").unwrap();
//! assert_eq!(price, Money::from_cents(999));
//!
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.to_string(), "$19.98");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::error::{ValidationError, ValidationResult};

/// Fractional digits shown when an amount is rendered.
pub const MINOR_UNIT_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount carried at full decimal precision.
///
/// ## Design Decisions
/// - **Decimal, not cents**: a `0.125` catalog price stays `0.125`, so line
///   totals and cart totals are exact
/// - **Rounded on output only**: `Display` and [`Money::to_fixed`] round
///   half away from zero
/// - **Serializes as a decimal string** (`"19.98"`), never a float
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a whole number of cents.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_decimal_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MINOR_UNIT_PLACES))
    }

    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Parses a decimal amount such as `"109.95"`, `"22.3"` or `"0.125"`.
    ///
    /// ## Rules
    /// - digits with an optional single `.` separator and digits on both sides
    /// - every fractional digit is kept
    /// - no sign, no exponent, no surrounding garbage
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("22.3").unwrap(), Money::from_cents(2230));
    /// assert_eq!(Money::parse_decimal("0.125").unwrap().to_fixed(3), "0.125");
    /// assert!(Money::parse_decimal("-1.00").is_err());
    /// ```
    pub fn parse_decimal(raw: &str) -> ValidationResult<Money> {
        let text = raw.trim();

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        if text.starts_with('-') {
            return Err(ValidationError::Negative {
                field: "price".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let (whole, frac) = match text.split_once('.') {
            Some((whole, frac)) if !frac.is_empty() => (whole, frac),
            Some(_) => return Err(invalid("expected a plain decimal number")),
            None => (text, ""),
        };

        let plain = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !plain(whole) || !plain(frac) {
            return Err(invalid("expected a plain decimal number"));
        }

        Decimal::from_str_exact(text)
            .map(Money)
            .map_err(|_| invalid("amount out of range"))
    }

    /// Returns the exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a quantity, saturating at the Decimal bounds.
    ///
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Rounds half away from zero to `places` fractional digits.
    pub fn round_to(&self, places: u32) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(places);
        Money(rounded)
    }

    /// Renders the amount rounded to `places` digits, without a currency
    /// symbol. A negative amount keeps its `-`.
    pub fn to_fixed(&self, places: u32) -> String {
        let rounded = self.round_to(places);
        let sign = if rounded.is_negative() { "-" } else { "" };
        format!("{}{}", sign, rounded.0.abs())
    }

    /// Renders the amount in whole cents, e.g. `"19.98"`.
    pub fn to_decimal_string(&self) -> String {
        self.to_fixed(MINOR_UNIT_PLACES)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`. The view layer uses its own currency settings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to(MINOR_UNIT_PLACES);
        let sign = if rounded.is_negative() { "-" } else { "" };
        write!(f, "{}${}", sign, rounded.0.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
