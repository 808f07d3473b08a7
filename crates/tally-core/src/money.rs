//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Integer Cents at Rest, Exact Decimals in Flight
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE DAILY RATE PROBLEM                                                 │
//! │                                                                         │
//! │  Gross 31000.00 over a 31-day month = 1000.00 per day     (fine)       │
//! │  Gross 30000.00 over a 31-day month = 967.741935... per day            │
//! │                                                                         │
//! │  Rounding the daily rate first and multiplying later drifts by cents   │
//! │  per day. So:                                                           │
//! │    • stored amounts are integer cents (this type)                      │
//! │    • rates are exact `Decimal`s, never rounded                         │
//! │    • results are rounded ONCE, back into cents                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let gross = Money::from_cents(3_000_000); // 30000.00
//! let daily = gross.to_decimal() / Decimal::from(31);
//! let ten_days = Money::from_decimal(daily * Decimal::from(10));
//! assert_eq!(ten_days.cents(), 967_742); // 9677.42
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: deductions can be carried as negative intermediate values
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency**: the ledger is single-currency by design
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let salary = Money::from_cents(2_500_050); // 25000.50
    /// assert_eq!(salary.cents(), 2_500_050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an exact decimal amount to cents.
    ///
    /// Uses Bankers Rounding (round half to even), so 0.125 → 0.12 and
    /// 0.135 → 0.14. Values beyond the `i64` cent range saturate.
    pub fn from_decimal(amount: Decimal) -> Self {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(2);
        let cents = rounded.mantissa();
        match i64::try_from(cents) {
            Ok(c) => Money(c),
            Err(_) if cents.is_negative() => Money(i64::MIN),
            Err(_) => Money(i64::MAX),
        }
    }

    /// Returns the exact decimal value (two decimal places).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, e.g. `12345.60` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(3_000_000).to_string(), "30000.00");
    }

    #[test]
    fn test_from_decimal_rounds_half_to_even() {
        assert_eq!(Money::from_decimal(Decimal::new(125, 3)).cents(), 12); // 0.125
        assert_eq!(Money::from_decimal(Decimal::new(135, 3)).cents(), 14); // 0.135
        assert_eq!(Money::from_decimal(Decimal::new(1_111_111, 4)).cents(), 11_111); // 111.1111
        assert_eq!(Money::from_decimal(Decimal::new(-5555, 3)).cents(), -556); // -5.555
    }

    #[test]
    fn test_to_decimal_round_trip() {
        let m = Money::from_cents(2_500_050);
        assert_eq!(m.to_decimal(), Decimal::new(2_500_050, 2));
        assert_eq!(Money::from_decimal(m.to_decimal()), m);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_cents(-1).floor_zero(), Money::zero());
        assert_eq!(Money::from_cents(42).floor_zero().cents(), 42);
    }
}
