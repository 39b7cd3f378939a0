//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from the backend as plain JSON numbers in whole currency
//! units (the shop prices in Baht). `Decimal` keeps discount arithmetic
//! exact; rounding happens only at display time.

use core::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative monetary amount in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact percentage of this price (`percent` is 0-100).
    #[must_use]
    pub fn percentage(&self, percent: u8) -> Self {
        Self(self.0 * Decimal::from(percent) / Decimal::from(100))
    }

    /// Subtract, saturating at zero rather than going negative.
    #[must_use]
    pub fn saturating_sub(&self, other: Self) -> Self {
        if other.0 > self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{e3f}{}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let p = Price::from_units(1500);
        assert_eq!(p.amount(), Decimal::from(1500));
    }

    #[test]
    fn test_percentage_exact() {
        // 10% of 999 is 99.9, kept exact rather than rounded
        let p = Price::from_units(999);
        assert_eq!(p.percentage(10).amount().to_string(), "99.9");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_units(1000), Price::from_units(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(1500));
    }

    #[test]
    fn test_saturating_sub() {
        let a = Price::from_units(100);
        let b = Price::from_units(300);
        assert_eq!(a.saturating_sub(b), Price::ZERO);
        assert_eq!(b.saturating_sub(a), Price::from_units(200));
    }

    #[test]
    fn test_deserialize_from_number() {
        let p: Price = serde_json::from_str("2990").unwrap();
        assert_eq!(p, Price::from_units(2990));
    }

    #[test]
    fn test_display() {
        let p = Price::from_units(1400);
        assert_eq!(format!("{p}"), "\u{e3f}1400");
    }
}
