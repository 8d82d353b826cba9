//! # Money Module
//!
//! Provides the `Money` type for group-buy prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Carrying a float price through the pipeline:                           │
//! │    10000 × (1 - 0.29) = 7100.000000000001  ❌                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer prices, one rounding                             │
//! │    round(10000 × (100 - 29) / 100) = 7100  ✅                           │
//! │    The discount multiplication is the only float step, and its          │
//! │    result is rounded once, half away from zero                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Group-buy prices are quoted in whole currency units (no minor unit), so a
//! `Money` value is simply the integer price the participant will be charged.
//!
//! ## Usage
//! ```rust
//! use nestling_core::money::Money;
//! use nestling_core::types::DiscountRate;
//!
//! let base = Money::from_units(10000);
//! let discounted = base.apply_discount(DiscountRate::from_percentage(25.0));
//! assert_eq!(discounted.units(), 7500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A price in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: a misconfigured discount above 100% can push the raw
///   discounted value below zero before the price floor is applied
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare number**: `{"finalPrice": 9900}`
///
/// ## Where Money is Used
/// ```text
/// TeamItem.base_price ──┬──► apply_discount(rate) ──► max(min_price) ──► finalPrice
///                       │
/// TeamItem.min_price ───┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use nestling_core::money::Money;
    ///
    /// let price = Money::from_units(12900);
    /// assert_eq!(price.units(), 12900);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage discount: `round(amount × (1 - rate))`.
    ///
    /// ## Rounding
    /// Rounded exactly once, after the multiplication, half away from zero:
    /// ```text
    /// 9999 × (100 - 1.5) / 100 = 9849.015  → 9849
    /// 1    × (100 - 50)  / 100 = 0.5       → 1
    /// ```
    /// Results beyond the `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use nestling_core::money::Money;
    /// use nestling_core::types::DiscountRate;
    ///
    /// let price = Money::from_units(10000);
    /// assert_eq!(price.apply_discount(DiscountRate::from_percentage(1.0)).units(), 9900);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        let discounted = self.0 as f64 * (100.0 - rate.percentage()) / 100.0;
        Money(discounted.round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display groups thousands: `12,900`.
///
/// ## Note
/// This is for logs and debugging. Clients format prices for their locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}", sign, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(10000);
        assert_eq!(money.units(), 10000);
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(0)), "0");
        assert_eq!(format!("{}", Money::from_units(999)), "999");
        assert_eq!(format!("{}", Money::from_units(1000)), "1,000");
        assert_eq!(format!("{}", Money::from_units(12900)), "12,900");
        assert_eq!(format!("{}", Money::from_units(1234567)), "1,234,567");
        assert_eq!(format!("{}", Money::from_units(-7500)), "-7,500");
    }

    fn off(pct: f64) -> DiscountRate {
        DiscountRate::from_percentage(pct)
    }

    #[test]
    fn test_apply_discount_exact() {
        let base = Money::from_units(10000);
        assert_eq!(base.apply_discount(DiscountRate::zero()).units(), 10000);
        assert_eq!(base.apply_discount(off(1.0)).units(), 9900);
        assert_eq!(base.apply_discount(off(29.0)).units(), 7100);
        assert_eq!(base.apply_discount(off(100.0)).units(), 0);
    }

    #[test]
    fn test_apply_discount_rounds_once_half_away_from_zero() {
        // 1 × 50% = 0.5 → 1
        assert_eq!(Money::from_units(1).apply_discount(off(50.0)).units(), 1);
        // 9999 × 98.5% = 9849.015 → 9849
        assert_eq!(Money::from_units(9999).apply_discount(off(1.5)).units(), 9849);
        // 333 × 97% = 323.01 → 323
        assert_eq!(Money::from_units(333).apply_discount(off(3.0)).units(), 323);
        // 10000 × 97.005% = 9700.5 → 9701
        assert_eq!(Money::from_units(10000).apply_discount(off(2.995)).units(), 9701);
    }

    #[test]
    fn test_apply_discount_uses_unrounded_percent() {
        // 12.34% must not collapse to 12.3%
        assert_eq!(Money::from_units(10000).apply_discount(off(12.34)).units(), 8766);
    }

    #[test]
    fn test_apply_discount_above_full_goes_negative() {
        // 150% off is only reachable through a misconfigured cap; the price
        // floor is what keeps it sane.
        let price = Money::from_units(1000).apply_discount(off(150.0));
        assert_eq!(price.units(), -500);
        assert!(price.is_negative());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_units(9900)).unwrap();
        assert_eq!(json, "9900");
        let back: Money = serde_json::from_str("7000").unwrap();
        assert_eq!(back, Money::from_units(7000));
    }
}
