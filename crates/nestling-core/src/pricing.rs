//! # Group Discount Pricing
//!
//! Computes the price of a group-buy item from its live participant count.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Group Discount Pricing                               │
//! │                                                                         │
//! │  participants ──┐                                                       │
//! │                 ▼                                                       │
//! │  discount_percent()   steps = participants / max(1, step_every)        │
//! │                       raw   = steps × clamp(step_percent, 1%, 3%)      │
//! │                       rate  = clamp(raw, 0, max_discount)              │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  evaluate_price()     price = max(min_price, round(base × (1 - rate))) │
//! │                 │                                                       │
//! │        ┌────────┴─────────┐                                             │
//! │        ▼                  ▼                                             │
//! │  PriceSnapshot      ProgressSnapshot (+ to_next_step, progress %)      │
//! │  (price endpoint)   (item detail view)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. Malformed parameters are coerced rather than
//! rejected so that a badly configured item still renders a sane price;
//! write-time checks live in [`crate::validation`].
//!
//! ## Example
//! ```rust
//! use nestling_core::money::Money;
//! use nestling_core::pricing::{compute_discounted_price, PricingParameters};
//!
//! let params = PricingParameters {
//!     base_price: Money::from_units(10000),
//!     min_price: Money::from_units(7000),
//!     discount_step_every: 10,
//!     discount_step_percent: 1.0,
//!     max_discount_percent: 30.0,
//! };
//!
//! assert_eq!(compute_discounted_price(10, &params).units(), 9900);
//! assert_eq!(compute_discounted_price(1000, &params).units(), 7000);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::DiscountRate;

/// Lowest percent a single step may grant.
pub const MIN_STEP_PERCENT: f64 = 1.0;

/// Highest percent a single step may grant.
pub const MAX_STEP_PERCENT: f64 = 3.0;

// =============================================================================
// Pricing Parameters
// =============================================================================

/// Pricing configuration of a group-buy item.
///
/// Loaded fresh from the item row on every evaluation. Field values are taken
/// as stored; the `effective_*` accessors apply the read-time coercions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingParameters {
    /// Price with zero participants.
    #[ts(type = "number")]
    pub base_price: Money,

    /// Floor the computed price never goes below.
    #[ts(type = "number")]
    pub min_price: Money,

    /// Participants needed to unlock one discount step.
    #[ts(type = "number")]
    pub discount_step_every: i64,

    /// Percent granted per step.
    pub discount_step_percent: f64,

    /// Cap on the cumulative discount percent.
    pub max_discount_percent: f64,
}

impl PricingParameters {
    /// Step size with non-positive values floored to one participant.
    #[inline]
    pub fn effective_step_every(&self) -> u64 {
        self.discount_step_every.max(1) as u64
    }

    /// Per-step percent, clamped to `[1, 3]` whatever was configured.
    /// NaN is treated as the lower bound.
    pub fn effective_step_percent(&self) -> f64 {
        if self.discount_step_percent.is_nan() {
            return MIN_STEP_PERCENT;
        }
        self.discount_step_percent.clamp(MIN_STEP_PERCENT, MAX_STEP_PERCENT)
    }

    /// Discount cap; a negative cap is treated as zero.
    #[inline]
    pub fn max_discount_rate(&self) -> DiscountRate {
        DiscountRate::from_percentage(self.max_discount_percent)
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// The result of pricing an item at one participant count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceSnapshot {
    #[ts(type = "number")]
    pub current_price: Money,
    pub discount_percent: f64,
}

impl PriceSnapshot {
    fn new(current_price: Money, discount: DiscountRate) -> Self {
        PriceSnapshot {
            current_price,
            discount_percent: discount.percentage(),
        }
    }
}

/// A [`PriceSnapshot`] plus how far the item is from its next discount step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProgressSnapshot {
    #[serde(flatten)]
    pub price: PriceSnapshot,

    /// Participants still needed for the next step; zero once the cap is hit.
    #[ts(type = "number")]
    pub to_next_step: u64,

    /// Progress toward the next step, 0-100.
    pub progress_percent: u32,
}

// =============================================================================
// Primitives
// =============================================================================

/// Computes the cumulative discount unlocked by `participants`.
///
/// ## Rules
/// ```text
/// step_every   = max(1, discount_step_every)
/// step_rate    = clamp(discount_step_percent, 1%, 3%)
/// steps        = participants / step_every      (integer division)
/// discount     = min(steps × step_rate, max_discount)
/// ```
/// A count landing exactly on a boundary counts as a full step. Percents
/// are used exactly as configured; nothing is rounded before the price.
pub fn discount_percent(participants: u64, params: &PricingParameters) -> DiscountRate {
    let steps = participants / params.effective_step_every();
    let raw = DiscountRate::from_percentage(steps as f64 * params.effective_step_percent());
    raw.capped_at(params.max_discount_rate())
}

/// Converts a discount into the charged price.
///
/// Rounds once after the multiplication, then applies the floor. When
/// `min_price > base_price` the floor wins and the result exceeds the base
/// price; configuration writes reject that combination.
pub fn evaluate_price(base_price: Money, min_price: Money, discount: DiscountRate) -> Money {
    base_price.apply_discount(discount).max(min_price)
}

// =============================================================================
// Evaluators
// =============================================================================

/// Price and discount at the given participant count.
pub fn price_snapshot(participants: u64, params: &PricingParameters) -> PriceSnapshot {
    let discount = discount_percent(participants, params);
    let price = evaluate_price(params.base_price, params.min_price, discount);
    PriceSnapshot::new(price, discount)
}

/// The final price charged at the given participant count.
pub fn compute_discounted_price(participants: u64, params: &PricingParameters) -> Money {
    price_snapshot(participants, params).current_price
}

/// Price, discount, and progress toward the next discount step.
///
/// ## Progress Rules
/// ```text
/// remainder        = participants % step_every
/// to_next_step     = step_every - remainder   (0 once discount == cap)
/// progress_percent = round(100 × remainder / step_every)
/// ```
///
/// ## Example
/// ```rust
/// use nestling_core::money::Money;
/// use nestling_core::pricing::{compute_pricing_progress, PricingParameters};
///
/// let params = PricingParameters {
///     base_price: Money::from_units(10000),
///     min_price: Money::from_units(7000),
///     discount_step_every: 10,
///     discount_step_percent: 1.0,
///     max_discount_percent: 30.0,
/// };
///
/// let progress = compute_pricing_progress(13, &params);
/// assert_eq!(progress.price.current_price.units(), 9900);
/// assert_eq!(progress.to_next_step, 7);
/// assert_eq!(progress.progress_percent, 30);
/// ```
pub fn compute_pricing_progress(participants: u64, params: &PricingParameters) -> ProgressSnapshot {
    let discount = discount_percent(participants, params);
    let price = evaluate_price(params.base_price, params.min_price, discount);

    let step_every = params.effective_step_every();
    let remainder = participants % step_every;

    let to_next_step = if discount >= params.max_discount_rate() {
        0
    } else {
        step_every - remainder
    };

    let step_every = step_every as u128;
    let progress = (200 * remainder as u128 + step_every) / (2 * step_every);

    ProgressSnapshot {
        price: PriceSnapshot::new(price, discount),
        to_next_step,
        progress_percent: progress.min(100) as u32,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
