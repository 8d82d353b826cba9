//! # Domain Types
//!
//! Core domain types for group-buy items.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │      TeamItem        │        │    Participation     │              │
//! │  │  ──────────────────  │ 1    * │  ──────────────────  │              │
//! │  │  id (UUID)           │◄───────│  team_item_id (FK)   │              │
//! │  │  title               │        │  user_id             │              │
//! │  │  pricing ────────┐   │        │  joined_at           │              │
//! │  │  is_active       │   │        └──────────────────────┘              │
//! │  └──────────────────┼───┘                                               │
//! │                     ▼                                                   │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │  PricingParameters   │        │    DiscountRate      │              │
//! │  │  (pricing module)    │───────►│  percent (f64)       │              │
//! │  │                      │        │  1.5 = 1.5%          │              │
//! │  └──────────────────────┘        └──────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingParameters;

// =============================================================================
// Discount Rate
// =============================================================================

/// A cumulative discount, as a percentage of the base price.
///
/// Holds the exact percentage that `steps × step_percent` produced, so the
/// cap comparison runs against the configured value. Rounding happens once,
/// on the final price, in [`Money::apply_discount`](crate::money::Money::apply_discount).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// Creates a discount rate from a percentage.
    ///
    /// Negative and NaN inputs become zero.
    pub fn from_percentage(pct: f64) -> Self {
        if pct > 0.0 {
            DiscountRate(pct)
        } else {
            DiscountRate::zero()
        }
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0.0)
    }

    /// Limits the rate to `cap`.
    #[inline]
    pub fn capped_at(self, cap: DiscountRate) -> Self {
        if self > cap {
            cap
        } else {
            self
        }
    }
}

// =============================================================================
// Team Item
// =============================================================================

/// A group-buy item whose price drops as participants join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TeamItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title shown in the catalog.
    pub title: String,

    /// Optional long description for the detail view.
    pub description: Option<String>,

    /// Pricing configuration, stored inline on the item row.
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub pricing: PricingParameters,

    /// Whether the item is open for participation (soft delete).
    pub is_active: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl TeamItem {
    /// Returns the pricing parameters for an evaluation.
    #[inline]
    pub fn pricing(&self) -> &PricingParameters {
        &self.pricing
    }

    /// Checks that the item still accepts new participants.
    pub fn ensure_joinable(&self) -> CoreResult<()> {
        if !self.is_active {
            return Err(CoreError::TeamItemClosed(self.id.clone()));
        }
        Ok(())
    }
}

/// Write-side input for creating a team item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewTeamItem {
    pub title: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub pricing: PricingParameters,
}

impl NewTeamItem {
    /// Validates the input and builds a fresh, active item.
    ///
    /// ## Validation
    /// Title and pricing are checked here, once, at write time. The pricing
    /// engine still clamps at read time for rows written before these checks.
    pub fn into_team_item(self, id: String, now: DateTime<Utc>) -> CoreResult<TeamItem> {
        crate::validation::validate_title(&self.title)?;
        crate::validation::validate_pricing_parameters(&self.pricing)?;

        Ok(TeamItem {
            id,
            title: self.title.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            pricing: self.pricing,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

// =============================================================================
// Participation
// =============================================================================

/// A user's commitment to buy a team item.
///
/// At most one record exists per `(team_item_id, user_id)`; the number of
/// records for an item is the participant count fed to the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Participation {
    pub id: String,
    pub team_item_id: String,
    pub user_id: String,
    #[ts(as = "String")]
    pub joined_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sample_pricing() -> PricingParameters {
        PricingParameters {
            base_price: Money::from_units(10000),
            min_price: Money::from_units(7000),
            discount_step_every: 10,
            discount_step_percent: 1.0,
            max_discount_percent: 30.0,
        }
    }

    #[test]
    fn test_discount_rate_keeps_exact_percentage() {
        assert_eq!(DiscountRate::from_percentage(1.5).percentage(), 1.5);
        assert_eq!(DiscountRate::from_percentage(2.995).percentage(), 2.995);
        assert_eq!(DiscountRate::from_percentage(0.004).percentage(), 0.004);
    }

    #[test]
    fn test_discount_rate_coerces_garbage_to_zero() {
        assert_eq!(DiscountRate::from_percentage(-5.0), DiscountRate::zero());
        assert_eq!(DiscountRate::from_percentage(f64::NAN), DiscountRate::zero());
    }

    #[test]
    fn test_discount_rate_capped_at() {
        let cap = DiscountRate::from_percentage(2.995);
        assert_eq!(DiscountRate::from_percentage(3.0).capped_at(cap), cap);
        assert_eq!(DiscountRate::from_percentage(2.0).capped_at(cap).percentage(), 2.0);
    }

    #[test]
    fn test_new_team_item_builds_active_item() {
        let now = Utc::now();
        let item = NewTeamItem {
            title: "  Organic baby wipes (12 pack)  ".to_string(),
            description: Some("   ".to_string()),
            pricing: sample_pricing(),
        }
        .into_team_item("id-1".to_string(), now)
        .unwrap();

        assert_eq!(item.title, "Organic baby wipes (12 pack)");
        assert_eq!(item.description, None);
        assert!(item.is_active);
        assert_eq!(item.created_at, now);
        assert!(item.ensure_joinable().is_ok());
    }

    #[test]
    fn test_new_team_item_rejects_floor_above_base() {
        let mut pricing = sample_pricing();
        pricing.min_price = Money::from_units(12000);
        let result = NewTeamItem {
            title: "Stroller".to_string(),
            description: None,
            pricing,
        }
        .into_team_item("id-2".to_string(), Utc::now());

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_inactive_item_is_not_joinable() {
        let mut item = NewTeamItem {
            title: "Car seat".to_string(),
            description: None,
            pricing: sample_pricing(),
        }
        .into_team_item("id-3".to_string(), Utc::now())
        .unwrap();
        item.is_active = false;

        assert!(matches!(
            item.ensure_joinable(),
            Err(CoreError::TeamItemClosed(id)) if id == "id-3"
        ));
    }

    #[test]
    fn test_team_item_json_is_flat_camel_case() {
        let item = NewTeamItem {
            title: "Bottle set".to_string(),
            description: None,
            pricing: sample_pricing(),
        }
        .into_team_item("id-4".to_string(), Utc::now())
        .unwrap();

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["basePrice"], 10000);
        assert_eq!(json["minPrice"], 7000);
        assert_eq!(json["discountStepEvery"], 10);
        assert_eq!(json["isActive"], true);
        assert!(json.get("pricing").is_none());
    }
}
