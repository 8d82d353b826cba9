//! # nestling-core: Pure Business Logic for Nestling Group-Buys
//!
//! This crate holds the group-buy pricing engine and the domain types around
//! it, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Nestling Group-Buy Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web client (polls for updates)                 │   │
//! │  │      Catalog ──► Item detail (progress bar) ──► Join button     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    GET /price, GET /progress, POST /participants, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ nestling-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │   types   │  │ validation│  │   │
//! │  │   │ discount  │  │   Money   │  │ TeamItem  │  │  pricing  │  │   │
//! │  │   │ progress  │  │ rounding  │  │ Particip. │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 nestling-db (Database Layer)                    │   │
//! │  │        team items, participation records, migrations            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Group discount pricing engine and progress projection
//! - [`money`] - Integer money with exact discount rounding
//! - [`types`] - Domain types (TeamItem, Participation, DiscountRate)
//! - [`error`] - Domain error types
//! - [`validation`] - Write-time configuration checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same participants + parameters = same price
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: prices are whole units, rounded once per evaluation
//! 4. **Coerce on read, reject on write**: the engine never fails; saves do
//!
//! ## Example Usage
//!
//! ```rust
//! use nestling_core::money::Money;
//! use nestling_core::pricing::{compute_pricing_progress, PricingParameters};
//!
//! let params = PricingParameters {
//!     base_price: Money::from_units(10000),
//!     min_price: Money::from_units(7000),
//!     discount_step_every: 10,
//!     discount_step_percent: 1.0,
//!     max_discount_percent: 30.0,
//! };
//!
//! let progress = compute_pricing_progress(250, &params);
//! assert_eq!(progress.price.current_price.units(), 7500);
//! assert_eq!(progress.price.discount_percent, 25.0);
//! assert_eq!(progress.to_next_step, 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{
    compute_discounted_price, compute_pricing_progress, price_snapshot, PriceSnapshot,
    PricingParameters, ProgressSnapshot,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a team item title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of an external user identifier, in bytes.
pub const MAX_USER_ID_LENGTH: usize = 128;

/// Upper bound on catalog page sizes.
///
/// ## Business Reason
/// Every listed item is priced against its live participant count, so
/// pages stay bounded.
pub const MAX_LIST_LIMIT: u32 = 100;
