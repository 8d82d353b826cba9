//! # nestling-db: Database Layer for Nestling Group Buys
//!
//! SQLite storage for team items and their participants, using sqlx for
//! async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Nestling Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (GET /api/team-items/{id}/price)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   nestling-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ TeamItemRepo   │    │ 001_initial  │  │   │
//! │  │   │  SqlitePool   │    │ Participation  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  nestling-core::compute_discounted_price(count, &item.pricing)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (team items, participations)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nestling_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/nestling.db")).await?;
//!
//! let item = db.team_items().get_by_id(&id).await?;
//! let participants = db.participations().count_for_item(&id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::participation::ParticipationRepository;
pub use repository::team_item::{generate_team_item_id, TeamItemRepository};
