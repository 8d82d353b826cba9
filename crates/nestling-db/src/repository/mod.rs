//! # Repository Module
//!
//! Database repository implementations for the group-buy service.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.participations().count_for_item(&id)                       │
//! │       ▼                                                                 │
//! │  ParticipationRepository / TeamItemRepository                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Pricing math never happens here: repositories return stored values    │
//! │  and counts, nestling-core turns them into prices.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`TeamItemRepository`](team_item::TeamItemRepository) - Item CRUD and catalog listing
//! - [`ParticipationRepository`](participation::ParticipationRepository) - Joins, leaves, counts

pub mod participation;
pub mod team_item;
