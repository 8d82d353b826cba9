//! # Nestling API
//!
//! HTTP server for group-buy items: catalog, participation, and live pricing.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Routes                                     │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌──────────────────────────────────┐   │
//! │  │  Team items              │   │  Participants                    │   │
//! │  │                          │   │                                  │   │
//! │  │ • GET    /api/team-items │   │ • POST   .../{id}/participants   │   │
//! │  │ • POST   /api/team-items │   │ • DELETE .../participants/{uid}  │   │
//! │  │ • GET    .../{id}        │   └──────────────────────────────────┘   │
//! │  │ • PUT    .../{id}/pricing│                                          │
//! │  │ • DELETE .../{id}        │   ┌──────────────────────────────────┐   │
//! │  │ • GET    .../{id}/price  │   │  GET /health                     │   │
//! │  │ • GET    .../{id}/progress   └──────────────────────────────────┘   │
//! │  └──────────────────────────┘                                          │
//! │                                                                         │
//! │  Every price is recomputed from the live participant count on read.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `NESTLING_HTTP_PORT` - HTTP port (default: 8080)
//! - `NESTLING_BIND_HOST` - Bind interface (default: 0.0.0.0)
//! - `NESTLING_DATABASE_PATH` - SQLite file (default: ./data/nestling.db)
//! - `NESTLING_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `NESTLING_LIST_LIMIT_MAX` - Catalog page cap (default: 100)
//! - `NESTLING_LOG` - Log filter when `RUST_LOG` is unset (default: info)

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use nestling_db::Database;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Arc<Self> {
        Arc::new(AppState { db, config })
    }
}
