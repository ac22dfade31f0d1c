//! # stockpile-db: Database Layer for Stockpile
//!
//! SQLite persistence for the restock service, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockpile Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/inventory/{id}/restock)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockpile-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ RoleRepo      │    │ 001_init.sql │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepo      │    │              │  │   │
//! │  │   │               │    │ ItemRepo      │    │              │  │   │
//! │  │   │               │    │ RestockRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (DATABASE_PATH)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockpile_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./stockpile.db")).await?;
//! stockpile_db::seed::seed_roles(&db, Utc::now()).await?;
//!
//! let outcome = db.restocks().apply(item_id, 50, Utc::now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::item::ItemRepository;
pub use repository::restock::RestockRepository;
pub use repository::role::RoleRepository;
pub use repository::user::UserRepository;
