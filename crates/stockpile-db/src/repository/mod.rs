//! # Repository Module
//!
//! Database repository implementations for Stockpile.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request handler                                                        │
//! │       │                                                                 │
//! │       │  db.restocks().apply(item_id, 50, now)                          │
//! │       ▼                                                                 │
//! │  RestockRepository                                                      │
//! │  ├── count_since(&self, item_id, since)                                 │
//! │  ├── apply(&self, item_id, quantity, now)   ← one transaction          │
//! │  └── history(&self, item_id)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`RoleRepository`](role::RoleRepository) - Seeded role lookup
//! - [`UserRepository`](user::UserRepository) - Principals and credentials
//! - [`ItemRepository`](item::ItemRepository) - Inventory items
//! - [`RestockRepository`](restock::RestockRepository) - Restock log and the atomic restock unit

pub mod item;
pub mod restock;
pub mod role;
pub mod user;
