//! Service layer.
//!
//! Handlers stay thin: they decode input, run the gates and call into
//! these services, which own the business flow.

pub mod auth_service;
pub mod bootstrap;
pub mod inventory_service;
