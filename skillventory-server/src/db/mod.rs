//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool injected through router state, no global handle
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, open_database};
pub use repos::*;
