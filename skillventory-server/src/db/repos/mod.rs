//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Lookups return `Option`, a miss is not an error
//! - Handles conflicts via the unique constraint (no check-then-insert)
//! - Uses transactions for multi-step operations

pub mod skills;

pub use skills::{DbError, SkillField, SkillRepo, UpdateOutcome};
