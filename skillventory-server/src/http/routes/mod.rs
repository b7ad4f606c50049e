//! Route handlers organized by resource

pub mod root;
pub mod health;
pub mod skills;
pub mod table;
