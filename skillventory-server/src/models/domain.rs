//! Knowledge domains (schema-only, not exposed over HTTP)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Broad area a skill belongs to, e.g. "backend" or "data"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Domain {
    pub domain_id: i64,
    pub domain_name: String,
}
