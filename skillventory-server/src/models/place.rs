//! Places with greater interest
//!
//! Schema-only: the table is created by migrations but no route reads
//! or writes it yet.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A company or organisation worth tracking against the skill set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PlaceWithGreaterInterest {
    pub place_id: i64,
    pub place_name: String,
    pub website_link: String,
    pub job_postings_link: Option<String>,
    pub linkedin_link: Option<String>,
}
