//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod skill;
pub mod pagination;
pub mod place;
pub mod domain;

pub use validation::ValidationError;
pub use skill::{LevelOfConfidence, NewSkill, Skill, SkillName};
pub use pagination::{Page, PageParams, Paginated, Pagination, PaginationParams, DEFAULT_LIMIT};
pub use place::PlaceWithGreaterInterest;
pub use domain::Domain;
