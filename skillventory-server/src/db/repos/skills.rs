//! Skill repository
//!
//! Handles skill CRUD with these patterns:
//! - get_by_id / get_by_name: `None` on miss
//! - create: INSERT, duplicate names rejected by the UNIQUE constraint
//! - list: window + total count read in one transaction
//! - update_if_changed: per-field writes, skipped when the value is equal

use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::models::{LevelOfConfidence, NewSkill, Page, Pagination, Skill, SkillName};

const SELECT_BY_ID: &str =
    "SELECT skill_id, skill_name, level_of_confidence FROM skill WHERE skill_id = ?";

/// Skill row as stored
#[derive(Debug, FromRow)]
struct SkillRow {
    skill_id: i64,
    skill_name: String,
    level_of_confidence: String,
}

impl TryFrom<SkillRow> for Skill {
    type Error = DbError;

    fn try_from(row: SkillRow) -> Result<Self, Self::Error> {
        let level_of_confidence = row
            .level_of_confidence
            .parse::<LevelOfConfidence>()
            .map_err(|e| DbError::Corrupt {
                table: "skill",
                reason: e.to_string(),
            })?;

        Ok(Skill {
            skill_id: row.skill_id,
            skill_name: row.skill_name,
            level_of_confidence,
        })
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("skill '{name}' already exists")]
    DuplicateName { name: String },

    #[error("corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

/// Column touched by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillField {
    Name,
    Level,
}

impl SkillField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "skill_name",
            Self::Level => "level_of_confidence",
        }
    }
}

/// Result of an update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No skill with that id; nothing written
    Absent,
    /// Every requested value matched the stored one; nothing written
    Unchanged(Skill),
    /// At least one column written
    Updated { skill: Skill, fields: Vec<SkillField> },
}

impl UpdateOutcome {
    /// Current state of the record, if it exists.
    pub fn into_skill(self) -> Option<Skill> {
        match self {
            Self::Absent => None,
            Self::Unchanged(skill) | Self::Updated { skill, .. } => Some(skill),
        }
    }

    /// Number of column writes issued.
    pub fn writes(&self) -> usize {
        match self {
            Self::Updated { fields, .. } => fields.len(),
            _ => 0,
        }
    }
}

/// Skill repository
pub struct SkillRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SkillRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Point lookup by primary key.
    pub async fn get_by_id(&self, skill_id: i64) -> Result<Option<Skill>, DbError> {
        let skill = fetch_by_id(self.pool, skill_id).await?;
        if skill.is_none() {
            debug!(skill_id, "skill not found");
        }
        Ok(skill)
    }

    /// Exact, case-sensitive lookup by name.
    pub async fn get_by_name(&self, skill_name: &str) -> Result<Option<Skill>, DbError> {
        let row: Option<SkillRow> = sqlx::query_as(
            "SELECT skill_id, skill_name, level_of_confidence FROM skill WHERE skill_name = ?",
        )
        .bind(skill_name)
        .fetch_optional(self.pool)
        .await?;

        if row.is_none() {
            debug!(skill_name, "skill not found");
        }
        row.map(Skill::try_from).transpose()
    }

    /// Insert a new skill.
    ///
    /// Fails with `DbError::DuplicateName` without writing when the name is
    /// taken. The UNIQUE constraint decides, so two concurrent creates of
    /// the same name cannot both succeed.
    pub async fn create(&self, skill: NewSkill) -> Result<Skill, DbError> {
        let result: Result<SkillRow, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO skill (skill_name, level_of_confidence)
            VALUES (?, ?)
            RETURNING skill_id, skill_name, level_of_confidence
            "#,
        )
        .bind(skill.skill_name.as_str())
        .bind(skill.level_of_confidence.as_str())
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(row) => {
                let created = Skill::try_from(row)?;
                info!(
                    skill_id = created.skill_id,
                    skill_name = %created.skill_name,
                    level = created.level_of_confidence.symbol(),
                    "skill created"
                );
                Ok(created)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(skill_name = %skill.skill_name, "skill already exists");
                Err(DbError::DuplicateName {
                    name: skill.skill_name.into_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List skills in insertion order with the total count.
    ///
    /// `total` counts every row regardless of the window.
    pub async fn list(&self, page: Pagination) -> Result<Page<Skill>, DbError> {
        let mut tx = self.pool.begin().await?;

        let rows: Vec<SkillRow> = sqlx::query_as(
            r#"
            SELECT skill_id, skill_name, level_of_confidence
            FROM skill
            ORDER BY skill_id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skill")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        let items = rows
            .into_iter()
            .map(Skill::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { items, total })
    }

    /// Delete a skill (idempotent).
    ///
    /// `None` is a no-op. Returns whether a row was removed.
    pub async fn delete(&self, skill: Option<&Skill>) -> Result<bool, DbError> {
        let Some(skill) = skill else {
            warn!("delete requested for a skill that doesn't exist");
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM skill WHERE skill_id = ?")
            .bind(skill.skill_id)
            .execute(self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(skill_id = skill.skill_id, skill_name = %skill.skill_name, "skill deleted");
        } else {
            warn!(skill_id = skill.skill_id, "skill was already deleted");
        }
        Ok(removed)
    }

    /// Resolve an id and delete it if present.
    pub async fn delete_by_id(&self, skill_id: i64) -> Result<bool, DbError> {
        let skill = self.get_by_id(skill_id).await?;
        self.delete(skill.as_ref()).await
    }

    /// Write only the fields whose value differs from the stored one.
    ///
    /// `None` keeps the current value. Runs in a single `BEGIN IMMEDIATE`
    /// transaction, so concurrent updates queue on the busy timeout instead
    /// of failing. A rename onto a taken name rolls back and returns
    /// `DbError::DuplicateName`.
    pub async fn update_if_changed(
        &self,
        skill_id: i64,
        new_name: Option<SkillName>,
        new_level: Option<LevelOfConfidence>,
    ) -> Result<UpdateOutcome, DbError> {
        // Take the write lock up front: a deferred transaction that reads
        // first cannot upgrade while another connection holds it
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let Some(current) = fetch_by_id(&mut *tx, skill_id).await? else {
            warn!(skill_id, "update requested for a skill that doesn't exist");
            return Ok(UpdateOutcome::Absent);
        };

        let mut fields = Vec::new();

        if let Some(name) = new_name.filter(|n| n.as_str() != current.skill_name) {
            sqlx::query("UPDATE skill SET skill_name = ? WHERE skill_id = ?")
                .bind(name.as_str())
                .bind(skill_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        warn!(skill_id, skill_name = %name, "rename collides with an existing skill");
                        DbError::DuplicateName {
                            name: name.to_string(),
                        }
                    } else {
                        DbError::Sqlx(e)
                    }
                })?;
            fields.push(SkillField::Name);
        }

        if let Some(level) = new_level.filter(|l| *l != current.level_of_confidence) {
            sqlx::query("UPDATE skill SET level_of_confidence = ? WHERE skill_id = ?")
                .bind(level.as_str())
                .bind(skill_id)
                .execute(&mut *tx)
                .await?;
            fields.push(SkillField::Level);
        }

        if fields.is_empty() {
            tx.rollback().await?;
            debug!(skill_id, "update left skill unchanged");
            return Ok(UpdateOutcome::Unchanged(current));
        }

        let updated = fetch_by_id(&mut *tx, skill_id)
            .await?
            .ok_or_else(|| DbError::Corrupt {
                table: "skill",
                reason: format!("skill {} vanished during update", skill_id),
            })?;
        tx.commit().await?;

        info!(
            skill_id,
            fields = ?fields.iter().map(SkillField::as_str).collect::<Vec<_>>(),
            "skill updated"
        );
        Ok(UpdateOutcome::Updated {
            skill: updated,
            fields,
        })
    }

    /// Rename a skill, leaving its level untouched.
    pub async fn update_name(
        &self,
        skill_id: i64,
        new_name: SkillName,
    ) -> Result<UpdateOutcome, DbError> {
        self.update_if_changed(skill_id, Some(new_name), None).await
    }

    /// Change a skill's level, leaving its name untouched.
    pub async fn update_level(
        &self,
        skill_id: i64,
        new_level: LevelOfConfidence,
    ) -> Result<UpdateOutcome, DbError> {
        self.update_if_changed(skill_id, None, Some(new_level)).await
    }
}

async fn fetch_by_id<'e, E>(executor: E, skill_id: i64) -> Result<Option<Skill>, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row: Option<SkillRow> = sqlx::query_as(SELECT_BY_ID)
        .bind(skill_id)
        .fetch_optional(executor)
        .await?;

    row.map(Skill::try_from).transpose()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;

    async fn test_pool() -> SqlitePool {
        open_database("sqlite::memory:")
            .await
            .expect("in-memory database")
    }

    fn new_skill(name: &str, level: LevelOfConfidence) -> NewSkill {
        NewSkill::new(SkillName::new(name).unwrap(), level)
    }

    fn python() -> NewSkill {
        new_skill("python", LevelOfConfidence::Level2)
    }

    fn typescript() -> NewSkill {
        new_skill("typescript", LevelOfConfidence::Level1)
    }

    #[tokio::test]
    async fn create_assigns_id() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);

        let skill = repo.create(python()).await.unwrap();
        assert_eq!(skill.skill_id, 1);
        assert_eq!(skill.skill_name, "python");
        assert_eq!(skill.level_of_confidence, LevelOfConfidence::Level2);
    }

    #[tokio::test]
    async fn get_by_id_and_name() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let created = repo.create(python()).await.unwrap();

        let by_id = repo.get_by_id(created.skill_id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&created));

        let by_name = repo.get_by_name("python").await.unwrap();
        assert_eq!(by_name, Some(created));
    }

    #[tokio::test]
    async fn lookups_miss_without_error() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);

        assert_eq!(repo.get_by_id(42).await.unwrap(), None);
        assert_eq!(repo.get_by_name("python").await.unwrap(), None);
    }

    #[tokio::test]
    async fn name_lookup_is_case_sensitive() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        repo.create(python()).await.unwrap();

        assert_eq!(repo.get_by_name("Python").await.unwrap(), None);
        repo.create(new_skill("Python", LevelOfConfidence::Level3))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected_without_write() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let original = repo.create(python()).await.unwrap();

        let err = repo
            .create(new_skill("python", LevelOfConfidence::Level3))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateName { ref name } if name == "python"));

        let page = repo.list(Pagination::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items, vec![original]);
    }

    #[tokio::test]
    async fn list_returns_all_distinct_skills_in_order() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);

        let empty = repo.list(Pagination::default()).await.unwrap();
        assert!(empty.items.is_empty());
        assert_eq!(empty.total, 0);

        let first = repo.create(python()).await.unwrap();
        let second = repo.create(typescript()).await.unwrap();

        let page = repo.list(Pagination::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items, vec![first, second]);
    }

    #[tokio::test]
    async fn list_paginates_with_full_total() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        for i in 0..16 {
            repo.create(new_skill(&format!("skill-{i}"), LevelOfConfidence::Level1))
                .await
                .unwrap();
        }

        let first = repo.list(Pagination::new(0, 15)).await.unwrap();
        assert_eq!(first.items.len(), 15);
        assert_eq!(first.total, 16);

        let second = repo.list(Pagination::new(15, 15)).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].skill_name, "skill-15");
        assert_eq!(second.total, 16);

        let beyond = repo.list(Pagination::new(100, 15)).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 16);
    }

    #[tokio::test]
    async fn delete_present_and_absent() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();

        assert!(repo.delete(Some(&skill)).await.unwrap());
        assert_eq!(repo.get_by_name("python").await.unwrap(), None);
        assert_eq!(repo.get_by_id(skill.skill_id).await.unwrap(), None);

        // Deleting the same record again, or nothing at all, is a no-op
        assert!(!repo.delete(Some(&skill)).await.unwrap());
        assert!(!repo.delete(None).await.unwrap());
        assert!(!repo.delete_by_id(skill.skill_id).await.unwrap());
    }

    #[tokio::test]
    async fn deleted_name_can_be_reused() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();
        assert!(repo.delete_by_id(skill.skill_id).await.unwrap());

        let again = repo.create(python()).await.unwrap();
        assert_ne!(again.skill_id, skill.skill_id);
    }

    #[tokio::test]
    async fn update_writes_changed_fields() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();

        let outcome = repo
            .update_if_changed(
                skill.skill_id,
                Some(SkillName::new("Clojure").unwrap()),
                Some(LevelOfConfidence::Level3),
            )
            .await
            .unwrap();

        assert_eq!(outcome.writes(), 2);
        let updated = outcome.into_skill().unwrap();
        assert_eq!(updated.skill_id, skill.skill_id);
        assert_eq!(updated.skill_name, "Clojure");
        assert_eq!(updated.level_of_confidence, LevelOfConfidence::Level3);
        assert_eq!(repo.get_by_id(skill.skill_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_with_identical_values_writes_nothing() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();

        let outcome = repo
            .update_if_changed(
                skill.skill_id,
                Some(SkillName::new("python").unwrap()),
                Some(LevelOfConfidence::Level2),
            )
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged(skill.clone()));
        assert_eq!(outcome.writes(), 0);

        let outcome = repo.update_if_changed(skill.skill_id, None, None).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged(skill));
    }

    #[tokio::test]
    async fn update_only_touches_differing_field() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();

        let outcome = repo
            .update_if_changed(
                skill.skill_id,
                Some(SkillName::new("python").unwrap()),
                Some(LevelOfConfidence::Level1),
            )
            .await
            .unwrap();

        match outcome {
            UpdateOutcome::Updated { skill, fields } => {
                assert_eq!(fields, vec![SkillField::Level]);
                assert_eq!(skill.skill_name, "python");
                assert_eq!(skill.level_of_confidence, LevelOfConfidence::Level1);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_absent_is_reported_noop() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);

        let outcome = repo
            .update_if_changed(7, Some(SkillName::new("rust").unwrap()), None)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Absent);
        assert_eq!(outcome.into_skill(), None);
        assert_eq!(repo.get_by_name("rust").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rename_onto_existing_name_rolls_back() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let py = repo.create(python()).await.unwrap();
        repo.create(typescript()).await.unwrap();

        let err = repo
            .update_if_changed(
                py.skill_id,
                Some(SkillName::new("typescript").unwrap()),
                Some(LevelOfConfidence::Level3),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateName { .. }));

        // Neither field was written
        assert_eq!(repo.get_by_id(py.skill_id).await.unwrap(), Some(py));
    }

    #[tokio::test]
    async fn single_field_updates() {
        let pool = test_pool().await;
        let repo = SkillRepo::new(&pool);
        let skill = repo.create(python()).await.unwrap();

        let renamed = repo
            .update_name(skill.skill_id, SkillName::new("typescript").unwrap())
            .await
            .unwrap()
            .into_skill()
            .unwrap();
        assert_eq!(renamed.skill_name, "typescript");
        assert_eq!(renamed.level_of_confidence, LevelOfConfidence::Level2);

        let releveled = repo
            .update_level(skill.skill_id, LevelOfConfidence::Level1)
            .await
            .unwrap()
            .into_skill()
            .unwrap();
        assert_eq!(releveled.skill_name, "typescript");
        assert_eq!(releveled.level_of_confidence, LevelOfConfidence::Level1);
    }

    #[tokio::test]
    async fn unknown_stored_level_is_corrupt() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO skill (skill_name, level_of_confidence) VALUES ('cobol', 'LEVEL_9')")
            .execute(&pool)
            .await
            .unwrap();

        let err = SkillRepo::new(&pool).get_by_name("cobol").await.unwrap_err();
        assert!(matches!(err, DbError::Corrupt { table: "skill", .. }));
    }
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_on_file_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}", dir.path().join("skills.db").display());
        let pool = open_database(&url).await.expect("open failed");

        let mut ids = Vec::new();
        for i in 0..10 {
            let skill = SkillRepo::new(&pool)
                .create(new_skill(&format!("skill-{i}"), LevelOfConfidence::Level1))
                .await
                .unwrap();
            ids.push(skill.skill_id);
        }

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let pool = pool.clone();
                let skill_id = ids[i % ids.len()];
                let level = LevelOfConfidence::ALL[i % 3];
                tokio::spawn(async move {
                    SkillRepo::new(&pool)
                        .update_level(skill_id, level)
                        .await
                        .map(UpdateOutcome::into_skill)
                })
            })
            .collect();

        for handle in handles {
            let skill = handle.await.expect("task panicked").expect("update failed");
            assert!(skill.is_some());
        }

        pool.close().await;
    }
}
