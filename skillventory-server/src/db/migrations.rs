//! Schema migrations
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so this runs on every
//! startup.

use sqlx::SqlitePool;

/// Create all tables and indexes
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running skillventory migrations...");

    // skill_name carries the uniqueness guarantee; inserts rely on it
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skill (
            skill_id INTEGER PRIMARY KEY AUTOINCREMENT,
            skill_name TEXT NOT NULL UNIQUE,
            level_of_confidence TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS ix_skill_level_of_confidence ON skill (level_of_confidence)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS place_with_greater_interest (
            place_id INTEGER PRIMARY KEY AUTOINCREMENT,
            place_name TEXT NOT NULL UNIQUE,
            website_link TEXT NOT NULL,
            job_postings_link TEXT,
            linkedin_link TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS domain (
            domain_id INTEGER PRIMARY KEY AUTOINCREMENT,
            domain_name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
