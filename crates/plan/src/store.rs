//! Authoritative slot-to-entry store, one row per occupant. Reads are public;
//! mutation primitives are crate-private and only reachable through
//! [`crate::PlanService`], which runs them inside a single transaction.

use sqlx::prelude::FromRow;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::{MealEntry, PlanError, Result, SLOT_COUNT};

/// Create the weekly plan schema.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_slot (
            scope TEXT NOT NULL,
            entry_id TEXT NOT NULL,
            recipe_ref TEXT,
            position INTEGER NOT NULL CHECK (position >= 0 AND position < 14),
            PRIMARY KEY (scope, entry_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_weekly_slot_position ON weekly_slot (scope, position)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[derive(FromRow)]
struct SlotRow {
    entry_id: String,
    recipe_ref: Option<String>,
    position: i64,
}

impl SlotRow {
    fn into_entry(self) -> Result<MealEntry> {
        if !(0..SLOT_COUNT as i64).contains(&self.position) {
            return Err(PlanError::OutOfRange(self.position));
        }

        Ok(MealEntry {
            id: self.entry_id,
            recipe: self.recipe_ref,
            position: self.position as u8,
        })
    }
}

/// Read-only snapshot of a scope's plan, ordered by position.
pub async fn fetch_week(pool: &SqlitePool, scope: &str) -> Result<Vec<MealEntry>> {
    let rows: Vec<SlotRow> = sqlx::query_as(
        r#"
        SELECT entry_id, recipe_ref, position
        FROM weekly_slot
        WHERE scope = ?1
        ORDER BY position
        "#,
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SlotRow::into_entry).collect()
}

pub(crate) async fn fetch_entry(
    tx: &mut Transaction<'_, Sqlite>,
    scope: &str,
    entry_id: &str,
) -> Result<MealEntry> {
    let row: Option<SlotRow> = sqlx::query_as(
        "SELECT entry_id, recipe_ref, position FROM weekly_slot WHERE scope = ?1 AND entry_id = ?2",
    )
    .bind(scope)
    .bind(entry_id)
    .fetch_optional(&mut **tx)
    .await?;

    row.ok_or_else(|| PlanError::NotFound(entry_id.to_owned()))?
        .into_entry()
}

pub(crate) async fn entry_at(
    tx: &mut Transaction<'_, Sqlite>,
    scope: &str,
    position: u8,
) -> Result<Option<MealEntry>> {
    let row: Option<SlotRow> = sqlx::query_as(
        "SELECT entry_id, recipe_ref, position FROM weekly_slot WHERE scope = ?1 AND position = ?2",
    )
    .bind(scope)
    .bind(position as i64)
    .fetch_optional(&mut **tx)
    .await?;

    row.map(SlotRow::into_entry).transpose()
}

/// Relocate one entry, guarded by its expected previous position. A concurrent
/// writer that already moved the row makes this affect zero rows, which
/// surfaces as [`PlanError::Conflict`] and aborts the whole transaction.
pub(crate) async fn shift_position(
    tx: &mut Transaction<'_, Sqlite>,
    scope: &str,
    entry_id: &str,
    expected: u8,
    target: u8,
) -> Result<()> {
    let done = sqlx::query(
        r#"
        UPDATE weekly_slot
        SET position = ?1
        WHERE scope = ?2 AND entry_id = ?3 AND position = ?4
        "#,
    )
    .bind(target as i64)
    .bind(scope)
    .bind(entry_id)
    .bind(expected as i64)
    .execute(&mut **tx)
    .await?;

    if done.rows_affected() != 1 {
        return Err(PlanError::Conflict);
    }

    Ok(())
}

pub(crate) async fn replace_week(
    tx: &mut Transaction<'_, Sqlite>,
    scope: &str,
    entries: &[MealEntry],
) -> Result<()> {
    sqlx::query("DELETE FROM weekly_slot WHERE scope = ?1")
        .bind(scope)
        .execute(&mut **tx)
        .await?;

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO weekly_slot (scope, entry_id, recipe_ref, position)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(scope)
        .bind(&entry.id)
        .bind(&entry.recipe)
        .bind(entry.position as i64)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use temp_dir::TempDir;

    use super::*;

    const SCOPE: &str = "2026-W35";

    async fn setup(dir: &TempDir) -> anyhow::Result<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(dir.child("db.sqlite3"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        migrate(&pool).await?;

        let mut tx = pool.begin().await?;
        replace_week(
            &mut tx,
            SCOPE,
            &[
                MealEntry::new("5", "https://recipes.example/5", 0),
                MealEntry::placeholder("p1", 1),
            ],
        )
        .await?;
        tx.commit().await?;

        Ok(pool)
    }

    #[tokio::test]
    async fn stale_expected_position_is_a_conflict() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let pool = setup(&dir).await?;

        // entry 5 sits at position 0; a writer that believed it was still at
        // 1 must touch nothing
        let mut tx = pool.begin().await?;
        let result = shift_position(&mut tx, SCOPE, "5", 1, 2).await;
        assert!(matches!(result, Err(PlanError::Conflict)));
        drop(tx);

        let week = fetch_week(&pool, SCOPE).await?;
        assert_eq!(week[0].id, "5");
        assert_eq!(week[0].position, 0);
        assert_eq!(week[1].position, 1);

        Ok(())
    }

    #[tokio::test]
    async fn matching_expected_position_relocates() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let pool = setup(&dir).await?;

        let mut tx = pool.begin().await?;
        shift_position(&mut tx, SCOPE, "5", 0, 2).await?;
        tx.commit().await?;

        let week = fetch_week(&pool, SCOPE).await?;
        assert_eq!(week.last().map(|e| e.id.as_str()), Some("5"));
        assert_eq!(week.last().map(|e| e.position), Some(2));

        Ok(())
    }
}
