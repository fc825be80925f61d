//! Database migration and seeding utilities

use std::path::Path;

use mealweek_plan::{MealEntry, PlanService, SLOT_COUNT};

use crate::Config;
use crate::db::{create_pool, database_path};

/// Create the weekly plan schema.
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Migrating weekly plan database");

    let pool = create_pool(&config.database.url, 1).await?;
    mealweek_plan::migrate(&pool).await?;

    Ok(())
}

/// Drop the database and run migrations again.
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let path = database_path(&config.database.url);
    if Path::new(path).exists() {
        std::fs::remove_file(path)?;
        tracing::info!("Dropped database: {}", path);
    }

    migrate(config).await?;

    Ok(())
}

/// Populate the configured scope with a full grid of placeholders, the
/// lifecycle step the persistence collaborator performs in production. A
/// scope that already holds a plan is left untouched.
pub async fn seed(config: &Config) -> anyhow::Result<()> {
    let pool = create_pool(&config.database.url, 1).await?;
    mealweek_plan::migrate(&pool).await?;

    let service = PlanService::new(pool);
    let scope = &config.plan.scope;

    if !service.week(scope).await?.is_empty() {
        tracing::info!(scope = %scope, "scope already holds a plan, leaving it untouched");
        return Ok(());
    }

    let entries = (0..SLOT_COUNT)
        .map(|position| MealEntry::placeholder(ulid::Ulid::new().to_string(), position))
        .collect();
    service.seed_week(scope, entries).await?;

    tracing::info!(scope = %scope, "seeded empty weekly plan");

    Ok(())
}
