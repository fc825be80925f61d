use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::SqlitePool;

use crate::{MealEntry, PlanError, Result, SLOT_COUNT, store};

/// Atomic swap/move mutations over the weekly plan store.
///
/// Mutations take a per-scope writer lock for the duration of one operation,
/// then run inside a single transaction with expected-position guards, so two
/// sessions dragging overlapping slots can never interleave into a broken
/// slot bijection.
#[derive(Clone)]
pub struct PlanService {
    pool: SqlitePool,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl PlanService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn scope_lock(&self, scope: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("scope lock registry poisoned");
        locks
            .entry(scope.to_owned())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Read-only snapshot of the scope's plan, ordered by position.
    pub async fn week(&self, scope: &str) -> Result<Vec<MealEntry>> {
        store::fetch_week(&self.pool, scope).await
    }

    /// Exchange the positions of two entries. Either both move or neither
    /// does; repeating the same swap exchanges them back.
    #[tracing::instrument(skip(self))]
    pub async fn swap(&self, scope: &str, meal1_id: &str, meal2_id: &str) -> Result<()> {
        if meal1_id == meal2_id {
            return Err(PlanError::SelfSwap);
        }

        let lock = self.scope_lock(scope);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await?;
        let first = store::fetch_entry(&mut tx, scope, meal1_id).await?;
        let second = store::fetch_entry(&mut tx, scope, meal2_id).await?;

        store::shift_position(&mut tx, scope, &first.id, first.position, second.position).await?;
        store::shift_position(&mut tx, scope, &second.id, second.position, first.position).await?;
        tx.commit().await?;

        tracing::debug!(
            from = first.position,
            to = second.position,
            "swapped meal positions"
        );

        Ok(())
    }

    /// Relocate an entry into a slot currently held by a placeholder; the
    /// placeholder takes the entry's old slot. A target held by a real meal
    /// is rejected, never silently converted into a swap.
    #[tracing::instrument(skip(self))]
    pub async fn move_meal(&self, scope: &str, meal_id: &str, target_position: i64) -> Result<()> {
        if !(0..SLOT_COUNT as i64).contains(&target_position) {
            return Err(PlanError::OutOfRange(target_position));
        }
        let target = target_position as u8;

        let lock = self.scope_lock(scope);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await?;
        let entry = store::fetch_entry(&mut tx, scope, meal_id).await?;
        let occupant = store::entry_at(&mut tx, scope, target)
            .await?
            .ok_or(PlanError::SlotNotFound(target))?;

        if occupant.id == entry.id {
            return Err(PlanError::SelfSwap);
        }
        if !occupant.is_placeholder() {
            return Err(PlanError::Occupied(target));
        }

        store::shift_position(&mut tx, scope, &entry.id, entry.position, target).await?;
        store::shift_position(&mut tx, scope, &occupant.id, target, entry.position).await?;
        tx.commit().await?;

        tracing::debug!(from = entry.position, to = target, "moved meal");

        Ok(())
    }

    /// Install a complete week for a scope. This is the lifecycle hook for
    /// the persistence collaborator that owns plan creation; this core never
    /// creates or destroys entries on the swap/move path.
    #[tracing::instrument(skip(self, entries))]
    pub async fn seed_week(&self, scope: &str, entries: Vec<MealEntry>) -> Result<()> {
        if entries.len() != SLOT_COUNT as usize {
            return Err(PlanError::InvalidPlan(format!(
                "expected {SLOT_COUNT} entries, got {}",
                entries.len()
            )));
        }

        let mut seen_positions = [false; SLOT_COUNT as usize];
        let mut seen_ids = std::collections::HashSet::new();
        for entry in &entries {
            if entry.position >= SLOT_COUNT {
                return Err(PlanError::OutOfRange(entry.position as i64));
            }
            if std::mem::replace(&mut seen_positions[entry.position as usize], true) {
                return Err(PlanError::InvalidPlan(format!(
                    "position {} assigned twice",
                    entry.position
                )));
            }
            if !seen_ids.insert(entry.id.as_str()) {
                return Err(PlanError::InvalidPlan(format!(
                    "entry id {} assigned twice",
                    entry.id
                )));
            }
        }

        let lock = self.scope_lock(scope);
        let _guard = lock.lock().await;

        let mut tx = self.pool.begin().await?;
        store::replace_week(&mut tx, scope, &entries).await?;
        tx.commit().await?;

        tracing::info!(count = entries.len(), "installed weekly plan");

        Ok(())
    }
}
