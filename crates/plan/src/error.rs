use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("meal {0} not found in the weekly plan")]
    NotFound(String),

    #[error("no entry at position {0}")]
    SlotNotFound(u8),

    #[error("a meal cannot be swapped with itself")]
    SelfSwap,

    #[error("position {0} is already occupied by a meal")]
    Occupied(u8),

    #[error("position {0} is outside the weekly grid (0-13)")]
    OutOfRange(i64),

    #[error("unrecognized day: {0}")]
    InvalidDay(String),

    #[error("unrecognized meal type: {0}")]
    InvalidMealType(String),

    #[error("the weekly plan changed while applying the update")]
    Conflict,

    #[error("invalid weekly plan: {0}")]
    InvalidPlan(String),

    #[cfg(feature = "full")]
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
