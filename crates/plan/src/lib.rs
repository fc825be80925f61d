//! Core weekly plan domain: the 7x2 slot grid, the authoritative
//! slot-to-entry store and the swap/move service that mutates it.

mod error;
mod slot;
mod types;

#[cfg(feature = "full")]
mod service;
#[cfg(feature = "full")]
mod store;

pub use error::{PlanError, Result};
pub use slot::{Day, MealType, SLOT_COUNT, position_of, slot_of};
pub use types::MealEntry;

#[cfg(feature = "full")]
pub use service::PlanService;
#[cfg(feature = "full")]
pub use store::{fetch_week, migrate};
