//! Client-side drag controller for the weekly meal grid.
//!
//! Turns completed drag gestures into one swap or move request against the
//! server plan, with an optimistic preview that is discarded (never
//! re-inserted) when the server rejects the change. Decoupled from any UI
//! toolkit: the drag library, transport and notification surface are all
//! injected, so the whole state machine is driven by synthetic gestures in
//! tests.

mod board;
mod controller;
mod resolve;
mod transport;

pub use board::{Container, MealCard, WeekBoard};
pub use controller::{DragController, DragOutcome, DragPhase, DropTarget};
pub use resolve::{PlanOp, resolve_drop};
pub use transport::{Notify, PlanTransport, TransportError};
