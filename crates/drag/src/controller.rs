use mealweek_plan::{Day, MealType};

use crate::board::{Container, WeekBoard};
use crate::resolve::{PlanOp, resolve_drop};
use crate::transport::{Notify, PlanTransport, TransportError};

/// Where a drop landed: the target container's (day, meal) tags, exactly
/// what the drag library reads off the container element. Slots hold at
/// most one card, so the container alone identifies the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub day: Day,
    pub meal: MealType,
}

impl DropTarget {
    /// Build from the raw tag strings carried by the container element.
    pub fn from_tokens(day: &str, meal: &str) -> mealweek_plan::Result<Self> {
        Ok(Self {
            day: Day::parse(day)?,
            meal: MealType::parse(meal)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging { entry_id: String, origin: u8 },
}

/// Terminal state of one gesture. A failed operation is `Reverted`, never an
/// error: the controller always settles back to `Idle` on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Committed,
    Reverted,
    Cancelled,
}

/// Client state machine for drag-and-drop rearrangement:
/// `Idle -> Dragging -> Resolving -> {Committed | Reverting} -> Idle`.
///
/// The board array is the only view state; the optimistic preview of an
/// in-flight operation is a pending exchange layered over it in
/// [`rendered`](Self::rendered), merged on confirmation and dropped on
/// failure. Reverting therefore restores the exact pre-drag order with no
/// DOM bookkeeping.
pub struct DragController<T, N> {
    board: WeekBoard,
    phase: DragPhase,
    pending: Option<(u8, u8)>,
    transport: T,
    notifier: N,
}

impl<T: PlanTransport, N: Notify> DragController<T, N> {
    pub fn new(board: WeekBoard, transport: T, notifier: N) -> Self {
        Self {
            board,
            phase: DragPhase::Idle,
            pending: None,
            transport,
            notifier,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// The 14 containers in render order, with any in-flight operation
    /// applied as a preview.
    pub fn rendered(&self) -> Vec<Container> {
        self.board.project(self.pending)
    }

    /// A pointer-drag started on the card with this id. Returns false when
    /// the gesture is refused: a drag is already active (the drag library
    /// enforces one at a time; a second start is a stray event) or the card
    /// is not on the board.
    pub fn drag_started(&mut self, entry_id: &str) -> bool {
        if !matches!(self.phase, DragPhase::Idle) {
            tracing::debug!(entry_id, "drag already active, ignoring start");
            return false;
        }

        let Some(origin) = self.board.position_of_card(entry_id) else {
            tracing::debug!(entry_id, "unknown card, ignoring drag start");
            return false;
        };

        self.phase = DragPhase::Dragging {
            entry_id: entry_id.to_owned(),
            origin,
        };

        true
    }

    /// The active gesture ended with a drop. Resolves the participants,
    /// issues at most one request and settles to `Idle`.
    #[tracing::instrument(skip(self))]
    pub async fn drag_dropped(&mut self, target: DropTarget) -> DragOutcome {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);
        let DragPhase::Dragging { entry_id, origin } = phase else {
            return DragOutcome::Cancelled;
        };

        let Some(op) = resolve_drop(&self.board, &entry_id, origin, &target) else {
            tracing::debug!(entry_id, "gesture changed nothing, no request issued");
            return DragOutcome::Cancelled;
        };

        // Resolving: optimistic preview until the server answers.
        let (call, preview) = match &op {
            PlanOp::Swap {
                partner_id,
                partner_position,
            } => (
                self.transport.swap_meals(&entry_id, partner_id),
                (origin, *partner_position),
            ),
            PlanOp::Move { target_position } => (
                self.transport.move_meal(&entry_id, *target_position),
                (origin, *target_position),
            ),
        };
        self.pending = Some(preview);

        match call.await {
            Ok(()) => {
                self.commit(preview).await;
                DragOutcome::Committed
            }
            Err(err) => {
                self.revert(&entry_id, err);
                DragOutcome::Reverted
            }
        }
    }

    /// The server applied the change; its plan is now authoritative. A full
    /// reload replaces the preview, falling back to merging the preview
    /// locally when the reload itself fails.
    async fn commit(&mut self, preview: (u8, u8)) {
        match self.transport.fetch_board().await {
            Ok(board) => self.board = board,
            Err(err) => {
                tracing::warn!(error = %err, "plan reload failed, keeping confirmed order locally");
                self.board.exchange(preview.0, preview.1);
            }
        }
        self.pending = None;
    }

    /// The server never applied the change: discard the preview and report.
    /// The board was untouched, so dropping the overlay alone restores the
    /// exact pre-drag order.
    fn revert(&mut self, entry_id: &str, err: TransportError) {
        tracing::debug!(entry_id, error = %err, "operation failed, reverting view");
        self.pending = None;
        self.notifier
            .notify(&format!("Could not rearrange meals: {err}"));
    }
}
