use mealweek_plan::position_of;

use crate::WeekBoard;
use crate::controller::DropTarget;

/// The single server operation a completed drag resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOp {
    Swap {
        partner_id: String,
        partner_position: u8,
    },
    Move {
        target_position: u8,
    },
}

/// Partner resolution for a completed drag.
///
/// One authoritative rule: a drop back into the origin container is a
/// cancelled gesture; a drop into a container occupied by another card swaps
/// with that card; a drop into a genuinely empty container moves to the
/// position computed from the container's (day, meal) tags. `None` means no
/// request is issued at all.
pub fn resolve_drop(
    board: &WeekBoard,
    dragged_id: &str,
    origin: u8,
    target: &DropTarget,
) -> Option<PlanOp> {
    let target_position = position_of(target.day, target.meal);

    if target_position == origin {
        return None;
    }

    match board.card_at(target_position) {
        Some(card) if card.id == dragged_id => None,
        Some(card) => Some(PlanOp::Swap {
            partner_id: card.id.clone(),
            partner_position: target_position,
        }),
        None => Some(PlanOp::Move { target_position }),
    }
}
