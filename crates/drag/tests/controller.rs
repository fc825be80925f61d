use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mealweek_drag::{
    DragController, DragOutcome, DropTarget, MealCard, Notify, PlanTransport, TransportError,
    WeekBoard,
};
use mealweek_plan::{Day, MealType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Swap(String, String),
    Move(String, u8),
    Fetch,
}

/// Scripted wire: records every request, optionally rejects mutations or the
/// reload, and serves a fixed authoritative board.
#[derive(Default)]
struct ScriptedTransport {
    calls: Mutex<Vec<Call>>,
    fail_mutation: Option<TransportError>,
    fail_fetch: Option<TransportError>,
    server_board: WeekBoard,
}

impl ScriptedTransport {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanTransport for ScriptedTransport {
    async fn swap_meals(&self, meal1_id: &str, meal2_id: &str) -> Result<(), TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Swap(meal1_id.to_owned(), meal2_id.to_owned()));
        match &self.fail_mutation {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn move_meal(&self, meal_id: &str, target_position: u8) -> Result<(), TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Move(meal_id.to_owned(), target_position));
        match &self.fail_mutation {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn fetch_board(&self) -> Result<WeekBoard, TransportError> {
        self.calls.lock().unwrap().push(Call::Fetch);
        match &self.fail_fetch {
            Some(err) => Err(err.clone()),
            None => Ok(self.server_board.clone()),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl Notify for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

fn client_board() -> WeekBoard {
    WeekBoard::empty()
        .with_card(0, MealCard::new("5", "https://recipes.example/5"))
        .with_card(7, MealCard::new("9", "https://recipes.example/9"))
}

// goes through the string tags, the way the drag library reads them off
// the container element
fn drop_on(day: Day, meal: MealType) -> DropTarget {
    DropTarget::from_tokens(&day.to_string(), &meal.to_string()).unwrap()
}

fn card_ids(controller: &DragController<Arc<ScriptedTransport>, Arc<RecordingNotifier>>) -> Vec<Option<String>> {
    controller
        .rendered()
        .into_iter()
        .map(|container| container.cards.first().map(|card| card.id.clone()))
        .collect()
}

fn setup(
    transport: ScriptedTransport,
) -> (
    DragController<Arc<ScriptedTransport>, Arc<RecordingNotifier>>,
    Arc<ScriptedTransport>,
    Arc<RecordingNotifier>,
) {
    let transport = Arc::new(transport);
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = DragController::new(client_board(), transport.clone(), notifier.clone());
    (controller, transport, notifier)
}

#[tokio::test]
async fn drop_on_occupied_container_swaps_and_reloads() {
    // the server's post-swap truth
    let server_board = WeekBoard::empty()
        .with_card(0, MealCard::new("9", "https://recipes.example/9"))
        .with_card(7, MealCard::new("5", "https://recipes.example/5"));
    let (mut controller, transport, notifier) = setup(ScriptedTransport {
        server_board,
        ..Default::default()
    });

    assert!(controller.drag_started("5"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Thursday, MealType::Dinner))
        .await;

    assert_eq!(outcome, DragOutcome::Committed);
    assert_eq!(
        transport.calls(),
        vec![Call::Swap("5".into(), "9".into()), Call::Fetch]
    );

    let ids = card_ids(&controller);
    assert_eq!(ids[0].as_deref(), Some("9"));
    assert_eq!(ids[7].as_deref(), Some("5"));
    assert!(notifier.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn drop_on_empty_container_issues_move_with_computed_position() {
    let server_board = WeekBoard::empty()
        .with_card(8, MealCard::new("5", "https://recipes.example/5"))
        .with_card(7, MealCard::new("9", "https://recipes.example/9"));
    let (mut controller, transport, _notifier) = setup(ScriptedTransport {
        server_board,
        ..Default::default()
    });

    assert!(controller.drag_started("5"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Friday, MealType::Lunch))
        .await;

    assert_eq!(outcome, DragOutcome::Committed);
    assert_eq!(
        transport.calls(),
        vec![Call::Move("5".into(), 8), Call::Fetch]
    );

    let ids = card_ids(&controller);
    assert_eq!(ids[0], None);
    assert_eq!(ids[8].as_deref(), Some("5"));
}

#[tokio::test]
async fn drop_back_on_origin_is_cancelled_without_request() {
    let (mut controller, transport, notifier) = setup(ScriptedTransport::default());

    assert!(controller.drag_started("5"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Monday, MealType::Lunch))
        .await;

    assert_eq!(outcome, DragOutcome::Cancelled);
    assert!(transport.calls().is_empty());
    assert!(notifier.messages.lock().unwrap().is_empty());
    assert_eq!(card_ids(&controller)[0].as_deref(), Some("5"));
}

#[tokio::test]
async fn failed_swap_restores_exact_pre_drag_order_and_notifies() {
    let (mut controller, transport, notifier) = setup(ScriptedTransport {
        fail_mutation: Some(TransportError::Rejected(
            "Meal with ID 9 not found".to_owned(),
        )),
        ..Default::default()
    });
    let before = card_ids(&controller);

    assert!(controller.drag_started("5"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Thursday, MealType::Dinner))
        .await;

    assert_eq!(outcome, DragOutcome::Reverted);
    assert_eq!(card_ids(&controller), before);
    // no corrective reload: the server never applied the change
    assert_eq!(transport.calls(), vec![Call::Swap("5".into(), "9".into())]);

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Meal with ID 9 not found"));
}

#[tokio::test]
async fn network_failure_reverts_like_a_rejection() {
    let (mut controller, _transport, notifier) = setup(ScriptedTransport {
        fail_mutation: Some(TransportError::Network("connection reset".to_owned())),
        ..Default::default()
    });
    let before = card_ids(&controller);

    assert!(controller.drag_started("9"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Sunday, MealType::Dinner))
        .await;

    assert_eq!(outcome, DragOutcome::Reverted);
    assert_eq!(card_ids(&controller), before);
    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn reload_failure_keeps_confirmed_order_locally() {
    let (mut controller, _transport, notifier) = setup(ScriptedTransport {
        fail_fetch: Some(TransportError::Status(500)),
        ..Default::default()
    });

    assert!(controller.drag_started("5"));
    let outcome = controller
        .drag_dropped(drop_on(Day::Thursday, MealType::Dinner))
        .await;

    assert_eq!(outcome, DragOutcome::Committed);
    let ids = card_ids(&controller);
    assert_eq!(ids[0].as_deref(), Some("9"));
    assert_eq!(ids[7].as_deref(), Some("5"));
    // a failed reload after a confirmed operation is not a failure banner
    assert!(notifier.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn only_one_drag_at_a_time() {
    let (mut controller, transport, _notifier) = setup(ScriptedTransport::default());

    assert!(controller.drag_started("5"));
    assert!(!controller.drag_started("9"));

    let outcome = controller
        .drag_dropped(drop_on(Day::Friday, MealType::Lunch))
        .await;
    assert_eq!(outcome, DragOutcome::Committed);
    assert_eq!(
        transport.calls(),
        vec![Call::Move("5".into(), 8), Call::Fetch]
    );
}

#[tokio::test]
async fn drop_without_active_drag_is_cancelled() {
    let (mut controller, transport, _notifier) = setup(ScriptedTransport::default());

    let outcome = controller
        .drag_dropped(drop_on(Day::Friday, MealType::Lunch))
        .await;

    assert_eq!(outcome, DragOutcome::Cancelled);
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn drag_start_on_unknown_card_is_refused() {
    let (mut controller, transport, _notifier) = setup(ScriptedTransport::default());

    assert!(!controller.drag_started("missing"));
    assert!(transport.calls().is_empty());
}

#[test]
fn drop_target_rejects_malformed_container_tags() {
    let target = DropTarget::from_tokens("Friday", "Lunch").unwrap();
    assert_eq!(target, DropTarget { day: Day::Friday, meal: MealType::Lunch });

    assert!(DropTarget::from_tokens("Funday", "Lunch").is_err());
    assert!(DropTarget::from_tokens("Friday", "Brunch").is_err());
}
