use async_trait::async_trait;
use thiserror::Error;

use crate::WeekBoard;

/// Any way a swap/move request can fail from the controller's point of view:
/// the transport could not complete, the server answered with a non-success
/// status, or a success status carried a rejection envelope. All three end in
/// the same place, a reverted view and a notification.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request could not reach the server: {0}")]
    Network(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("{0}")]
    Rejected(String),
}

/// Failure banner surface; auto-dismissing on the web side. The controller
/// only ever reports errors through it, never reads.
pub trait Notify {
    fn notify(&self, message: &str);
}

impl<N: Notify> Notify for std::sync::Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Wire access to the server plan. Implemented over the JSON endpoints
/// `POST /swap-meals`, `POST /move-meal` and `GET /weekly`.
#[async_trait]
pub trait PlanTransport {
    async fn swap_meals(&self, meal1_id: &str, meal2_id: &str) -> Result<(), TransportError>;

    async fn move_meal(&self, meal_id: &str, target_position: u8) -> Result<(), TransportError>;

    /// Authoritative board, fetched after a confirmed operation.
    async fn fetch_board(&self) -> Result<WeekBoard, TransportError>;
}

#[async_trait]
impl<T: PlanTransport + Send + Sync> PlanTransport for std::sync::Arc<T> {
    async fn swap_meals(&self, meal1_id: &str, meal2_id: &str) -> Result<(), TransportError> {
        (**self).swap_meals(meal1_id, meal2_id).await
    }

    async fn move_meal(&self, meal_id: &str, target_position: u8) -> Result<(), TransportError> {
        (**self).move_meal(meal_id, target_position).await
    }

    async fn fetch_board(&self) -> Result<WeekBoard, TransportError> {
        (**self).fetch_board().await
    }
}
