use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mealweek_plan::PlanError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The wire envelope for every mutation response: `{"status": "success"}` or
/// `{"status": "error", "message": ...}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success",
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            AppError::Plan(err) => match err {
                PlanError::NotFound(_) | PlanError::SlotNotFound(_) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                PlanError::Occupied(_) | PlanError::Conflict => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                PlanError::SelfSwap
                | PlanError::OutOfRange(_)
                | PlanError::InvalidDay(_)
                | PlanError::InvalidMealType(_)
                | PlanError::InvalidPlan(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
                PlanError::Database(e) => {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An unexpected error occurred. Please try again later.".to_string(),
                    )
                }
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status_code, Json(StatusResponse::error(message))).into_response()
    }
}
