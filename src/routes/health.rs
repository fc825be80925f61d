use axum::extract::State;
use axum::http::StatusCode;

use crate::routes::AppState;

pub async fn health() -> &'static str {
    "OK"
}

/// Readiness probe: verifies the database answers.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "READY"),
        Err(e) => {
            tracing::error!("Readiness check failed: {:?}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }
}
