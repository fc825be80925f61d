use axum::Router;
use axum::routing::{get, post};
use mealweek_plan::PlanService;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

mod health;
mod weekly;

pub use weekly::{MoveMealRequest, SwapMealsRequest};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub plan: PlanService,
    pub pool: SqlitePool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/weekly", get(weekly::weekly))
        .route("/swap-meals", post(weekly::swap_meals))
        .route("/move-meal", post(weekly::move_meal))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
