//! JSON wire surface for the weekly grid: the plan snapshot consumed by the
//! client view and the two drag-and-drop mutations.

use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use mealweek_plan::{Day, MealEntry, MealType, position_of};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, StatusResponse};
use crate::routes::AppState;

/// 7 day cards x 2 meal sections. Every section carries its (day, meal_type)
/// tags and every occupant its entry id; that tagging is all the client drag
/// controller needs to resolve swap partners.
#[derive(Debug, Serialize)]
pub struct WeeklyResponse {
    pub days: Vec<DayCard>,
}

#[derive(Debug, Serialize)]
pub struct DayCard {
    pub day: Day,
    pub meals: Vec<MealSection>,
}

#[derive(Debug, Serialize)]
pub struct MealSection {
    pub meal_type: MealType,
    pub position: u8,
    pub entry: Option<SlotEntry>,
}

#[derive(Debug, Serialize)]
pub struct SlotEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    pub placeholder: bool,
}

impl From<MealEntry> for SlotEntry {
    fn from(entry: MealEntry) -> Self {
        let placeholder = entry.is_placeholder();
        Self {
            id: entry.id,
            recipe: entry.recipe,
            placeholder,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn weekly(State(state): State<AppState>) -> Result<Json<WeeklyResponse>, AppError> {
    let entries = state.plan.week(&state.config.plan.scope).await?;

    let mut by_position: HashMap<u8, MealEntry> = entries
        .into_iter()
        .map(|entry| (entry.position, entry))
        .collect();

    let days = Day::ALL
        .iter()
        .map(|&day| DayCard {
            day,
            meals: [MealType::Lunch, MealType::Dinner]
                .iter()
                .map(|&meal_type| {
                    let position = position_of(day, meal_type);
                    MealSection {
                        meal_type,
                        position,
                        entry: by_position.remove(&position).map(SlotEntry::from),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(Json(WeeklyResponse { days }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapMealsRequest {
    pub meal1_id: String,
    pub meal2_id: String,
}

#[tracing::instrument(skip(state))]
pub async fn swap_meals(
    State(state): State<AppState>,
    Json(request): Json<SwapMealsRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .plan
        .swap(&state.config.plan.scope, &request.meal1_id, &request.meal2_id)
        .await?;

    Ok(Json(StatusResponse::success()))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoveMealRequest {
    pub meal_id: String,
    pub target_position: i64,
}

#[tracing::instrument(skip(state))]
pub async fn move_meal(
    State(state): State<AppState>,
    Json(request): Json<MoveMealRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .plan
        .move_meal(
            &state.config.plan.scope,
            &request.meal_id,
            request.target_position,
        )
        .await?;

    Ok(Json(StatusResponse::success()))
}
