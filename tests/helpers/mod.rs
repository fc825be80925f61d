use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mealweek::routes::{AppState, router};
use mealweek_plan::{MealEntry, PlanService, SLOT_COUNT};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use temp_dir::TempDir;
use tower::ServiceExt;

/// Real meals with ids 5 (Monday Lunch) and 9 (Thursday Dinner); every other
/// slot holds a placeholder, p8 at Friday Lunch included.
pub fn demo_week() -> Vec<MealEntry> {
    (0..SLOT_COUNT)
        .map(|position| match position {
            0 => MealEntry::new("5", "https://recipes.example/5", 0),
            7 => MealEntry::new("9", "https://recipes.example/9", 7),
            _ => MealEntry::placeholder(format!("p{position}"), position),
        })
        .collect()
}

/// Router over a fresh database seeded with [`demo_week`].
pub async fn test_router(dir: &TempDir) -> anyhow::Result<Router> {
    let options = SqliteConnectOptions::new()
        .filename(dir.child("db.sqlite3"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    mealweek_plan::migrate(&pool).await?;

    let config = mealweek::Config::default();
    let plan = PlanService::new(pool.clone());
    plan.seed_week(&config.plan.scope, demo_week()).await?;

    Ok(router(AppState { config, plan, pool }))
}

pub async fn get_json(app: &Router, path: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty())?)
        .await?;

    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&bytes)?))
}

pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;

    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&bytes)?))
}

/// Entry id found at `position` in a /weekly response, if any.
pub fn entry_id_at(weekly: &serde_json::Value, position: u8) -> Option<String> {
    weekly["days"]
        .as_array()?
        .iter()
        .flat_map(|day| day["meals"].as_array().into_iter().flatten())
        .find(|section| section["position"] == position)?["entry"]["id"]
        .as_str()
        .map(str::to_owned)
}
