//! Web server implementation using Axum

use std::net::SocketAddr;

use mealweek_plan::PlanService;

use crate::Config;
use crate::routes::{AppState, router};

/// Start the web server
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(&config.database.url, config.database.max_connections).await?;
    mealweek_plan::migrate(&pool).await?;

    let state = AppState {
        config: config.clone(),
        plan: PlanService::new(pool.clone()),
        pool,
    };

    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
