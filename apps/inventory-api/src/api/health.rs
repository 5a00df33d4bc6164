//! Root, readiness and liveness endpoints

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use core_config::AppInfo;
use mongodb::Client;

/// Plain-text greeting served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the Inventory Management API!";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// 200 while MongoDB answers a ping, 503 otherwise.
async fn ready(State(client): State<Client>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "mongodb",
        Box::pin(async {
            database::mongodb::ping(&client)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

/// `/`, `/health` and `/ready`, mounted at the server root.
pub fn router(app: AppInfo, client: Client) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/ready", get(ready))
        .with_state(client)
        .merge(health_router(app))
}
