//! Create Day Lambda - creates today's Day row.
//!
//! Runs once per day on an EventBridge schedule. No range and no link are
//! set; rows created later in the day link back to this row by date.
//! Running it twice on one date creates two rows, there is no dedup check.

use chrono::Utc;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use shared::{rows, Config, NotionClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct CreateDayResponse {
    row_id: String,
    title: String,
}

/// Application state
struct AppState {
    config: Config,
    client: NotionClient,
}

async fn handler(
    state: Arc<AppState>,
    _event: LambdaEvent<serde_json::Value>,
) -> Result<CreateDayResponse, Error> {
    let today = Utc::now().date_naive();
    let title = rows::day_title(today);
    info!(%today, "creating day row");

    let row = rows::create_day(&state.client, &state.config, today).await?;

    Ok(CreateDayResponse {
        row_id: row.id,
        title,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState {
        config: Config::from_env(),
        client: NotionClient::from_env().await?,
    });
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
