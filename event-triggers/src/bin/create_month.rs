//! Create Month Lambda - creates this month's row linked to its Year row.
//!
//! Runs on the first of the month. The Year row must already exist; a
//! missing Year row fails the invocation.

use chrono::Utc;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use shared::{rows, Config, NotionClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct CreateMonthResponse {
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
) -> Result<CreateMonthResponse, Error> {
    let today = Utc::now().date_naive();
    info!(%today, "creating month row");

    let row = rows::create_month(&state.client, &state.config, today).await?;

    Ok(CreateMonthResponse {
        row_id: row.id,
        title: rows::month_title(today),
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
