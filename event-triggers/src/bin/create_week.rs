//! Create Week Lambda - creates this week's row linked to its Month row.
//!
//! Must run on Monday: the week window is the invocation date plus five
//! days, not a calendar week computation. Invoked off-schedule the window is
//! semantically wrong; this is logged but not corrected.

use chrono::{Datelike, Utc, Weekday};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use shared::{rows, Config, NotionClient};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct CreateWeekResponse {
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
) -> Result<CreateWeekResponse, Error> {
    let today = Utc::now().date_naive();
    if today.weekday() != Weekday::Mon {
        warn!(%today, weekday = ?today.weekday(), "create_week invoked off its Monday schedule");
    }
    info!(%today, "creating week row");

    let row = rows::create_week(&state.client, &state.config, today).await?;

    Ok(CreateWeekResponse {
        row_id: row.id,
        title: rows::week_title(today),
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
