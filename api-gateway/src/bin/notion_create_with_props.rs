//! Notion Create With Props Lambda - create a row and apply a property map.
//!
//! Same body as `notion_create` plus a `props` object; after creating the
//! row each entry is applied one at a time. Property names are not checked
//! against the collection schema; a bad name fails the invocation with the
//! store's schema error.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde_json::json;
use shared::http::{dispatch_error_response, json_response, ApiResponse};
use shared::{dispatch, parse_body, Config, CreateRequest, NotionClient, Operation};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state
struct AppState {
    config: Config,
    client: NotionClient,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        Ok(Self {
            config: Config::from_env(),
            client: NotionClient::from_env().await?,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    info!("Notion create-with-props request: {} {}", event.method(), event.uri().path());

    let mut request: CreateRequest = parse_body!(event.body());
    request.operation = Some(Operation::AddRowWithProps);

    match dispatch::handle(&state.client, &state.config, request).await {
        Ok(row) => json_response(
            200,
            &ApiResponse::success(json!({
                "message": "Content created",
                "rowId": row.id,
            })),
        ),
        Err(e) => dispatch_error_response(e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
