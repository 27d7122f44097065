//! Request dispatch for the API-gateway endpoints.
//!
//! The operation selector is a closed enum rather than a name-to-method
//! lookup, so untrusted input can only reach the handlers listed here.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateRequest, RowHandle};
use crate::notion::{PropertyValue, WorkspaceClient};
use crate::rows::DAY_PROPERTY;
use crate::{auth, periods, Config, Error, Result};

/// Supported row-creation operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a row, optionally with a text block child
    #[default]
    AddRow,
    /// Create a row and link it to today's Day row when one exists
    AddRowForToday,
    /// Create a row and apply the caller-supplied property map
    AddRowWithProps,
}

/// Validate and execute a create request.
///
/// The secret is checked before anything else; a mismatch aborts the request
/// without touching the store. Lookup and store errors from the selected
/// operation propagate untouched.
pub async fn handle(
    client: &impl WorkspaceClient,
    config: &Config,
    request: CreateRequest,
) -> Result<RowHandle> {
    auth::verify_secret(config, &request.secret)?;
    request
        .validate()
        .map_err(|e| Error::Validation(e.to_string()))?;
    let page_id = normalize_page_id(&request.page_id)?;

    let operation = request.operation.unwrap_or_default();
    info!(?operation, %page_id, title = %request.title, "dispatching create request");

    match operation {
        Operation::AddRow => add_row(client, &page_id, &request).await,
        Operation::AddRowForToday => add_row_for_today(client, config, &page_id, &request).await,
        Operation::AddRowWithProps => add_row_with_props(client, &page_id, &request).await,
    }
}

/// Create the row and, when content is present and non-empty, attach it as a
/// child text block.
async fn add_row(
    client: &impl WorkspaceClient,
    page_id: &str,
    request: &CreateRequest,
) -> Result<RowHandle> {
    let row = client.create_row(page_id, &request.title).await?;

    if let Some(content) = request.content.as_deref().filter(|c| !c.is_empty()) {
        client.add_child_text_block(&row.id, content).await?;
    }

    Ok(row)
}

/// Create the row, then point its Day relation at today's Day row.
///
/// A missing Day row is not an error: the link is simply omitted.
async fn add_row_for_today(
    client: &impl WorkspaceClient,
    config: &Config,
    page_id: &str,
    request: &CreateRequest,
) -> Result<RowHandle> {
    let row = add_row(client, page_id, request).await?;

    let today = Utc::now().date_naive();
    let days = client.get_rows(&config.day_page).await?;
    match periods::find_day(&days, today) {
        Ok(day) => {
            client
                .set_property(&row.id, DAY_PROPERTY, PropertyValue::Relation(day.id.clone()))
                .await?;
        }
        Err(Error::NotFound(_)) => {
            warn!(%today, row_id = %row.id, "no day row for today, link omitted");
        }
        Err(e) => return Err(e),
    }

    Ok(row)
}

/// Create the row, then apply each caller-supplied property one at a time.
///
/// Property names are not validated against the collection schema; an
/// invalid name fails mid-application with a schema error from the store and
/// earlier writes stay in place.
async fn add_row_with_props(
    client: &impl WorkspaceClient,
    page_id: &str,
    request: &CreateRequest,
) -> Result<RowHandle> {
    let row = add_row(client, page_id, request).await?;

    if let Some(props) = &request.props {
        for (name, value) in props {
            client
                .set_property(&row.id, name, PropertyValue::Raw(value.clone()))
                .await?;
        }
    }

    Ok(row)
}

/// Accept a page id in dashed or compact UUID form and normalize it to the
/// dashed form the store expects.
fn normalize_page_id(raw: &str) -> Result<String> {
    Uuid::parse_str(raw)
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| Error::Validation(format!("invalid page id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockWorkspace;
    use serde_json::json;
    use std::collections::HashMap;

    const PAGE_ID: &str = "3e79a1f6-7b2a-4cde-9e6f-0a12b3c4d5e6";

    fn config() -> Config {
        Config {
            api_secret: "s3cret".to_string(),
            day_page: "days".to_string(),
            ..Config::default()
        }
    }

    fn request(secret: &str) -> CreateRequest {
        CreateRequest {
            secret: secret.to_string(),
            page_id: PAGE_ID.to_string(),
            title: "Groceries".to_string(),
            content: None,
            operation: None,
            props: None,
        }
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected_before_any_call() {
        let workspace = MockWorkspace::new();

        let err = handle(&workspace, &config(), request("guess"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Unauthorized(_)));
        assert!(workspace.created().is_empty());
    }

    #[tokio::test]
    async fn test_add_row_creates_row_with_content_block() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.content = Some("buy milk".to_string());

        let row = handle(&workspace, &config(), req).await.unwrap();

        assert_eq!(
            workspace.created(),
            vec![(PAGE_ID.to_string(), "Groceries".to_string())]
        );
        assert_eq!(
            workspace.text_blocks(),
            vec![(row.id, "buy milk".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_content_adds_no_block() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.content = Some(String::new());

        handle(&workspace, &config(), req).await.unwrap();

        assert!(workspace.text_blocks().is_empty());
    }

    #[tokio::test]
    async fn test_compact_page_id_is_normalized() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.page_id = "3e79a1f67b2a4cde9e6f0a12b3c4d5e6".to_string();

        handle(&workspace, &config(), req).await.unwrap();

        assert_eq!(workspace.created()[0].0, PAGE_ID);
    }

    #[tokio::test]
    async fn test_garbage_page_id_fails_validation() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.page_id = "not-a-page".to_string();

        let err = handle(&workspace, &config(), req).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(workspace.created().is_empty());
    }

    #[tokio::test]
    async fn test_add_row_for_today_links_day_row() {
        let workspace = MockWorkspace::new();
        let today = Utc::now().date_naive();
        workspace.seed_rows(
            "days",
            vec![crate::models::PeriodRow {
                id: "today".to_string(),
                title: today.format("%d.%m.%Y").to_string(),
                date_range: None,
                automatic_date: Some(today),
            }],
        );
        let mut req = request("s3cret");
        req.operation = Some(Operation::AddRowForToday);

        let row = handle(&workspace, &config(), req).await.unwrap();

        assert_eq!(
            workspace.properties_of(&row.id),
            vec![(
                DAY_PROPERTY.to_string(),
                PropertyValue::Relation("today".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_add_row_for_today_omits_missing_day_link() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.operation = Some(Operation::AddRowForToday);

        let row = handle(&workspace, &config(), req).await.unwrap();

        // the row exists, just without the link
        assert_eq!(workspace.created().len(), 1);
        assert!(workspace.properties_of(&row.id).is_empty());
    }

    #[tokio::test]
    async fn test_add_row_with_props_sets_exactly_given_props() {
        let workspace = MockWorkspace::new();
        let mut req = request("s3cret");
        req.operation = Some(Operation::AddRowWithProps);
        req.props = Some(HashMap::from([("status".to_string(), json!("done"))]));

        let row = handle(&workspace, &config(), req).await.unwrap();

        assert_eq!(
            workspace.properties_of(&row.id),
            vec![(
                "status".to_string(),
                PropertyValue::Raw(json!("done"))
            )]
        );
    }
}
