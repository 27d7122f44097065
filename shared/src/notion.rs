//! Notion workspace client.
//!
//! The core logic only talks to the store through the narrow
//! [`WorkspaceClient`] trait, so the resolver and linker can be tested
//! against an in-memory double. [`NotionClient`] is the production
//! implementation against the Notion REST API.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::models::{DateRange, PeriodRow, RowHandle};
use crate::secrets;
use crate::{Error, Result};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// A value written to a row property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A date property holding an inclusive range
    Date(DateRange),
    /// A single-id relation to another row
    Relation(String),
    /// Caller-supplied value, passed through with minimal coercion and no
    /// schema validation; a mismatch surfaces as a schema error from the store
    Raw(Value),
}

/// Narrow capability interface over the external workspace store.
#[async_trait]
pub trait WorkspaceClient: Send + Sync {
    /// Create a row in the collection and set its title.
    async fn create_row(&self, collection_id: &str, title: &str) -> Result<RowHandle>;

    /// Append a paragraph block with `content` as a child of the row.
    async fn add_child_text_block(&self, row_id: &str, content: &str) -> Result<()>;

    /// Set a single named property on an existing row.
    async fn set_property(&self, row_id: &str, name: &str, value: PropertyValue) -> Result<()>;

    /// Read back every row of a collection.
    async fn get_rows(&self, collection_id: &str) -> Result<Vec<PeriodRow>>;
}

/// Notion REST API client.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    token: String,
}

/// One page of a database query response.
#[derive(Debug, Deserialize)]
struct QueryPage {
    results: Vec<Value>,
    has_more: bool,
    next_cursor: Option<String>,
}

/// Error body returned by the Notion API.
#[derive(Debug, Deserialize)]
struct NotionApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    /// Build a client with the integration token from Secrets Manager
    /// (`NOTION_TOKEN_SECRET_ARN`) or, failing that, the `NOTION_TOKEN`
    /// environment variable.
    pub async fn from_env() -> Result<Self> {
        let token = match std::env::var("NOTION_TOKEN_SECRET_ARN") {
            Ok(secret_arn) => {
                let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
                let client = aws_sdk_secretsmanager::Client::new(&aws_config);
                secrets::get_notion_token(&client, &secret_arn).await?
            }
            Err(_) => std::env::var("NOTION_TOKEN").map_err(|_| {
                Error::Config(
                    "neither NOTION_TOKEN_SECRET_ARN nor NOTION_TOKEN is set".to_string(),
                )
            })?,
        };

        Ok(Self::new(token))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{NOTION_API_BASE}{path}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .patch(format!("{NOTION_API_BASE}{path}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let api_error: NotionApiError = response.json().await.unwrap_or(NotionApiError {
            code: "unknown".to_string(),
            message: format!("HTTP {status}"),
        });

        Err(match status.as_u16() {
            400 => Error::Schema(format!("{}: {}", api_error.code, api_error.message)),
            404 => Error::NotFound(api_error.message),
            _ => Error::Workspace(format!("{status}: {}", api_error.message)),
        })
    }
}

#[async_trait]
impl WorkspaceClient for NotionClient {
    async fn create_row(&self, collection_id: &str, title: &str) -> Result<RowHandle> {
        let body = json!({
            "parent": { "database_id": collection_id },
            "properties": {
                "Name": { "title": [{ "text": { "content": title } }] }
            }
        });

        let page = self.post("/pages", &body).await?;
        let id = page["id"]
            .as_str()
            .ok_or_else(|| Error::Workspace("created page has no id".to_string()))?
            .to_string();
        debug!(row_id = %id, title, "created row");

        Ok(RowHandle { id })
    }

    async fn add_child_text_block(&self, row_id: &str, content: &str) -> Result<()> {
        let body = json!({
            "children": [{
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [{ "type": "text", "text": { "content": content } }]
                }
            }]
        });

        self.patch(&format!("/blocks/{row_id}/children"), &body)
            .await?;
        Ok(())
    }

    async fn set_property(&self, row_id: &str, name: &str, value: PropertyValue) -> Result<()> {
        let body = json!({ "properties": { name: property_json(value) } });
        self.patch(&format!("/pages/{row_id}"), &body).await?;
        Ok(())
    }

    async fn get_rows(&self, collection_id: &str) -> Result<Vec<PeriodRow>> {
        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = match &cursor {
                Some(cursor) => json!({ "start_cursor": cursor }),
                None => json!({}),
            };
            let page: QueryPage = serde_json::from_value(
                self.post(&format!("/databases/{collection_id}/query"), &body)
                    .await?,
            )?;

            rows.extend(page.results.iter().map(parse_period_row));

            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(rows)
    }
}

/// Translate a property value into the Notion property payload.
///
/// Raw scalars get the obvious coercion; objects and arrays are assumed to
/// already be property payloads and pass through untouched.
fn property_json(value: PropertyValue) -> Value {
    match value {
        PropertyValue::Date(range) => json!({
            "date": {
                "start": range.start.format("%Y-%m-%d").to_string(),
                "end": range.end.format("%Y-%m-%d").to_string(),
            }
        }),
        PropertyValue::Relation(id) => json!({ "relation": [{ "id": id }] }),
        PropertyValue::Raw(Value::String(text)) => {
            json!({ "rich_text": [{ "text": { "content": text } }] })
        }
        PropertyValue::Raw(Value::Number(number)) => json!({ "number": number }),
        PropertyValue::Raw(Value::Bool(flag)) => json!({ "checkbox": flag }),
        PropertyValue::Raw(other) => other,
    }
}

/// Extract the fields the resolver needs from a raw page object.
fn parse_period_row(page: &Value) -> PeriodRow {
    let id = page["id"].as_str().unwrap_or_default().to_string();
    let properties = page["properties"].as_object();

    let mut title = String::new();
    let mut date_range = None;
    let mut automatic_date = None;

    for value in properties.into_iter().flat_map(|map| map.values()) {
        match value["type"].as_str() {
            Some("title") => {
                if let Some(text) = value["title"][0]["plain_text"].as_str() {
                    title = text.to_string();
                }
            }
            Some("date") => {
                if date_range.is_none() {
                    date_range = parse_date_range(&value["date"]);
                }
            }
            Some("created_time") => {
                automatic_date = value["created_time"].as_str().and_then(parse_date);
            }
            _ => {}
        }
    }

    PeriodRow {
        id,
        title,
        date_range,
        automatic_date,
    }
}

fn parse_date_range(value: &Value) -> Option<DateRange> {
    let start = parse_date(value["start"].as_str()?)?;
    let end = value["end"].as_str().and_then(parse_date).unwrap_or(start);
    Some(DateRange::new(start, end))
}

/// Parse the date part of a Notion date string, which is either a plain
/// `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}
