//! AWS Secrets Manager integration.

use aws_sdk_secretsmanager::Client as SecretsClient;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::{Error, Result};

/// Cached secrets with lazy initialization. Warm Lambda invocations reuse the
/// cached value instead of calling Secrets Manager again.
static SECRETS_CACHE: OnceLock<RwLock<HashMap<String, String>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<HashMap<String, String>> {
    SECRETS_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Get a secret value from Secrets Manager with caching.
pub async fn get_secret(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    {
        let cache = get_cache().read().await;
        if let Some(value) = cache.get(secret_arn) {
            return Ok(value.clone());
        }
    }

    let response = client
        .get_secret_value()
        .secret_id(secret_arn)
        .send()
        .await
        .map_err(|e| Error::Aws(format!("Failed to get secret: {e}")))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| Error::Aws("Secret has no string value".to_string()))?
        .to_string();

    let mut cache = get_cache().write().await;
    cache.insert(secret_arn.to_string(), secret_string.clone());

    Ok(secret_string)
}

/// Fetch the Notion integration token.
///
/// The secret is stored either as a plain string or as a JSON object with a
/// `token` field; both forms are accepted.
pub async fn get_notion_token(client: &SecretsClient, secret_arn: &str) -> Result<String> {
    let raw = get_secret(client, secret_arn).await?;

    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&raw) {
        if let Some(token) = parsed.get("token").and_then(|value| value.as_str()) {
            return Ok(token.to_string());
        }
    }

    Ok(raw)
}
