use crate::error::{WalletError, WalletResult};
use campaign_core::{Campaign, CampaignId};
use serde_json::{json, Value};

/// Reads campaigns from the backend's `/campaign-list` endpoints.
pub struct CampaignClient {
    http: reqwest::Client,
    base: String,
}

impl CampaignClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self) -> WalletResult<Vec<Campaign>> {
        match self.fetch("/campaign-list").await? {
            Value::Array(items) => Ok(items.into_iter().map(Campaign::new).collect()),
            other => Err(WalletError::Payload(format!("expected array, got {other}"))),
        }
    }

    /// Ids the backend would refuse are rejected before any request is sent.
    pub async fn get(&self, id: &str) -> WalletResult<Campaign> {
        let id = CampaignId::parse(id)?;
        let value = self.fetch(&format!("/campaign-list/{id}")).await?;
        if !value.is_object() {
            return Err(WalletError::Payload(format!("expected object, got {value}")));
        }
        Ok(Campaign::new(value))
    }

    async fn fetch(&self, path: &str) -> WalletResult<Value> {
        let url = format!("{}{}", self.base, path);
        let value: Value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        if let Some(code) = backend_error(&value) {
            return Err(WalletError::Backend(code));
        }
        Ok(value)
    }
}

// the backend reports read failures as `{"error": code}` with a 200
fn backend_error(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    obj.get("error").map(|code| match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Campaigns shown when no backend is reachable.
pub fn builtin_campaigns() -> Vec<Campaign> {
    vec![
        Campaign::new(json!({
            "name": "Name 1",
            "description": "Description 1",
            "goal": 200,
            "raised": 101
        })),
        Campaign::new(json!({
            "name": "Name 2",
            "description": "Description 2",
            "goal": 20,
            "raised": 1
        })),
        Campaign::new(json!({
            "name": "Name 3",
            "description": "Description 3",
            "goal": 2000,
            "raised": 51
        })),
    ]
}
