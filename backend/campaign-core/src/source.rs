use crate::campaign::Campaign;
use crate::error::{CampaignError, CampaignResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Where a refresh pulls campaigns from.
#[async_trait]
pub trait CampaignSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch(&self) -> CampaignResult<Vec<Campaign>>;
}

/// Reads the whole campaign list from a JSON array on disk. Stands in for
/// contract reads until those exist.
#[derive(Debug, Clone)]
pub struct MockFileSource {
    path: PathBuf,
}

impl MockFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CampaignSource for MockFileSource {
    fn name(&self) -> &str {
        "mock-file"
    }

    async fn fetch(&self) -> CampaignResult<Vec<Campaign>> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| CampaignError::io(&self.path, e))?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| CampaignError::parse(&self.path, e))?;
        match value {
            Value::Array(items) => Ok(items.into_iter().map(Campaign::new).collect()),
            _ => Err(CampaignError::NotAList),
        }
    }
}
