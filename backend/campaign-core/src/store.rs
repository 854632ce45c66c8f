use crate::campaign::{Campaign, CampaignId};
use crate::error::{CampaignError, CampaignResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const LIST_FILE: &str = "campaign-list.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Per-campaign files written.
    pub written: usize,
    /// Records left out of the per-campaign files for lack of a usable id.
    pub skipped: usize,
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn read_list(&self) -> CampaignResult<Value>;
    async fn read_campaign(&self, id: &CampaignId) -> CampaignResult<Value>;
    async fn write_snapshot(&self, campaigns: &[Campaign]) -> CampaignResult<RefreshReport>;
}

/// One directory holding `campaign-list.json` plus `<id>.json` per campaign.
///
/// Every file is replaced through a rename so readers never see a partial
/// write, and a snapshot write excludes readers of the same store until all
/// of its files are in place.
#[derive(Clone)]
pub struct FileCampaignStore {
    dir: PathBuf,
    snapshot: Arc<RwLock<()>>,
}

impl FileCampaignStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            snapshot: Arc::new(RwLock::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn list_path(&self) -> PathBuf {
        self.dir.join(LIST_FILE)
    }

    pub fn campaign_path(&self, id: &CampaignId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    async fn read_json(&self, path: &Path) -> CampaignResult<Value> {
        let _guard = self.snapshot.read().await;
        let bytes = fs::read(path)
            .await
            .map_err(|e| CampaignError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| CampaignError::parse(path, e))
    }

    async fn replace_file(&self, name: &str, bytes: &[u8]) -> CampaignResult<()> {
        let target = self.dir.join(name);
        let tmp = self.dir.join(format!(".{name}.tmp"));
        fs::write(&tmp, bytes)
            .await
            .map_err(|e| CampaignError::io(&tmp, e))?;
        fs::rename(&tmp, &target)
            .await
            .map_err(|e| CampaignError::io(&target, e))?;
        debug!("wrote {}", target.display());
        Ok(())
    }
}

#[async_trait]
impl CampaignStore for FileCampaignStore {
    async fn read_list(&self) -> CampaignResult<Value> {
        self.read_json(&self.list_path()).await
    }

    async fn read_campaign(&self, id: &CampaignId) -> CampaignResult<Value> {
        self.read_json(&self.campaign_path(id)).await
    }

    async fn write_snapshot(&self, campaigns: &[Campaign]) -> CampaignResult<RefreshReport> {
        let _guard = self.snapshot.write().await;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CampaignError::io(&self.dir, e))?;

        let mut report = RefreshReport::default();
        for (index, campaign) in campaigns.iter().enumerate() {
            let id = match campaign.id() {
                Ok(id) => id,
                Err(err) => {
                    warn!("skipping campaign #{index}: {err}");
                    report.skipped += 1;
                    continue;
                }
            };
            let bytes = serde_json::to_vec(campaign)?;
            self.replace_file(&id.file_name(), &bytes).await?;
            report.written += 1;
        }

        let list = serde_json::to_vec(campaigns)?;
        self.replace_file(LIST_FILE, &list).await?;
        Ok(report)
    }
}
