use campaign_core::{refresh, CampaignSource, CampaignStore};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::warn;

/// Refreshes the store from `source` every `every`, starting immediately.
/// A failed tick is logged and the next one runs on schedule.
pub fn spawn_refresher(
    source: Arc<dyn CampaignSource>,
    store: Arc<dyn CampaignStore>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(err) = refresh(source.as_ref(), store.as_ref()).await {
                warn!("campaign refresh failed ({}): {err}", err.code());
            }
        }
    })
}
