mod campaign;
mod error;
mod source;
mod store;

pub use campaign::{Campaign, CampaignId};
pub use error::{CampaignError, CampaignResult};
pub use source::{CampaignSource, MockFileSource};
pub use store::{CampaignStore, FileCampaignStore, RefreshReport, LIST_FILE};

use tracing::info;

/// Runs one refresh tick: pull every campaign from `source` and replace the
/// snapshot held by `store`.
pub async fn refresh<S, T>(source: &S, store: &T) -> CampaignResult<RefreshReport>
where
    S: CampaignSource + ?Sized,
    T: CampaignStore + ?Sized,
{
    info!("pulling fresh data from {}", source.name());
    let campaigns = source.fetch().await?;
    let report = store.write_snapshot(&campaigns).await?;
    info!(
        "new data added: {} campaign files, {} skipped",
        report.written, report.skipped
    );
    Ok(report)
}
