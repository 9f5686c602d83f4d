use hypr_caption::{BoxFuture, Cue, CueSource, CueStore, SourceError, StoreError};
use hypr_storage::TranscriptVault;

/// Backs the editor's store and source with the on-disk vault.
#[derive(Debug, Clone)]
pub struct VaultRuntime {
    vault: TranscriptVault,
}

impl VaultRuntime {
    pub fn new(vault: TranscriptVault) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> &TranscriptVault {
        &self.vault
    }
}

impl CueStore for VaultRuntime {
    fn save<'a>(
        &'a self,
        job_id: &'a str,
        cues: &'a [Cue],
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            tracing::debug!(job_id = %job_id, cues = cues.len(), "writing_transcript");
            self.vault
                .write(job_id, &cues)
                .await
                .map_err(StoreError::from)
        })
    }
}

impl CueSource for VaultRuntime {
    fn load<'a>(&'a self, job_id: &'a str) -> BoxFuture<'a, Result<Vec<Cue>, SourceError>> {
        Box::pin(async move {
            let cues: Option<Vec<Cue>> = self.vault.read(job_id).await?;
            Ok::<_, SourceError>(cues.unwrap_or_default())
        })
    }
}
