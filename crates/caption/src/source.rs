use crate::store::BoxFuture;
use crate::types::Cue;

pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resolves a job's transcript into its initial cue list.
pub trait CueSource: Send + Sync {
    fn load<'a>(&'a self, job_id: &'a str) -> BoxFuture<'a, Result<Vec<Cue>, SourceError>>;
}

/// Load `job_id`, treating any failure as "no transcript".
///
/// The editing view degrades to an empty list instead of failing outright.
pub async fn load_or_empty(source: &dyn CueSource, job_id: &str) -> Vec<Cue> {
    match source.load(job_id).await {
        Ok(cues) => cues,
        Err(error) => {
            tracing::warn!(job_id = %job_id, error = %error, "transcript_load_failed");
            Vec::new()
        }
    }
}
