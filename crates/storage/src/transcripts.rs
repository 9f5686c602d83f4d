use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;
use crate::fs::{atomic_write_async, read_optional};

pub const TRANSCRIPTS_DIR: &str = "transcripts";

const MAX_JOB_ID_LEN: usize = 128;

#[derive(Serialize)]
struct TranscriptFileRef<'a, T> {
    job_id: &'a str,
    cues: &'a T,
}

#[derive(serde::Deserialize)]
struct TranscriptFile<T> {
    job_id: String,
    cues: T,
}

/// One JSON file per job under `<base>/transcripts/`.
///
/// The cue type is left to the caller so this crate stays independent of
/// the caption model.
#[derive(Debug, Clone)]
pub struct TranscriptVault {
    base: PathBuf,
}

impl TranscriptVault {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn transcript_path(&self, job_id: &str) -> Result<PathBuf, Error> {
        validate_job_id(job_id)?;
        Ok(self
            .base
            .join(TRANSCRIPTS_DIR)
            .join(format!("{job_id}.json")))
    }

    pub async fn write<T: Serialize>(&self, job_id: &str, cues: &T) -> Result<(), Error> {
        let path = self.transcript_path(job_id)?;
        let content = serde_json::to_string_pretty(&TranscriptFileRef { job_id, cues })?;
        atomic_write_async(&path, &content).await?;
        Ok(())
    }

    /// Read a job's cues. `Ok(None)` means the job has no transcript yet.
    pub async fn read<T: DeserializeOwned>(&self, job_id: &str) -> Result<Option<T>, Error> {
        let path = self.transcript_path(job_id)?;
        let Some(content) = read_optional(&path).await? else {
            return Ok(None);
        };

        let file: TranscriptFile<T> = serde_json::from_str(&content)?;
        if file.job_id != job_id {
            return Err(Error::JobMismatch {
                expected: job_id.to_string(),
                found: file.job_id,
            });
        }
        Ok(Some(file.cues))
    }

    /// Job ids with a stored transcript, sorted.
    pub async fn list_jobs(&self) -> Result<Vec<String>, Error> {
        let dir = self.base.join(TRANSCRIPTS_DIR);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut jobs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_job_id(stem).is_ok()
            {
                jobs.push(stem.to_string());
            }
        }

        jobs.sort();
        Ok(jobs)
    }
}

/// Job ids become file names, so only a conservative character set is allowed.
pub fn validate_job_id(job_id: &str) -> Result<(), Error> {
    let valid = !job_id.is_empty()
        && job_id.len() <= MAX_JOB_ID_LEN
        && !job_id.starts_with('.')
        && job_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidJobId(job_id.to_string()))
    }
}
