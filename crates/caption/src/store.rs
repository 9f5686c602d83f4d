use std::future::Future;
use std::pin::Pin;

use crate::types::Cue;

pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Shown when a persistence failure carries no message of its own.
pub const SAVE_FAILED_FALLBACK: &str = "Failed to save transcript changes.";

/// Durable storage for a job's authoritative cue list.
///
/// The store only acknowledges or rejects a write; it never hands back
/// modified cues. The editor has already applied the edit locally by the time
/// `save` is called, so a rejection surfaces as a message rather than a
/// rollback.
///
/// # Object safety
///
/// The explicit `BoxFuture` return type keeps the trait usable as
/// `Arc<dyn CueStore>`.
pub trait CueStore: Send + Sync {
    fn save<'a>(
        &'a self,
        job_id: &'a str,
        cues: &'a [Cue],
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Human-readable form of a store failure.
pub fn describe_store_error(error: &StoreError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        SAVE_FAILED_FALLBACK.to_string()
    } else {
        message
    }
}
