use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::document::{DocumentSnapshot, SaveOutcome, TranscriptDocument};
use crate::source::{CueSource, load_or_empty};
use crate::store::CueStore;

/// Shared handle to one transcript view's editing state.
///
/// Clones point at the same document, so UI callbacks, background refreshes
/// and in-flight saves all read and write the latest state through the lock
/// rather than through copies taken earlier. The lock is never held across a
/// call into the store or source.
#[derive(Clone)]
pub struct CueEditor {
    document: Arc<Mutex<TranscriptDocument>>,
    store: Arc<dyn CueStore>,
}

impl CueEditor {
    pub fn new(store: Arc<dyn CueStore>) -> Self {
        Self {
            document: Arc::new(Mutex::new(TranscriptDocument::new())),
            store,
        }
    }

    /// Make `job_id` the active job and load its cues.
    ///
    /// A failed load leaves the job open with no cues. Returns `false` if
    /// another job was opened before the load finished.
    pub async fn open_job(&self, job_id: &str, source: &dyn CueSource) -> bool {
        let ticket = {
            let mut document = self.document.lock().await;
            document.set_active_job(job_id);
            document.start_load()
        };
        let Some(ticket) = ticket else {
            return false;
        };

        let cues = load_or_empty(source, job_id).await;
        self.document.lock().await.apply_loaded(&ticket, cues)
    }

    /// Reload the active job's cues. A failed refresh keeps the current cues,
    /// and so does one overtaken by a save.
    pub async fn refresh(&self, source: &dyn CueSource) -> bool {
        let Some(ticket) = self.document.lock().await.start_load() else {
            return false;
        };

        match source.load(ticket.job_id()).await {
            Ok(cues) => self.document.lock().await.apply_loaded(&ticket, cues),
            Err(error) => {
                tracing::warn!(
                    job_id = %ticket.job_id(),
                    error = %error,
                    "transcript_refresh_failed"
                );
                false
            }
        }
    }

    pub async fn can_edit(&self, index: usize) -> bool {
        self.document.lock().await.can_edit(index)
    }

    pub async fn begin_edit(&self, index: usize) -> bool {
        self.document.lock().await.begin_edit(index)
    }

    pub async fn update_draft(&self, text: impl Into<String>) -> bool {
        self.document.lock().await.update_draft(text)
    }

    pub async fn cancel_edit(&self) {
        self.document.lock().await.cancel_edit();
    }

    /// Apply the current draft and persist it in the background.
    ///
    /// The reflowed cue is visible to every clone before this returns. The
    /// returned task resolves once the store answered; awaiting it is
    /// optional.
    pub async fn save_edit(&self) -> Option<JoinHandle<SaveOutcome>> {
        let pending = self.document.lock().await.save_edit()?;

        let document = Arc::clone(&self.document);
        let store = Arc::clone(&self.store);

        Some(tokio::spawn(async move {
            let result = store.save(pending.job_id(), pending.cues()).await;
            document.lock().await.finish_save(&pending, result)
        }))
    }

    pub async fn snapshot(&self) -> DocumentSnapshot {
        self.document.lock().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::session::SessionPhase;
    use crate::source::SourceError;
    use crate::store::{BoxFuture, StoreError};
    use crate::types::{Cue, Word};

    struct SaveCall {
        job_id: String,
        cues: Vec<Cue>,
        reply: oneshot::Sender<Result<(), StoreError>>,
    }

    /// Store whose saves stay pending until the test replies.
    struct GatedStore {
        calls: mpsc::UnboundedSender<SaveCall>,
    }

    impl CueStore for GatedStore {
        fn save<'a>(
            &'a self,
            job_id: &'a str,
            cues: &'a [Cue],
        ) -> BoxFuture<'a, Result<(), StoreError>> {
            Box::pin(async move {
                let (reply, rx) = oneshot::channel();
                self.calls
                    .send(SaveCall {
                        job_id: job_id.to_string(),
                        cues: cues.to_vec(),
                        reply,
                    })
                    .map_err(|_| StoreError::from("test harness dropped"))?;
                rx.await.map_err(|_| StoreError::from("reply dropped"))?
            })
        }
    }

    struct MapSource(HashMap<String, Vec<Cue>>);

    impl CueSource for MapSource {
        fn load<'a>(
            &'a self,
            job_id: &'a str,
        ) -> BoxFuture<'a, Result<Vec<Cue>, SourceError>> {
            let result = self
                .0
                .get(job_id)
                .cloned()
                .ok_or_else(|| SourceError::from(format!("no transcript for {job_id}")));
            Box::pin(async move { result })
        }
    }

    fn source() -> MapSource {
        MapSource(HashMap::from([
            (
                "job-1".to_string(),
                vec![
                    Cue::new(0.0, 3.0, "hello there").with_words(vec![
                        Word::new(0.0, 1.5, "hello"),
                        Word::new(1.5, 3.0, "there"),
                    ]),
                    Cue::new(3.0, 4.0, "bye").with_words(vec![Word::new(3.0, 4.0, "bye")]),
                ],
            ),
            ("job-2".to_string(), vec![Cue::new(0.0, 1.0, "second job")]),
        ]))
    }

    fn editor() -> (CueEditor, mpsc::UnboundedReceiver<SaveCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (CueEditor::new(Arc::new(GatedStore { calls: tx })), rx)
    }

    #[tokio::test]
    async fn open_job_loads_cues() {
        let (editor, _calls) = editor();
        assert!(editor.open_job("job-1", &source()).await);

        let snapshot = editor.snapshot().await;
        assert_eq!(snapshot.job_id.as_deref(), Some("job-1"));
        assert_eq!(snapshot.cues.len(), 2);
    }

    #[tokio::test]
    async fn failed_load_yields_empty_transcript() {
        let (editor, _calls) = editor();
        assert!(editor.open_job("missing", &source()).await);

        let snapshot = editor.snapshot().await;
        assert_eq!(snapshot.job_id.as_deref(), Some("missing"));
        assert!(snapshot.cues.is_empty());
        assert!(!editor.begin_edit(0).await);
    }

    #[tokio::test]
    async fn editing_one_cue_locks_the_others() {
        let (editor, _calls) = editor();
        editor.open_job("job-1", &source()).await;

        assert!(editor.begin_edit(0).await);
        assert!(!editor.can_edit(1).await);
        assert!(!editor.begin_edit(1).await);

        editor.cancel_edit().await;
        assert!(editor.can_edit(1).await);
    }

    #[tokio::test]
    async fn save_applies_optimistically_and_blocks_until_resolved() {
        let (editor, mut calls) = editor();
        editor.open_job("job-1", &source()).await;

        editor.begin_edit(0).await;
        editor.update_draft("hi").await;
        let task = editor.save_edit().await.unwrap();

        let snapshot = editor.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Saving);
        assert_eq!(snapshot.cues[0].text, "hi");
        assert_eq!(snapshot.cues[0].words, Some(vec![Word::new(0.0, 3.0, "hi")]));
        assert!(!editor.can_edit(0).await);
        assert!(!editor.can_edit(1).await);

        let call = calls.recv().await.unwrap();
        assert_eq!(call.job_id, "job-1");
        assert_eq!(call.cues, snapshot.cues);
        call.reply.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), SaveOutcome::Saved);
        assert!(editor.can_edit(1).await);
        assert_eq!(editor.snapshot().await.last_error, None);
    }

    #[tokio::test]
    async fn rejected_save_surfaces_error_and_keeps_edit() {
        let (editor, mut calls) = editor();
        editor.open_job("job-1", &source()).await;

        editor.begin_edit(1).await;
        editor.update_draft("see you later").await;
        let task = editor.save_edit().await.unwrap();

        let call = calls.recv().await.unwrap();
        call.reply.send(Err("service unavailable".into())).unwrap();

        assert_eq!(
            task.await.unwrap(),
            SaveOutcome::Failed("service unavailable".into())
        );

        let snapshot = editor.snapshot().await;
        assert_eq!(snapshot.last_error.as_deref(), Some("service unavailable"));
        assert_eq!(snapshot.cues[1].text, "see you later");
        assert_eq!(snapshot.cues[1].words.as_ref().unwrap().len(), 3);
        assert!(editor.can_edit(0).await);
    }

    #[tokio::test]
    async fn dropped_store_reply_uses_store_message() {
        let (editor, mut calls) = editor();
        editor.open_job("job-1", &source()).await;

        editor.begin_edit(0).await;
        let task = editor.save_edit().await.unwrap();
        drop(calls.recv().await.unwrap());

        assert_eq!(task.await.unwrap(), SaveOutcome::Failed("reply dropped".into()));
        assert_eq!(
            editor.snapshot().await.last_error.as_deref(),
            Some("reply dropped")
        );
    }

    #[tokio::test]
    async fn result_for_previous_job_is_discarded() {
        let (editor, mut calls) = editor();
        editor.open_job("job-1", &source()).await;

        editor.begin_edit(0).await;
        editor.update_draft("edited").await;
        let task = editor.save_edit().await.unwrap();
        let call = calls.recv().await.unwrap();

        editor.open_job("job-2", &source()).await;
        assert!(editor.can_edit(0).await);

        call.reply.send(Err("too late".into())).unwrap();
        assert_eq!(task.await.unwrap(), SaveOutcome::Discarded);

        let snapshot = editor.snapshot().await;
        assert_eq!(snapshot.job_id.as_deref(), Some("job-2"));
        assert_eq!(snapshot.last_error, None);
        assert_eq!(snapshot.cues, [Cue::new(0.0, 1.0, "second job")]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let (editor, _calls) = editor();
        let other = editor.clone();
        editor.open_job("job-1", &source()).await;

        assert!(editor.begin_edit(1).await);
        assert!(other.update_draft("typed elsewhere").await);
        assert_eq!(editor.snapshot().await.draft_text, "typed elsewhere");
    }

    #[tokio::test]
    async fn refresh_failure_keeps_cues() {
        let (editor, _calls) = editor();
        editor.open_job("job-1", &source()).await;

        assert!(!editor.refresh(&MapSource(HashMap::new())).await);
        assert_eq!(editor.snapshot().await.cues.len(), 2);
    }

    /// Source whose load reports that it started, then stays pending until
    /// the test hands it the cues.
    struct HeldSource {
        started: std::sync::Mutex<Option<oneshot::Sender<()>>>,
        cues: std::sync::Mutex<Option<oneshot::Receiver<Vec<Cue>>>>,
    }

    impl CueSource for HeldSource {
        fn load<'a>(
            &'a self,
            _job_id: &'a str,
        ) -> BoxFuture<'a, Result<Vec<Cue>, SourceError>> {
            if let Some(started) = self.started.lock().unwrap().take() {
                let _ = started.send(());
            }
            let rx = self.cues.lock().unwrap().take();
            Box::pin(async move {
                let rx = rx.ok_or_else(|| SourceError::from("already loaded"))?;
                rx.await.map_err(|_| SourceError::from("load dropped"))
            })
        }
    }

    #[tokio::test]
    async fn refresh_started_before_save_does_not_revert_it() {
        let (editor, mut calls) = editor();
        let stored = source().0["job-1"].clone();
        editor.open_job("job-1", &source()).await;

        let (started_tx, started) = oneshot::channel();
        let (release, cues_rx) = oneshot::channel();
        let held = HeldSource {
            started: std::sync::Mutex::new(Some(started_tx)),
            cues: std::sync::Mutex::new(Some(cues_rx)),
        };
        let refreshing = {
            let editor = editor.clone();
            tokio::spawn(async move { editor.refresh(&held).await })
        };
        started.await.unwrap();

        editor.begin_edit(0).await;
        editor.update_draft("hi friend").await;
        let task = editor.save_edit().await.unwrap();
        calls.recv().await.unwrap().reply.send(Ok(())).unwrap();
        assert_eq!(task.await.unwrap(), SaveOutcome::Saved);

        release.send(stored).unwrap();
        assert!(!refreshing.await.unwrap());
        assert_eq!(editor.snapshot().await.cues[0].text, "hi friend");
    }

    #[tokio::test]
    async fn refresh_after_save_is_applied() {
        let (editor, mut calls) = editor();
        editor.open_job("job-1", &source()).await;

        editor.begin_edit(1).await;
        let task = editor.save_edit().await.unwrap();
        calls.recv().await.unwrap().reply.send(Ok(())).unwrap();
        task.await.unwrap();

        assert!(editor.refresh(&source()).await);
    }

    #[tokio::test]
    async fn save_without_open_edit_spawns_nothing() {
        let (editor, _calls) = editor();
        editor.open_job("job-1", &source()).await;
        assert!(editor.save_edit().await.is_none());
    }
}
