use crate::reflow::reflow;
use crate::session::{EditSession, SessionPhase};
use crate::store::{StoreError, describe_store_error};
use crate::types::Cue;

/// A save that has been applied locally and still has to be persisted.
///
/// Tagged with the job it belongs to and the job generation at the time of
/// the save, so a completion that arrives after a job switch can be told
/// apart from a current one.
#[derive(Debug, Clone)]
pub struct PendingSave {
    job_id: String,
    generation: u64,
    index: usize,
    cues: Vec<Cue>,
}

impl PendingSave {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The full cue list to persist, edit included.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

/// Marks a load of the active job's cues before the source is awaited.
///
/// A load is only applied if no job switch and no save happened since its
/// ticket was taken, and it was not started while a save was in flight.
/// Otherwise the loaded cues may predate the local edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    job_id: String,
    generation: u64,
    revision: u64,
    during_save: bool,
}

impl LoadTicket {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Persisting failed. The local edit is kept.
    Failed(String),
    /// The job changed while the save was in flight, so its result was dropped.
    Discarded,
}

/// Everything a view needs to render the editing state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct DocumentSnapshot {
    pub job_id: Option<String>,
    pub cues: Vec<Cue>,
    pub phase: SessionPhase,
    pub draft_text: String,
    pub is_saving: bool,
    pub last_error: Option<String>,
}

/// The authoritative cue list of the active job plus its edit session.
///
/// All transitions are synchronous and read the current fields, so whatever
/// drives this from an event loop gets the values as of the call, never values
/// captured when an edit began. Persistence happens outside: [`Self::save_edit`]
/// hands out a [`PendingSave`] and [`Self::finish_save`] takes the result back.
#[derive(Debug, Default)]
pub struct TranscriptDocument {
    job_id: Option<String>,
    generation: u64,
    revision: u64,
    cues: Vec<Cue>,
    session: EditSession,
}

impl TranscriptDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Switch to `job_id`. Cues are dropped and the session is reset, even if
    /// a save is in flight. Returns `false` if `job_id` is already active.
    pub fn set_active_job(&mut self, job_id: impl Into<String>) -> bool {
        let job_id = job_id.into();
        if self.job_id.as_deref() == Some(job_id.as_str()) {
            return false;
        }

        tracing::debug!(
            from = ?self.job_id,
            to = %job_id,
            was_saving = self.session.is_saving(),
            "job_switched"
        );

        self.job_id = Some(job_id);
        self.generation += 1;
        self.cues.clear();
        self.session.reset();
        true
    }

    /// Ticket for loading the active job's cues, or `None` with no active job.
    pub fn start_load(&self) -> Option<LoadTicket> {
        Some(LoadTicket {
            job_id: self.job_id.clone()?,
            generation: self.generation,
            revision: self.revision,
            during_save: self.session.is_saving(),
        })
    }

    /// Install cues from a load started with [`Self::start_load`], either the
    /// first load or a background refresh.
    ///
    /// An open edit survives a refresh; its save will reflow against the
    /// refreshed cue.
    pub fn apply_loaded(&mut self, ticket: &LoadTicket, cues: Vec<Cue>) -> bool {
        if ticket.generation != self.generation
            || self.job_id.as_deref() != Some(ticket.job_id.as_str())
        {
            tracing::debug!(job_id = %ticket.job_id, active = ?self.job_id, "stale_load_dropped");
            return false;
        }

        if ticket.revision != self.revision || ticket.during_save {
            tracing::debug!(job_id = %ticket.job_id, "load_overtaken_by_save");
            return false;
        }

        self.cues = cues;
        true
    }

    pub fn can_edit(&self, index: usize) -> bool {
        self.session.can_edit(index)
    }

    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(cue) = self.cues.get(index) else {
            return false;
        };

        let started = self.session.begin_edit(index, &cue.text);
        if started {
            tracing::debug!(index, "edit_started");
        }
        started
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        self.session.update_draft(text)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
    }

    /// Reflow the edited cue from the current draft and apply it right away.
    ///
    /// Returns `None` when nothing is being edited, or when a refresh removed
    /// the edited cue (the edit is then cancelled).
    pub fn save_edit(&mut self) -> Option<PendingSave> {
        let index = self.session.editing_index()?;
        let job_id = self.job_id.clone()?;

        if index >= self.cues.len() {
            tracing::warn!(index, cues = self.cues.len(), "edited_cue_vanished");
            self.session.cancel_edit();
            return None;
        }

        let (index, draft) = self.session.start_save()?;
        self.revision += 1;
        let updated = reflow(&self.cues[index], &draft);
        self.cues[index] = updated;

        tracing::debug!(
            job_id = %job_id,
            index,
            words = self.cues[index].words.as_ref().map_or(0, Vec::len),
            "save_started"
        );

        Some(PendingSave {
            job_id,
            generation: self.generation,
            index,
            cues: self.cues.clone(),
        })
    }

    /// Settle a save started by [`Self::save_edit`].
    pub fn finish_save(
        &mut self,
        pending: &PendingSave,
        result: Result<(), StoreError>,
    ) -> SaveOutcome {
        if pending.generation != self.generation
            || self.job_id.as_deref() != Some(pending.job_id.as_str())
        {
            tracing::debug!(job_id = %pending.job_id, "stale_save_completion_discarded");
            return SaveOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                self.session.finish_save(None);
                tracing::debug!(job_id = %pending.job_id, index = pending.index, "save_completed");
                SaveOutcome::Saved
            }
            Err(error) => {
                let message = describe_store_error(&error);
                tracing::warn!(job_id = %pending.job_id, error = %message, "save_failed");
                self.session.finish_save(Some(message.clone()));
                SaveOutcome::Failed(message)
            }
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            job_id: self.job_id.clone(),
            cues: self.cues.clone(),
            phase: self.session.phase(),
            draft_text: self.session.draft_text().to_string(),
            is_saving: self.session.is_saving(),
            last_error: self.session.last_error().map(str::to_string),
        }
    }
}
