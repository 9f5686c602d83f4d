/// Coarse state of an [`EditSession`], derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", content = "index", rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Editing(usize),
    Saving,
}

/// Single-slot edit state for one open transcript.
///
/// At most one cue is edited at a time and at most one save is outstanding.
/// A session never touches the cue list itself; the owning
/// [`crate::document::TranscriptDocument`] feeds it the text it needs and
/// applies the reflowed cue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing_index: Option<usize>,
    draft_text: String,
    is_saving: bool,
    last_error: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_saving, self.editing_index) {
            (true, _) => SessionPhase::Saving,
            (false, Some(index)) => SessionPhase::Editing(index),
            (false, None) => SessionPhase::Idle,
        }
    }

    /// Whether an edit affordance may be offered for cue `index`.
    pub fn can_edit(&self, index: usize) -> bool {
        !self.is_saving && self.editing_index.is_none_or(|current| current == index)
    }

    /// Open (or re-seed) the draft for `index` with the cue's current text.
    ///
    /// Refused while a save is outstanding or another cue is being edited.
    pub fn begin_edit(&mut self, index: usize, current_text: &str) -> bool {
        if !self.can_edit(index) {
            return false;
        }

        self.last_error = None;
        self.editing_index = Some(index);
        self.draft_text = current_text.to_string();
        true
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        if self.editing_index.is_none() {
            return false;
        }

        self.draft_text = text.into();
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing_index = None;
        self.draft_text.clear();
        self.last_error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Leave `Editing` for `Saving`, handing back what was being edited.
    pub(crate) fn start_save(&mut self) -> Option<(usize, String)> {
        let index = self.editing_index.take()?;
        let draft = std::mem::take(&mut self.draft_text);

        self.last_error = None;
        self.is_saving = true;
        Some((index, draft))
    }

    pub(crate) fn finish_save(&mut self, error: Option<String>) {
        self.is_saving = false;
        self.last_error = error;
    }
}
