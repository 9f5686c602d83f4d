pub mod display;
pub mod document;
pub mod editor;
pub mod reflow;
pub mod session;
pub mod source;
pub mod store;
pub mod types;

pub use display::{DisplayConstraints, Resegmenter, Unsegmented, active_cue_index};
pub use document::{DocumentSnapshot, LoadTicket, PendingSave, SaveOutcome, TranscriptDocument};
pub use editor::CueEditor;
pub use reflow::{normalize_text, reflow, tokenize};
pub use session::{EditSession, SessionPhase};
pub use source::{CueSource, SourceError, load_or_empty};
pub use store::{BoxFuture, CueStore, SAVE_FAILED_FALLBACK, StoreError, describe_store_error};
pub use types::{Cue, Word};
