use crate::types::Cue;

/// Layout limits a renderer passes to a [`Resegmenter`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct DisplayConstraints {
    pub max_lines: u32,
    pub font_scale: f64,
}

impl Default for DisplayConstraints {
    fn default() -> Self {
        Self {
            max_lines: 2,
            font_scale: 1.0,
        }
    }
}

/// Regroups authoritative cues into cues that fit on screen.
///
/// The output is for display only. Edits always target the authoritative
/// list, so indices from a resegmented list must never be passed to the
/// editor.
pub trait Resegmenter: Send + Sync {
    fn resegment(&self, cues: &[Cue], constraints: &DisplayConstraints) -> Vec<Cue>;
}

/// Shows the authoritative cues as they are.
pub struct Unsegmented;

impl Resegmenter for Unsegmented {
    fn resegment(&self, cues: &[Cue], _constraints: &DisplayConstraints) -> Vec<Cue> {
        cues.to_vec()
    }
}

/// Index of the cue playing at `time`, if any.
///
/// Cues are half-open, so at a shared boundary the later cue wins.
pub fn active_cue_index(cues: &[Cue], time: f64) -> Option<usize> {
    cues.iter().position(|cue| cue.contains(time))
}
