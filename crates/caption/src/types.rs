/// One time-anchored token inside a [`Cue`]. Times are in seconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Word {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Word {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One displayable caption segment.
///
/// `words` carries the per-word timing used for karaoke highlighting. It is
/// `None` when the producer never supplied word timing, or when an edit
/// cleared the cue's text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: None,
        }
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// Whether at least one word carries usable (non-blank) timing.
    pub fn has_word_timing(&self) -> bool {
        self.words
            .as_deref()
            .is_some_and(|words| words.iter().any(|w| !w.is_blank()))
    }

    /// Half-open containment: `start <= time < end`.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_omitted_from_json_when_absent() {
        let cue = Cue::new(0.0, 1.5, "hello");
        let json = serde_json::to_value(&cue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "start": 0.0, "end": 1.5, "text": "hello" })
        );
    }

    #[test]
    fn missing_words_deserialize_as_none() {
        let cue: Cue = serde_json::from_str(r#"{"start":1,"end":2,"text":"x"}"#).unwrap();
        assert!(cue.words.is_none());
    }

    #[test]
    fn blank_words_do_not_count_as_timing() {
        let cue = Cue::new(0.0, 1.0, "").with_words(vec![Word::new(0.0, 1.0, "  ")]);
        assert!(!cue.has_word_timing());

        let cue = Cue::new(0.0, 1.0, "a").with_words(vec![Word::new(0.0, 1.0, "a")]);
        assert!(cue.has_word_timing());
    }

    #[test]
    fn contains_is_half_open() {
        let cue = Cue::new(1.0, 2.0, "x");
        assert!(cue.contains(1.0));
        assert!(cue.contains(1.999));
        assert!(!cue.contains(2.0));
        assert!(!cue.contains(0.5));
    }
}
