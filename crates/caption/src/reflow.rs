//! # Word-timing reflow
//!
//! Rebuilds a cue's word-level timing after its text was retyped. The new
//! text is tokenized on whitespace and the old words act as time anchors:
//!
//! - **same count**: tokens take over the anchors one to one.
//! - **fewer tokens**: contiguous runs of anchors are merged, one run per
//!   token. The first `old % new` runs are one anchor longer.
//! - **more tokens**: each anchor is cut into equal sub-intervals. The first
//!   `new % old` anchors get one extra cut. Tokens fill the sub-intervals left
//!   to right across all anchors.
//!
//! The first start and last end of the anchors are always carried over
//! exactly, so highlighting still covers the span the recognizer produced.
//! Reflow is total: empty text clears the timing, and a cue without anchors
//! only has its text replaced.

use std::cmp::Ordering;

use crate::types::{Cue, Word};

/// Split on any run of whitespace, dropping empty pieces.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_text(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Produce the replacement for `cue` after its text was edited to `new_text`.
///
/// The returned cue keeps `cue.start`/`cue.end`. Its `words`, when present,
/// has exactly one entry per token of the normalized text.
pub fn reflow(cue: &Cue, new_text: &str) -> Cue {
    let tokens = tokenize(new_text);
    if tokens.is_empty() {
        return Cue {
            start: cue.start,
            end: cue.end,
            text: String::new(),
            words: None,
        };
    }

    let text = tokens.join(" ");
    if !cue.has_word_timing() {
        return Cue {
            start: cue.start,
            end: cue.end,
            text,
            words: None,
        };
    }

    let anchors: Vec<&Word> = cue
        .words
        .iter()
        .flatten()
        .filter(|w| !w.is_blank())
        .collect();

    let words = match tokens.len().cmp(&anchors.len()) {
        Ordering::Equal => remap(&anchors, &tokens),
        Ordering::Less => merge(&anchors, &tokens),
        Ordering::Greater => split(&anchors, &tokens),
    };

    Cue {
        start: cue.start,
        end: cue.end,
        text,
        words: Some(words),
    }
}

fn remap(anchors: &[&Word], tokens: &[&str]) -> Vec<Word> {
    anchors
        .iter()
        .zip(tokens)
        .map(|(anchor, token)| Word::new(anchor.start, anchor.end, *token))
        .collect()
}

fn merge(anchors: &[&Word], tokens: &[&str]) -> Vec<Word> {
    let base = anchors.len() / tokens.len();
    let remainder = anchors.len() % tokens.len();
    let mut cursor = 0;

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let size = base + usize::from(i < remainder);
            let group = &anchors[cursor..cursor + size];
            cursor += size;
            Word::new(group[0].start, group[size - 1].end, *token)
        })
        .collect()
}

fn split(anchors: &[&Word], tokens: &[&str]) -> Vec<Word> {
    let base = tokens.len() / anchors.len();
    let remainder = tokens.len() % anchors.len();

    anchors
        .iter()
        .enumerate()
        .flat_map(|(i, anchor)| {
            subdivide(anchor.start, anchor.end, base + usize::from(i < remainder))
        })
        .zip(tokens)
        .map(|((start, end), token)| Word::new(start, end, *token))
        .collect()
}

/// Equal-duration cuts of one anchor. The last cut ends on the anchor's own
/// `end` rather than an accumulated value, so no drift builds up.
fn subdivide(start: f64, end: f64, segments: usize) -> impl Iterator<Item = (f64, f64)> {
    let step = (end - start) / segments as f64;

    (0..segments).map(move |j| {
        let cut_start = start + step * j as f64;
        let cut_end = if j == segments - 1 {
            end
        } else {
            start + step * (j + 1) as f64
        };
        (cut_start, cut_end)
    })
}
