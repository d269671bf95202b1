//! # BIO Output
//!
//! Converts resolved token labels into BIO2 tags. A label starts a new chunk
//! (`B-`) whenever it differs from the previous token's label and continues
//! it (`I-`) when it repeats. Two adjacent entities that resolve to the same
//! label therefore merge into one chunk; the resolved labels carry no span
//! identity to separate them.

use serde::{Deserialize, Serialize};

use crate::types::{CombinedAnnotation, OUTSIDE_LABEL};

/// Prefix marking the first token of a chunk.
pub const BEGIN_PREFIX: &str = "B-";
/// Prefix marking a continuation token.
pub const INSIDE_PREFIX: &str = "I-";

/// One token with its BIO tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioToken {
    pub token: String,
    pub label: String,
}

/// One sentence of the BIO training document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioSentence {
    pub sentence_id: usize,
    pub sentence: String,
    pub tokens: Vec<BioToken>,
}

impl BioSentence {
    /// Tag a combined sentence.
    pub fn from_combined(annotation: &CombinedAnnotation) -> Self {
        let tags = to_bio_labels(&annotation.labels);
        let tokens = annotation
            .tokens
            .iter()
            .zip(tags)
            .map(|(token, label)| BioToken {
                token: token.clone(),
                label,
            })
            .collect();

        Self {
            sentence_id: annotation.sentence_id,
            sentence: annotation.sentence.clone(),
            tokens,
        }
    }
}

/// Convert a sequence of resolved labels into BIO tags.
///
/// ```
/// use softner_core::output::to_bio_labels;
///
/// let tags = to_bio_labels(&["Soft-Private", "Soft-Private", "O", "Hard-GPE"]);
/// assert_eq!(tags, ["B-Soft-Private", "I-Soft-Private", "O", "B-Hard-GPE"]);
/// ```
pub fn to_bio_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut previous = OUTSIDE_LABEL;
    let mut tags = Vec::with_capacity(labels.len());

    for label in labels {
        let label = label.as_ref();
        let tag = if label == OUTSIDE_LABEL {
            OUTSIDE_LABEL.to_string()
        } else if label != previous {
            format!("{BEGIN_PREFIX}{label}")
        } else {
            format!("{INSIDE_PREFIX}{label}")
        };
        tags.push(tag);
        previous = label;
    }

    tags
}

/// Check if moving from tag `from` to tag `to` is valid BIO2.
///
/// An `I-X` tag must follow `B-X` or `I-X`.
pub fn is_valid_transition(from: &str, to: &str) -> bool {
    match to.strip_prefix(INSIDE_PREFIX) {
        Some(entity) => from
            .strip_prefix(BEGIN_PREFIX)
            .or_else(|| from.strip_prefix(INSIDE_PREFIX))
            .is_some_and(|previous| previous == entity),
        None => true,
    }
}
