use serde::{Deserialize, Serialize};

/// Label given to tokens that no annotation covers.
pub const OUTSIDE_LABEL: &str = "O";

/// One sentence after merging: its whitespace tokens and one label per token.
///
/// `sentence_id` is the sentence's position within its own story and restarts
/// at zero for every story in a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAnnotation {
    /// 0-based index of the sentence within its story.
    pub sentence_id: usize,

    /// The sentence text the tokens were cut from.
    pub sentence: String,

    /// Token texts, in order.
    pub tokens: Vec<String>,

    /// Resolved label per token (`"O"`, `"Hard-GPE"`, `"Soft2-Private"`, ...).
    pub labels: Vec<String>,

    /// Character range `[start, end)` of each token in `sentence`.
    pub char_spans: Vec<(usize, usize)>,
}

impl CombinedAnnotation {
    /// Returns `true` if tokens, labels and spans all have the same length.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.tokens.len() == self.labels.len() && self.tokens.len() == self.char_spans.len()
    }

    /// Number of tokens in the sentence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over `(token, label)` pairs.
    pub fn labeled_tokens(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .zip(&self.labels)
            .map(|(token, label)| (token.as_str(), label.as_str()))
    }
}
