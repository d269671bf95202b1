//! # Label Resolver
//!
//! Picks the single authoritative label for a token's character range. Hard
//! sources are consulted before soft ones; the first overlapping span wins and
//! nothing after it is looked at.

use crate::merge::config::LabelScheme;
use crate::merge::span_index::{SpanIndex, SpanMatch};
use crate::types::OUTSIDE_LABEL;

/// Resolves token labels against one story's span index.
#[derive(Debug, Clone, Copy)]
pub struct LabelResolver<'a> {
    index: &'a SpanIndex,
    scheme: LabelScheme,
}

impl<'a> LabelResolver<'a> {
    pub fn new(index: &'a SpanIndex, scheme: LabelScheme) -> Self {
        Self { index, scheme }
    }

    /// Label for the character range `[start, end)` of `sentence_id`.
    ///
    /// Returns `"O"` when no source covers the range.
    pub fn resolve(&self, sentence_id: usize, start: usize, end: usize) -> String {
        self.index
            .matches(sentence_id, start, end)
            .next()
            .map(|found| self.format_label(&found))
            .unwrap_or_else(|| OUTSIDE_LABEL.to_string())
    }

    /// Renders a match as `<Kind>[n]-<label>` according to the scheme.
    pub fn format_label(&self, found: &SpanMatch<'_>) -> String {
        let several = self.index.source_count(found.kind) > 1;
        match self.scheme {
            LabelScheme::Indexed if several => {
                format!("{}{}-{}", found.kind, found.ordinal, found.span.label)
            }
            _ => format!("{}-{}", found.kind, found.span.label),
        }
    }
}
