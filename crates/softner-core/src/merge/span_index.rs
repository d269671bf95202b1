//! # Span Index
//!
//! Per-sentence lookup of labeled character ranges across every annotation
//! document of one story. Sources are kept in priority order: all hard
//! documents first, then all soft documents, each group in the order it was
//! supplied.

use crate::types::{AnnotationDocument, AnnotationSpan, SourceKind};

/// One annotation document with its place in the priority order.
#[derive(Debug, Clone)]
pub struct IndexedSource {
    /// Which layer the document belongs to.
    pub kind: SourceKind,
    /// 1-based position among sources of the same kind.
    pub ordinal: usize,
    /// The document itself.
    pub document: AnnotationDocument,
}

/// A stored span that overlaps a queried range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanMatch<'a> {
    /// Position of the matching source in priority order.
    pub source_index: usize,
    pub kind: SourceKind,
    pub ordinal: usize,
    pub span: &'a AnnotationSpan,
}

/// Lookup structure over the hard and soft documents of one story.
#[derive(Debug, Clone, Default)]
pub struct SpanIndex {
    sources: Vec<IndexedSource>,
    hard_count: usize,
    soft_count: usize,
}

impl SpanIndex {
    /// Builds an index, placing every hard document ahead of every soft one.
    pub fn new(hard: Vec<AnnotationDocument>, soft: Vec<AnnotationDocument>) -> Self {
        let hard_count = hard.len();
        let soft_count = soft.len();

        let tagged = |kind: SourceKind, documents: Vec<AnnotationDocument>| {
            documents
                .into_iter()
                .enumerate()
                .map(move |(i, document)| IndexedSource {
                    kind,
                    ordinal: i + 1,
                    document,
                })
        };

        let sources = tagged(SourceKind::Hard, hard)
            .chain(tagged(SourceKind::Soft, soft))
            .collect();

        Self {
            sources,
            hard_count,
            soft_count,
        }
    }

    /// All sources, in priority order.
    pub fn sources(&self) -> &[IndexedSource] {
        &self.sources
    }

    /// Sources of one kind, in supplied order.
    pub fn sources_of(&self, kind: SourceKind) -> impl Iterator<Item = &IndexedSource> {
        self.sources.iter().filter(move |source| source.kind == kind)
    }

    /// Number of documents supplied for a kind.
    pub fn source_count(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::Hard => self.hard_count,
            SourceKind::Soft => self.soft_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Lazily yields every span overlapping `[start, end)` in `sentence_id`.
    ///
    /// Matches come in priority order, and within a source in stored order,
    /// so the first item is the authoritative one. Overlap is half-open:
    /// partial overlaps count, touching ranges do not.
    pub fn matches(
        &self,
        sentence_id: usize,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = SpanMatch<'_>> {
        self.sources
            .iter()
            .enumerate()
            .flat_map(move |(source_index, source)| {
                source
                    .document
                    .spans(sentence_id)
                    .iter()
                    .filter(move |span| span.overlaps(start, end))
                    .map(move |span| SpanMatch {
                        source_index,
                        kind: source.kind,
                        ordinal: source.ordinal,
                        span,
                    })
            })
    }

    /// Collects every match for `[start, end)` in `sentence_id`.
    pub fn lookup(&self, sentence_id: usize, start: usize, end: usize) -> Vec<SpanMatch<'_>> {
        self.matches(sentence_id, start, end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(sentence: &str, spans: &[(usize, usize, &str)]) -> AnnotationDocument {
        let mut document = AnnotationDocument::new(vec![sentence.to_string()]);
        for &(start, end, label) in spans {
            document
                .add_span(0, AnnotationSpan::new(start, end, label))
                .unwrap();
        }
        document
    }

    const SENTENCE: &str = "They met at the Lagos market";

    #[test]
    fn hard_sources_come_first() {
        let index = SpanIndex::new(
            vec![doc(SENTENCE, &[(16, 21, "GPE")])],
            vec![doc(SENTENCE, &[(16, 28, "Communal/Public")])],
        );

        let found = index.lookup(0, 16, 21);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, SourceKind::Hard);
        assert_eq!(found[0].source_index, 0);
        assert_eq!(found[1].kind, SourceKind::Soft);
        assert_eq!(found[1].span.label, "Communal/Public");
    }

    #[test]
    fn soft_supplied_first_still_ranks_after_hard() {
        let index = SpanIndex::new(vec![doc(SENTENCE, &[])], vec![doc(SENTENCE, &[])]);
        let kinds: Vec<_> = index.sources().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SourceKind::Hard, SourceKind::Soft]);
    }

    #[test]
    fn ordinals_count_within_kind() {
        let index = SpanIndex::new(
            vec![doc(SENTENCE, &[]), doc(SENTENCE, &[])],
            vec![doc(SENTENCE, &[])],
        );
        let ordinals: Vec<_> = index.sources().iter().map(|s| (s.kind, s.ordinal)).collect();
        assert_eq!(
            ordinals,
            [
                (SourceKind::Hard, 1),
                (SourceKind::Hard, 2),
                (SourceKind::Soft, 1)
            ]
        );
        assert_eq!(index.source_count(SourceKind::Hard), 2);
        assert_eq!(index.source_count(SourceKind::Soft), 1);
        assert_eq!(index.sources_of(SourceKind::Hard).count(), 2);
    }

    #[test]
    fn partial_overlap_matches() {
        let index = SpanIndex::new(vec![doc(SENTENCE, &[(14, 18, "FAC")])], vec![]);
        // "the" is [12, 15), "Lagos" is [16, 21)
        assert_eq!(index.lookup(0, 12, 15).len(), 1);
        assert_eq!(index.lookup(0, 16, 21).len(), 1);
    }

    #[test]
    fn touching_ranges_do_not_match() {
        let index = SpanIndex::new(vec![doc(SENTENCE, &[(16, 21, "GPE")])], vec![]);
        assert!(index.lookup(0, 12, 16).is_empty());
        assert!(index.lookup(0, 21, 28).is_empty());
    }

    #[test]
    fn stored_order_is_preserved_within_a_source() {
        let index = SpanIndex::new(
            vec![doc(SENTENCE, &[(16, 28, "FAC"), (16, 21, "GPE")])],
            vec![],
        );
        let labels: Vec<_> = index.matches(0, 16, 21).map(|m| m.span.label.as_str()).collect();
        assert_eq!(labels, ["FAC", "GPE"]);
    }

    #[test]
    fn unknown_sentence_yields_nothing() {
        let index = SpanIndex::new(vec![doc(SENTENCE, &[(16, 21, "GPE")])], vec![]);
        assert!(index.lookup(7, 16, 21).is_empty());
    }

    #[test]
    fn empty_index() {
        let index = SpanIndex::new(vec![], vec![]);
        assert!(index.is_empty());
        assert!(index.lookup(0, 0, 4).is_empty());
    }
}
