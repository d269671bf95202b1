//! # Annotation Combiner
//!
//! Merges the hard and soft documents of ONE story into per-sentence token
//! labels. Stories must each get their own combiner: sentence ids are only
//! meaningful within a story, so mixing documents of different stories would
//! check spans of one story against sentences of another. Use
//! [`Corpus`](crate::merge::Corpus) to concatenate several stories.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::merge::config::{CombinerConfig, StorySources};
use crate::merge::resolver::LabelResolver;
use crate::merge::span_index::SpanIndex;
use crate::merge::tokenizer::Tokenizer;
use crate::types::{AnnotationDocument, CombinedAnnotation, SourceKind};

/// Combines one story's hard and soft annotation layers.
#[derive(Debug, Clone)]
pub struct AnnotationCombiner {
    config: CombinerConfig,
    index: SpanIndex,
    tokenizer: Tokenizer,
}

impl AnnotationCombiner {
    /// Create a combiner over already-loaded documents.
    ///
    /// The sentences of the first hard document are the base text; with no
    /// hard documents the first soft document is used instead. Every other
    /// document is assumed to annotate the same sentences, which is only
    /// checked by comparing sentence counts.
    pub fn new(
        hard: Vec<AnnotationDocument>,
        soft: Vec<AnnotationDocument>,
        config: CombinerConfig,
    ) -> Self {
        let combiner = Self {
            config,
            index: SpanIndex::new(hard, soft),
            tokenizer: Tokenizer::new(),
        };
        combiner.check_sources();
        combiner
    }

    /// Load every document from disk, then build the combiner.
    ///
    /// Fails on the first missing or malformed file, before anything is combined.
    pub fn from_paths<P: AsRef<Path>>(
        hard: &[P],
        soft: &[P],
        config: CombinerConfig,
    ) -> Result<Self> {
        let hard = load_all(hard)?;
        let soft = load_all(soft)?;
        Ok(Self::new(hard, soft, config))
    }

    /// Load the documents listed for one story.
    pub fn from_story(story: &StorySources, config: CombinerConfig) -> Result<Self> {
        Self::from_paths(&story.hard, &story.soft, config)
    }

    /// The base sentences every document is assumed to annotate.
    pub fn sentences(&self) -> &[String] {
        self.index
            .sources()
            .first()
            .map(|source| source.document.sentences())
            .unwrap_or(&[])
    }

    /// Get the combiner configuration.
    pub fn config(&self) -> &CombinerConfig {
        &self.config
    }

    /// Number of documents supplied for a kind.
    pub fn file_count(&self, kind: SourceKind) -> usize {
        self.index.source_count(kind)
    }

    /// Union of the label vocabularies declared by documents of one kind.
    pub fn declared_labels(&self, kind: SourceKind) -> BTreeSet<String> {
        self.index
            .sources_of(kind)
            .flat_map(|source| source.document.labels().iter().cloned())
            .collect()
    }

    /// Tokenize every base sentence and resolve a label for each token.
    ///
    /// Output order follows the base sentence order and `sentence_id` is the
    /// 0-based position in that order.
    pub fn combine(&self) -> Vec<CombinedAnnotation> {
        let resolver = LabelResolver::new(&self.index, self.config.label_scheme);

        self.sentences()
            .iter()
            .enumerate()
            .map(|(sentence_id, sentence)| self.combine_sentence(&resolver, sentence_id, sentence))
            .collect()
    }

    fn combine_sentence(
        &self,
        resolver: &LabelResolver<'_>,
        sentence_id: usize,
        sentence: &str,
    ) -> CombinedAnnotation {
        let tokens = self.tokenizer.tokenize(sentence);

        let mut texts = Vec::with_capacity(tokens.len());
        let mut labels = Vec::with_capacity(tokens.len());
        let mut char_spans = Vec::with_capacity(tokens.len());

        for token in tokens {
            labels.push(resolver.resolve(sentence_id, token.start, token.end));
            char_spans.push((token.start, token.end));
            texts.push(token.text);
        }

        CombinedAnnotation {
            sentence_id,
            sentence: sentence.to_string(),
            tokens: texts,
            labels,
            char_spans,
        }
    }

    fn check_sources(&self) {
        let expected = self.sentences().len();

        for source in self.index.sources().iter().skip(1) {
            let found = source.document.sentences().len();
            if found != expected {
                warn!(
                    kind = %source.kind,
                    ordinal = source.ordinal,
                    expected,
                    found,
                    "sentence count differs from the base document; unmatched sentences resolve to O"
                );
            }
        }

        for source in self.index.sources_of(SourceKind::Soft) {
            if !source.document.declares_labels() {
                warn!(
                    ordinal = source.ordinal,
                    "soft document declares no label vocabulary"
                );
            }
        }

        debug!(
            hard = self.index.source_count(SourceKind::Hard),
            soft = self.index.source_count(SourceKind::Soft),
            sentences = expected,
            "combiner ready"
        );
    }
}

fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<AnnotationDocument>> {
    paths.iter().map(AnnotationDocument::from_path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::config::LabelScheme;
    use crate::types::AnnotationSpan;

    const STORY: [&str; 3] = [
        "Maria walked to the old courthouse downtown.",
        "Her flat in Lagos was quiet.",
        "   ",
    ];

    fn sentences() -> Vec<String> {
        STORY.iter().map(|s| s.to_string()).collect()
    }

    fn hard() -> AnnotationDocument {
        AnnotationDocument::new(sentences())
            .with_span(0, AnnotationSpan::new(24, 34, "FAC"))
            .unwrap()
            .with_span(1, AnnotationSpan::new(12, 17, "GPE"))
            .unwrap()
    }

    fn soft() -> AnnotationDocument {
        AnnotationDocument::new(sentences())
            .with_labels(["Private", "Institutional"])
            .with_span(0, AnnotationSpan::new(0, 5, "Private"))
            .unwrap()
            .with_span(1, AnnotationSpan::new(4, 8, "Private"))
            .unwrap()
            // Competes with the hard GPE span on "Lagos"
            .with_span(1, AnnotationSpan::new(12, 17, "Institutional"))
            .unwrap()
    }

    #[test]
    fn test_combine_courthouse_example() {
        let combiner = AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new());
        let combined = combiner.combine();

        assert_eq!(
            combined[0].tokens,
            ["Maria", "walked", "to", "the", "old", "courthouse", "downtown."]
        );
        assert_eq!(
            combined[0].labels,
            ["Soft-Private", "O", "O", "O", "O", "Hard-FAC", "O"]
        );
    }

    #[test]
    fn test_hard_label_beats_soft_label() {
        let combined =
            AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new()).combine();
        assert_eq!(
            combined[1].labels,
            ["O", "Soft-Private", "O", "Hard-GPE", "O", "O"]
        );
    }

    #[test]
    fn test_whitespace_sentence_has_no_tokens() {
        let combined =
            AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new()).combine();
        assert_eq!(combined.len(), 3);
        assert!(combined[2].is_empty());
        assert!(combined[2].is_consistent());
    }

    #[test]
    fn test_sentence_ids_follow_base_order() {
        let combined =
            AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new()).combine();
        let ids: Vec<_> = combined.iter().map(|c| c.sentence_id).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn test_char_spans_match_retokenization() {
        let combined =
            AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new()).combine();
        let tokenizer = Tokenizer::new();

        for annotation in &combined {
            assert!(annotation.is_consistent());
            let expected: Vec<_> = tokenizer
                .tokenize(&annotation.sentence)
                .iter()
                .map(|t| (t.start, t.end))
                .collect();
            assert_eq!(annotation.char_spans, expected);
        }
    }

    #[test]
    fn test_combine_is_deterministic() {
        let combiner = AnnotationCombiner::new(vec![hard()], vec![soft()], CombinerConfig::new());
        assert_eq!(combiner.combine(), combiner.combine());
    }

    #[test]
    fn test_multiple_sources_are_indexed() {
        let combiner = AnnotationCombiner::new(
            vec![AnnotationDocument::new(sentences()), hard()],
            vec![soft()],
            CombinerConfig::new(),
        );
        let combined = combiner.combine();
        assert_eq!(combined[0].labels[5], "Hard2-FAC");
        assert_eq!(combined[0].labels[0], "Soft-Private");

        let plain = AnnotationCombiner::new(
            vec![AnnotationDocument::new(sentences()), hard()],
            vec![soft()],
            CombinerConfig::new().with_label_scheme(LabelScheme::Plain),
        );
        assert_eq!(plain.combine()[0].labels[5], "Hard-FAC");
    }

    #[test]
    fn test_no_hard_sources_uses_soft_sentences() {
        let combiner = AnnotationCombiner::new(vec![], vec![soft()], CombinerConfig::new());
        let combined = combiner.combine();
        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].labels[5], "O");
        assert_eq!(combined[1].labels[3], "Soft-Institutional");
        assert_eq!(combiner.file_count(SourceKind::Hard), 0);
    }

    #[test]
    fn test_no_soft_sources() {
        let combined = AnnotationCombiner::new(vec![hard()], vec![], CombinerConfig::new()).combine();
        assert_eq!(combined[0].labels[0], "O");
        assert_eq!(combined[0].labels[5], "Hard-FAC");
    }

    #[test]
    fn test_no_sources_at_all() {
        let combiner = AnnotationCombiner::new(vec![], vec![], CombinerConfig::new());
        assert!(combiner.sentences().is_empty());
        assert!(combiner.combine().is_empty());
    }

    #[test]
    fn test_shorter_document_falls_through_to_outside() {
        let short_soft = AnnotationDocument::new(vec![STORY[0].to_string()])
            .with_span(0, AnnotationSpan::new(0, 5, "Private"))
            .unwrap();
        let combined =
            AnnotationCombiner::new(vec![hard()], vec![short_soft], CombinerConfig::new())
                .combine();

        assert_eq!(combined.len(), 3);
        assert_eq!(combined[0].labels[0], "Soft-Private");
        assert_eq!(combined[1].labels[1], "O");
    }

    #[test]
    fn test_declared_labels_are_sorted_union() {
        let other_soft = AnnotationDocument::new(sentences()).with_labels(["Natural", "Private"]);
        let combiner =
            AnnotationCombiner::new(vec![hard()], vec![soft(), other_soft], CombinerConfig::new());

        let labels: Vec<_> = combiner.declared_labels(SourceKind::Soft).into_iter().collect();
        assert_eq!(labels, ["Institutional", "Natural", "Private"]);
        assert!(combiner.declared_labels(SourceKind::Hard).is_empty());
    }

    #[test]
    fn test_from_paths_reports_missing_input() {
        let result = AnnotationCombiner::from_paths(
            &["missing/hard.json"],
            &["missing/soft.json"],
            CombinerConfig::new(),
        );
        assert!(matches!(
            result,
            Err(crate::error::SoftNerError::InputNotFound { .. })
        ));
    }
}
