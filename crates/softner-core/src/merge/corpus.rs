//! # Corpus
//!
//! Accumulates combined sentences from several stories. Each story is
//! combined on its own and appended in the order it was supplied, so
//! `sentence_id` restarts at zero for every story.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::merge::combiner::AnnotationCombiner;
use crate::merge::config::{CombinerConfig, StorySources};
use crate::output::bio::BioSentence;
use crate::output::standard::StandardDocument;
use crate::output::{OutputFormat, writer};
use crate::stats::{DatasetStats, compute_stats};
use crate::types::{CombinedAnnotation, SourceKind};

/// Concatenated output of one or more independently combined stories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    annotations: Vec<CombinedAnnotation>,
    hard_labels: BTreeSet<String>,
    soft_labels: BTreeSet<String>,
    hard_files: usize,
    soft_files: usize,
    stories: usize,
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Corpus holding a single story.
    pub fn from_combiner(combiner: &AnnotationCombiner) -> Self {
        let mut corpus = Self::new();
        corpus.append(combiner);
        corpus
    }

    /// Load every story, then combine each one independently.
    ///
    /// All documents are loaded before anything is combined, so a bad input
    /// fails the whole run up front.
    pub fn from_stories(stories: &[StorySources], config: &CombinerConfig) -> Result<Self> {
        let combiners = stories
            .iter()
            .map(|story| {
                debug!(story = %story.display_name(), "loading story");
                AnnotationCombiner::from_story(story, config.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        let mut corpus = Self::new();
        for combiner in &combiners {
            corpus.append(combiner);
        }

        info!(
            stories = corpus.stories,
            sentences = corpus.annotations.len(),
            hard_files = corpus.hard_files,
            soft_files = corpus.soft_files,
            "combined corpus"
        );
        Ok(corpus)
    }

    /// Combine one story and append its sentences after the current ones.
    pub fn append(&mut self, combiner: &AnnotationCombiner) {
        let combined = combiner.combine();
        debug!(
            story = self.stories,
            sentences = combined.len(),
            "appending story"
        );

        self.annotations.extend(combined);
        self.hard_labels
            .extend(combiner.declared_labels(SourceKind::Hard));
        self.soft_labels
            .extend(combiner.declared_labels(SourceKind::Soft));
        self.hard_files += combiner.file_count(SourceKind::Hard);
        self.soft_files += combiner.file_count(SourceKind::Soft);
        self.stories += 1;
    }

    /// Combined sentences of every story, in story order.
    pub fn annotations(&self) -> &[CombinedAnnotation] {
        &self.annotations
    }

    pub fn story_count(&self) -> usize {
        self.stories
    }

    /// Number of documents of one kind across all stories.
    pub fn file_count(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::Hard => self.hard_files,
            SourceKind::Soft => self.soft_files,
        }
    }

    /// Sorted union of the declared vocabularies of one kind.
    pub fn declared_labels(&self, kind: SourceKind) -> &BTreeSet<String> {
        match kind {
            SourceKind::Hard => &self.hard_labels,
            SourceKind::Soft => &self.soft_labels,
        }
    }

    /// Token and label counts over the whole corpus.
    pub fn statistics(&self) -> DatasetStats {
        compute_stats(&self.annotations)
    }

    /// The standard training document.
    pub fn to_standard(&self) -> StandardDocument {
        StandardDocument::from(self)
    }

    /// The BIO training document.
    pub fn to_bio(&self) -> Vec<BioSentence> {
        self.annotations.iter().map(BioSentence::from_combined).collect()
    }

    /// Serialize in the requested format and write it in one atomic step.
    pub fn save(&self, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        match format {
            OutputFormat::Standard => writer::write_json_atomic(path, &self.to_standard())?,
            OutputFormat::Bio => writer::write_json_atomic(path, &self.to_bio())?,
        }
        info!(path = %path.display(), %format, "saved combined annotations");
        Ok(())
    }
}
