use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CombinedAnnotation;

/// Corpus-wide token and label counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_sentences: usize,
    pub total_tokens: usize,
    /// Token count per resolved label.
    pub label_distribution: BTreeMap<String, usize>,
    /// Zero when there are no sentences.
    pub avg_tokens_per_sentence: f64,
}

/// Count sentences, tokens and labels over combined sentences.
pub fn compute_stats(annotations: &[CombinedAnnotation]) -> DatasetStats {
    let mut total_tokens = 0;
    let mut label_distribution = BTreeMap::new();

    for annotation in annotations {
        total_tokens += annotation.tokens.len();
        for label in &annotation.labels {
            *label_distribution.entry(label.clone()).or_insert(0) += 1;
        }
    }

    let avg_tokens_per_sentence = if annotations.is_empty() {
        0.0
    } else {
        total_tokens as f64 / annotations.len() as f64
    };

    DatasetStats {
        total_sentences: annotations.len(),
        total_tokens,
        label_distribution,
        avg_tokens_per_sentence,
    }
}

impl DatasetStats {
    /// Number of tokens carrying `label`.
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.label_distribution.get(label).copied().unwrap_or(0)
    }

    /// Share of all tokens carrying `label`, in percent. Zero for an empty corpus.
    #[must_use]
    pub fn percentage(&self, label: &str) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.total_tokens as f64 * 100.0
    }

    /// Labels ordered by descending count, ties broken alphabetically.
    #[must_use]
    pub fn ranked_labels(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self
            .label_distribution
            .iter()
            .map(|(label, &count)| (label.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total sentences: {}", self.total_sentences)?;
        writeln!(f, "  Total tokens: {}", self.total_tokens)?;
        writeln!(
            f,
            "  Avg tokens/sentence: {:.2}",
            self.avg_tokens_per_sentence
        )?;
        writeln!(f)?;
        writeln!(f, "Label Distribution:")?;
        for (label, count) in self.ranked_labels() {
            writeln!(
                f,
                "  {label:30} {count:6} ({:5.2}%)",
                self.percentage(label)
            )?;
        }
        Ok(())
    }
}
