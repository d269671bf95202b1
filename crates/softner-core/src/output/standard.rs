use serde::{Deserialize, Serialize};

use crate::merge::Corpus;
use crate::types::{CombinedAnnotation, SourceKind};

/// Label classes listed in every standard document.
pub const LABEL_TYPES: [&str; 3] = ["O", "Hard NER", "Soft NER"];

/// The standard combined training document.
///
/// Vocabularies are sorted so identical inputs always serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDocument {
    pub sentences: Vec<CombinedAnnotation>,
    pub label_types: Vec<String>,
    pub hard_labels: Vec<String>,
    pub soft_labels: Vec<String>,
    pub num_hard_ner_files: usize,
    pub num_soft_ner_files: usize,
}

impl From<&Corpus> for StandardDocument {
    fn from(corpus: &Corpus) -> Self {
        let sorted = |kind: SourceKind| -> Vec<String> {
            corpus.declared_labels(kind).iter().cloned().collect()
        };

        Self {
            sentences: corpus.annotations().to_vec(),
            label_types: LABEL_TYPES.iter().map(|t| t.to_string()).collect(),
            hard_labels: sorted(SourceKind::Hard),
            soft_labels: sorted(SourceKind::Soft),
            num_hard_ner_files: corpus.file_count(SourceKind::Hard),
            num_soft_ner_files: corpus.file_count(SourceKind::Soft),
        }
    }
}
