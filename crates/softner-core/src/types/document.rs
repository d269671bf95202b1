use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SoftNerError};

/// A labeled character range inside one sentence.
///
/// Offsets count Unicode scalar values, not bytes, and describe the
/// half-open range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSpan {
    /// First character covered by the span.
    pub start: usize,
    /// One past the last character covered by the span.
    pub end: usize,
    /// Surface text of the span, as recorded by the annotator.
    #[serde(default)]
    pub text: String,
    /// Category, e.g. `"GPE"` or `"Institutional"`.
    pub label: String,
    /// The sentence the span was taken from.
    #[serde(default)]
    pub sentence: String,
}

impl AnnotationSpan {
    /// Creates a span with empty `text` and `sentence` fields.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: String::new(),
            label: label.into(),
            sentence: String::new(),
        }
    }

    /// Returns `true` if `[start, end)` shares at least one character with this span.
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

/// Wire form of an annotation document, before validation.
///
/// This is exactly what the soft NER tagging tool and the hard NER tagger
/// write to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub sentences: Vec<String>,
    pub annotations: BTreeMap<String, Vec<AnnotationSpan>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// A validated set of annotations over an ordered list of sentences.
///
/// Every annotated sentence id points at an existing sentence and every span
/// is non-empty. Sentences without an entry simply carry no spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct AnnotationDocument {
    sentences: Vec<String>,
    annotations: BTreeMap<usize, Vec<AnnotationSpan>>,
    labels: Option<Vec<String>>,
}

impl AnnotationDocument {
    /// Creates a document with the given sentences and no annotations.
    #[must_use]
    pub fn new(sentences: Vec<String>) -> Self {
        Self {
            sentences,
            annotations: BTreeMap::new(),
            labels: None,
        }
    }

    /// Sets the declared label vocabulary.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a span to the given sentence, after the spans already stored there.
    pub fn add_span(&mut self, sentence_id: usize, span: AnnotationSpan) -> Result<()> {
        check_span(self.sentences.len(), sentence_id, &span)
            .map_err(SoftNerError::InvalidDocument)?;
        self.annotations.entry(sentence_id).or_default().push(span);
        Ok(())
    }

    /// Builder-style variant of [`add_span`](Self::add_span).
    pub fn with_span(mut self, sentence_id: usize, span: AnnotationSpan) -> Result<Self> {
        self.add_span(sentence_id, span)?;
        Ok(self)
    }

    /// Parses and validates a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads and validates a document from disk.
    ///
    /// A missing file is reported as [`SoftNerError::InputNotFound`]; any
    /// shape or validation problem as [`SoftNerError::MalformedDocument`]
    /// carrying the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SoftNerError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => SoftNerError::MalformedDocument {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8: {e}"),
            },
            _ => SoftNerError::io(path, e),
        })?;
        let document: Self =
            serde_json::from_str(&json).map_err(|e| SoftNerError::MalformedDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(
            path = %path.display(),
            sentences = document.sentences.len(),
            spans = document.span_count(),
            "loaded annotation document"
        );
        Ok(document)
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Spans stored for a sentence, in stored order. Unknown ids yield no spans.
    pub fn spans(&self, sentence_id: usize) -> &[AnnotationSpan] {
        self.annotations
            .get(&sentence_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Declared label vocabulary, empty if the document declares none.
    pub fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or(&[])
    }

    /// Whether the document carries a `labels` list at all.
    pub fn declares_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Total number of spans across all sentences.
    pub fn span_count(&self) -> usize {
        self.annotations.values().map(Vec::len).sum()
    }
}

fn check_sentence_id(sentence_count: usize, sentence_id: usize) -> std::result::Result<(), String> {
    if sentence_id >= sentence_count {
        return Err(format!(
            "sentence key {sentence_id} is out of range ({sentence_count} sentences)"
        ));
    }
    Ok(())
}

fn check_span(
    sentence_count: usize,
    sentence_id: usize,
    span: &AnnotationSpan,
) -> std::result::Result<(), String> {
    check_sentence_id(sentence_count, sentence_id)?;
    if span.start >= span.end {
        return Err(format!(
            "span [{}, {}) labeled {:?} in sentence {sentence_id} is empty",
            span.start, span.end, span.label
        ));
    }
    Ok(())
}

/// Sentence keys must be written exactly as the index they name: `"1"`, never
/// `" 1"`, `"+1"` or `"01"`.
fn parse_sentence_key(key: &str) -> std::result::Result<usize, String> {
    key.parse::<usize>()
        .ok()
        .filter(|id| id.to_string() == key)
        .ok_or_else(|| format!("sentence key {key:?} is not a sentence index"))
}

impl TryFrom<RawDocument> for AnnotationDocument {
    type Error = String;

    fn try_from(raw: RawDocument) -> std::result::Result<Self, Self::Error> {
        let mut annotations = BTreeMap::new();

        for (key, spans) in raw.annotations {
            let sentence_id = parse_sentence_key(&key)?;
            check_sentence_id(raw.sentences.len(), sentence_id)?;
            for span in &spans {
                check_span(raw.sentences.len(), sentence_id, span)?;
            }
            annotations
                .entry(sentence_id)
                .or_insert_with(Vec::new)
                .extend(spans);
        }

        Ok(Self {
            sentences: raw.sentences,
            annotations,
            labels: raw.labels,
        })
    }
}

impl From<AnnotationDocument> for RawDocument {
    fn from(document: AnnotationDocument) -> Self {
        Self {
            sentences: document.sentences,
            annotations: document
                .annotations
                .into_iter()
                .map(|(id, spans)| (id.to_string(), spans))
                .collect(),
            labels: document.labels,
        }
    }
}
