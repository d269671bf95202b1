//! # softner Core
//!
//! Merges two independently produced NER annotation layers over the
//! sentences of a short story into token-labeled training data: "hard"
//! entities from an automatic tagger (facilities, GPEs, locations) and "soft"
//! entities tagged by hand with a study-specific vocabulary.
//!
//! Sentences are split on whitespace, each token gets the label of the first
//! overlapping span (hard documents before soft ones), and the result can be
//! written as a standard document or in BIO format.
//!
//! ## Quick Start
//!
//! ```rust
//! use softner_core::{AnnotationCombiner, AnnotationDocument, AnnotationSpan, CombinerConfig};
//!
//! let sentence = "Maria walked to the old courthouse downtown.".to_string();
//! let hard = AnnotationDocument::new(vec![sentence.clone()])
//!     .with_span(0, AnnotationSpan::new(24, 34, "FAC"))
//!     .unwrap();
//! let soft = AnnotationDocument::new(vec![sentence])
//!     .with_span(0, AnnotationSpan::new(0, 5, "Private"))
//!     .unwrap();
//!
//! let combiner = AnnotationCombiner::new(vec![hard], vec![soft], CombinerConfig::default());
//! let combined = combiner.combine();
//!
//! assert_eq!(
//!     combined[0].labels,
//!     ["Soft-Private", "O", "O", "O", "O", "Hard-FAC", "O"]
//! );
//! ```
pub mod error;
pub mod merge;
pub mod output;
pub mod stats;
pub mod types;

// Re-export primary API
pub use error::{Result, SoftNerError};
pub use merge::{
    AnnotationCombiner, CombinerConfig, Corpus, LabelResolver, LabelScheme, MergeManifest,
    SpanIndex, StorySources, Token, Tokenizer,
};
pub use output::{BioSentence, BioToken, OutputFormat, StandardDocument};
pub use stats::{DatasetStats, WordCounter, WordFrequency, compute_stats};
pub use types::{AnnotationDocument, AnnotationSpan, CombinedAnnotation, OUTSIDE_LABEL, SourceKind};
