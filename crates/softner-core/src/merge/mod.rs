pub mod combiner;
pub mod config;
pub mod corpus;
pub mod resolver;
pub mod span_index;
pub mod tokenizer;

pub use combiner::AnnotationCombiner;
pub use config::{CombinerConfig, LabelScheme, MergeManifest, StorySources};
pub use corpus::Corpus;
pub use resolver::LabelResolver;
pub use span_index::{IndexedSource, SpanIndex, SpanMatch};
pub use tokenizer::{Token, Tokenizer};
