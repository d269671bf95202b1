pub mod dataset;
pub mod frequency;

pub use dataset::{DatasetStats, compute_stats};
pub use frequency::{WordCounter, WordFrequency};
