pub mod bio;
pub mod standard;
pub mod writer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use bio::{BioSentence, BioToken, to_bio_labels};
pub use standard::{LABEL_TYPES, StandardDocument};
pub use writer::write_json_atomic;

/// Shape of the written training document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Combined sentences plus label vocabularies and file counts.
    #[default]
    Standard,
    /// Per-token `B-`/`I-`/`O` tags.
    Bio,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Bio => write!(f, "bio"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "bio" => Ok(Self::Bio),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
