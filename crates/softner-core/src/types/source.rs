use std::fmt;

use serde::{Deserialize, Serialize};

/// Which annotation layer a document belongs to.
///
/// Hard sources always take priority over soft sources when both cover a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    /// Automatically tagged canonical entities (facility, GPE, location).
    Hard,
    /// Hand-tagged, study-specific categories.
    Soft,
}

impl SourceKind {
    /// Prefix used when building resolved token labels.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::Soft => "Soft",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
