//! # Merge Configuration
//!
//! Explicit settings for a combine run, plus the on-disk manifest that lists
//! the stories of a batch run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoftNerError};
use crate::output::OutputFormat;

/// How resolved labels name the source they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelScheme {
    /// `Hard-GPE` with a single hard source, `Hard2-GPE` for the second of several.
    #[default]
    Indexed,
    /// Always `Hard-GPE` / `Soft-Private`, however many sources there are.
    Plain,
}

impl fmt::Display for LabelScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed => write!(f, "indexed"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for LabelScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" => Ok(Self::Indexed),
            "plain" => Ok(Self::Plain),
            other => Err(format!("unknown label scheme: {other}")),
        }
    }
}

/// Configuration for the annotation combiner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinerConfig {
    /// How source prefixes are rendered into token labels
    pub label_scheme: LabelScheme,
}

impl CombinerConfig {
    /// Create a new combiner configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label scheme.
    pub fn with_label_scheme(mut self, label_scheme: LabelScheme) -> Self {
        self.label_scheme = label_scheme;
        self
    }
}

/// The hard and soft documents of one story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySources {
    /// Optional display name, used in logs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub hard: Vec<PathBuf>,
    #[serde(default)]
    pub soft: Vec<PathBuf>,
}

impl StorySources {
    pub fn new(hard: Vec<PathBuf>, soft: Vec<PathBuf>) -> Self {
        Self {
            name: None,
            hard,
            soft,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for log output: the explicit name, else the first input file.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.hard
            .first()
            .or_else(|| self.soft.first())
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<empty story>".to_string())
    }
}

/// A batch merge run read from a JSON file.
///
/// ```json
/// {
///   "labelScheme": "indexed",
///   "format": "standard",
///   "output": "trainingCombinedNER.json",
///   "stories": [
///     { "name": "station4", "hard": ["hardNER.json"], "soft": ["annotations.json"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeManifest {
    #[serde(default)]
    pub label_scheme: LabelScheme,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub stories: Vec<StorySources>,
}

impl MergeManifest {
    /// Loads a manifest, resolving relative paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SoftNerError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = fs::read_to_string(path).map_err(|e| SoftNerError::io(path, e))?;
        let manifest: Self =
            serde_json::from_str(&json).map_err(|e| SoftNerError::MalformedDocument {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(manifest.resolved_against(base))
    }

    /// Combiner settings carried by the manifest.
    pub fn combiner_config(&self) -> CombinerConfig {
        CombinerConfig::new().with_label_scheme(self.label_scheme)
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        for story in &mut self.stories {
            story.hard.iter_mut().for_each(resolve);
            story.soft.iter_mut().for_each(resolve);
        }
        if let Some(output) = self.output.as_mut() {
            resolve(output);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combiner_config() {
        let config = CombinerConfig::new().with_label_scheme(LabelScheme::Plain);
        assert_eq!(config.label_scheme, LabelScheme::Plain);
        assert_eq!(CombinerConfig::default().label_scheme, LabelScheme::Indexed);
    }

    #[test]
    fn test_label_scheme_parsing() {
        assert_eq!("plain".parse::<LabelScheme>(), Ok(LabelScheme::Plain));
        assert_eq!("Indexed".parse::<LabelScheme>(), Ok(LabelScheme::Indexed));
        assert!("numbered".parse::<LabelScheme>().is_err());
        assert_eq!(LabelScheme::Plain.to_string(), "plain");
    }

    #[test]
    fn test_story_display_name() {
        let story = StorySources::new(vec!["a/hard.json".into()], vec![]);
        assert_eq!(story.display_name(), "a/hard.json");
        assert_eq!(story.with_name("station4").display_name(), "station4");
        assert_eq!(StorySources::default().display_name(), "<empty story>");
    }

    #[test]
    fn test_manifest_defaults_and_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stories.json");
        fs::write(
            &path,
            r#"{"stories": [{"hard": ["h.json"], "soft": ["/abs/s.json"]}], "output": "out.json"}"#,
        )
        .unwrap();

        let manifest = MergeManifest::from_path(&path).unwrap();
        assert_eq!(manifest.label_scheme, LabelScheme::Indexed);
        assert_eq!(manifest.format, OutputFormat::Standard);
        assert_eq!(manifest.stories[0].hard[0], dir.path().join("h.json"));
        assert_eq!(manifest.stories[0].soft[0], PathBuf::from("/abs/s.json"));
        assert_eq!(manifest.output, Some(dir.path().join("out.json")));
    }

    #[test]
    fn test_manifest_reads_scheme_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stories.json");
        fs::write(
            &path,
            r#"{"labelScheme": "plain", "format": "bio", "stories": []}"#,
        )
        .unwrap();

        let manifest = MergeManifest::from_path(&path).unwrap();
        assert_eq!(manifest.combiner_config().label_scheme, LabelScheme::Plain);
        assert_eq!(manifest.format, OutputFormat::Bio);
    }

    #[test]
    fn test_manifest_missing_file() {
        let err = MergeManifest::from_path("no/such/manifest.json").unwrap_err();
        assert!(matches!(err, SoftNerError::InputNotFound { .. }));
    }
}
