//! Sentiment model
//!
//! The advance handler only sees the [`Classifier`] trait. [`SentimentModel`]
//! is the bundled implementation: a lexicon model read from a JSON artifact.
//!
//! ```json
//! {
//!   "default": "neutral",
//!   "labels": {
//!     "positive": ["great", "love"],
//!     "negative": ["delayed", "rude"]
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model defines no labels")]
    NoLabels,
}

/// Text classification capability used by the advance handler
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, ModelError>;
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    default: String,
    labels: BTreeMap<String, Vec<String>>,
}

/// Lexicon-based sentiment classifier
#[derive(Debug, Clone)]
pub struct SentimentModel {
    default_label: String,
    lexicon: BTreeMap<String, HashSet<String>>,
}

impl SentimentModel {
    /// Load the model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: ModelFile = serde_json::from_str(&raw).map_err(|source| ModelError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

        let model = Self::from_lexicon(file.default, file.labels)?;
        tracing::info!(
            path = %path.display(),
            labels = model.lexicon.len(),
            "Sentiment model loaded"
        );

        Ok(model)
    }

    pub fn from_lexicon(
        default_label: impl Into<String>,
        labels: BTreeMap<String, Vec<String>>,
    ) -> Result<Self, ModelError> {
        if labels.is_empty() {
            return Err(ModelError::NoLabels);
        }

        let lexicon = labels
            .into_iter()
            .map(|(label, terms)| {
                let terms = terms.iter().map(|term| term.to_lowercase()).collect();
                (label, terms)
            })
            .collect();

        Ok(Self {
            default_label: default_label.into(),
            lexicon,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.lexicon.keys().map(String::as_str)
    }

    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
    }
}

impl Classifier for SentimentModel {
    fn classify(&self, text: &str) -> Result<String, ModelError> {
        let tokens: Vec<String> = Self::tokenize(text).collect();

        let mut best: Option<(&str, usize)> = None;
        let mut tied = false;

        for (label, terms) in &self.lexicon {
            let score = tokens.iter().filter(|token| terms.contains(*token)).count();
            if score == 0 {
                continue;
            }

            match best {
                Some((_, top)) if score < top => {}
                Some((_, top)) if score == top => tied = true,
                _ => {
                    best = Some((label.as_str(), score));
                    tied = false;
                }
            }
        }

        let label = match best {
            Some((label, _)) if !tied => label,
            _ => self.default_label.as_str(),
        };

        Ok(label.to_string())
    }
}
