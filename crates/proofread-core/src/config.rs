//! Engine configuration.
//!
//! Configuration is plain data with serde support so hosts can ship it as JSON next to their own
//! settings. Every field has a default; a partial document only overrides what it names.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default punctuation set used by the tokenizer.
///
/// Apostrophes and hyphens are deliberately absent so contractions and hyphenated words stay a
/// single word token.
pub const DEFAULT_PUNCTUATION: &str = ".,;:!?\"()[]{}…–—";

/// Default `source` label attached to presented suggestions.
pub const DEFAULT_DIAGNOSTIC_SOURCE: &str = "Grammar Assistant";

/// Which token-diff alignment the engine runs for structured payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    /// Myers diff over non-whitespace tokens.
    #[default]
    Myers,
    /// Single-pass, position-synchronized greedy walk.
    Greedy,
}

/// Tag names of the paired delimiters in tagged correction text (`<orig>…</orig><edit>…</edit>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Tag wrapping the original fragment.
    pub original_tag: String,
    /// Tag wrapping the suggested replacement.
    pub edit_tag: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            original_tag: "orig".to_string(),
            edit_tag: "edit".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofreadConfig {
    /// Tagged-text markers.
    pub markers: MarkerConfig,
    /// Characters that form single-character punctuation tokens.
    pub punctuation: String,
    /// Token-diff alignment strategy.
    pub strategy: AlignmentStrategy,
    /// Maximum display width of a quoted snippet in a suggestion description (`0` = unlimited).
    pub description_width: usize,
    /// Source label for presented suggestions.
    pub diagnostic_source: String,
}

impl Default for ProofreadConfig {
    fn default() -> Self {
        Self {
            markers: MarkerConfig::default(),
            punctuation: DEFAULT_PUNCTUATION.to_string(),
            strategy: AlignmentStrategy::default(),
            description_width: 40,
            diagnostic_source: DEFAULT_DIAGNOSTIC_SOURCE.to_string(),
        }
    }
}

impl ProofreadConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in [&self.markers.original_tag, &self.markers.edit_tag] {
            let valid = !tag.is_empty()
                && tag
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ConfigError::InvalidMarker(tag.clone()));
            }
        }
        if self.markers.original_tag == self.markers.edit_tag {
            return Err(ConfigError::InvalidMarker(self.markers.edit_tag.clone()));
        }

        if let Some(c) = self.punctuation.chars().find(|c| c.is_whitespace()) {
            return Err(ConfigError::InvalidPunctuation(c));
        }

        Ok(())
    }
}
