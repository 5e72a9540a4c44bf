//! Options module - per-request analysis settings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language hint meaning "let the model detect the language"
pub const AUTO_LANGUAGE: &str = "auto";

/// Depth of analysis requested by the user
///
/// Both modes are accepted and carried with the request; the prompt does not
/// currently differentiate between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Quick pass
    Light,

    /// Full analysis (default)
    #[default]
    Full,
}

impl AnalysisMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Light => "light",
            AnalysisMode::Full => "full",
        }
    }

    /// Parse a mode from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(AnalysisMode::Light),
            "full" => Some(AnalysisMode::Full),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single analysis request
///
/// Built fresh from the current form state each time an analysis is
/// triggered and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use penmark_domain::{AnalysisMode, AnalysisOptions};
///
/// let options = AnalysisOptions::new("auto", AnalysisMode::Full);
/// assert_eq!(options.language_label(), "Auto-detect");
///
/// let options = AnalysisOptions::new("vi", AnalysisMode::Light);
/// assert_eq!(options.language_label(), "vi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// ISO language hint ("en", "vi", ...), free text, or "auto"
    pub language: String,

    /// Requested analysis depth
    pub mode: AnalysisMode,
}

impl AnalysisOptions {
    /// Create a new set of options
    pub fn new(language: impl Into<String>, mode: AnalysisMode) -> Self {
        Self {
            language: language.into(),
            mode,
        }
    }

    /// Whether the language should be detected by the model
    pub fn is_auto_language(&self) -> bool {
        self.language == AUTO_LANGUAGE
    }

    /// Label used when telling the model which language the input is in
    pub fn language_label(&self) -> &str {
        if self.is_auto_language() {
            "Auto-detect"
        } else {
            &self.language
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::new(AUTO_LANGUAGE, AnalysisMode::Full)
    }
}
