//! Result module - the structured judgement returned by the analysis backend
//!
//! Field names on the wire are camelCase (`aiProbability`,
//! `suspiciousExcerpts`, `humanizeSuggestions`). Deserialization enforces
//! presence and type of every field; [`AnalysisResult::validate`] enforces the
//! remaining value constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted `aiProbability` (inclusive)
pub const MIN_PROBABILITY: f64 = 0.0;

/// Highest accepted `aiProbability` (inclusive)
pub const MAX_PROBABILITY: f64 = 100.0;

/// Final classification of an analyzed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conclusion {
    /// The text reads as machine generated
    #[serde(rename = "AI Written")]
    AiWritten,

    /// The text reads as human authored
    #[serde(rename = "Human Written")]
    HumanWritten,

    /// Mixed signals, too short, or heavily edited
    #[serde(rename = "Uncertain")]
    Uncertain,
}

impl Conclusion {
    /// All conclusions, in the order they are presented to the model
    pub const ALL: [Conclusion; 3] = [
        Conclusion::AiWritten,
        Conclusion::HumanWritten,
        Conclusion::Uncertain,
    ];

    /// Wire label of the conclusion
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::AiWritten => "AI Written",
            Conclusion::HumanWritten => "Human Written",
            Conclusion::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stylistic signal supporting the conclusion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Name of the detected feature, e.g. "Sentence Rhythm"
    pub signal: String,

    /// Why the feature points towards the conclusion
    pub explanation: String,
}

/// A verbatim span of the input flagged as suspicious
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspiciousExcerpt {
    /// Exact quote from the input text
    pub excerpt: String,

    /// Why this excerpt is suspicious
    pub reason: String,
}

/// A concrete edit recommendation to make the text read as human written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanizeSuggestion {
    /// Issue identified in the text
    pub problem: String,

    /// How to fix it
    pub fix: String,

    /// A rewritten sentence or two illustrating the fix
    pub example: String,

    /// Why the fix makes the text read as more human
    pub why: String,
}

/// Complete analysis result
///
/// All six fields are required on the wire. Arrays may be empty.
///
/// # Examples
///
/// ```
/// use penmark_domain::{AnalysisResult, Conclusion};
///
/// let json = r#"{
///     "conclusion": "Human Written",
///     "aiProbability": 12,
///     "evidence": [],
///     "suspiciousExcerpts": [],
///     "humanizeSuggestions": [],
///     "limitations": "None."
/// }"#;
///
/// let result: AnalysisResult = serde_json::from_str(json).unwrap();
/// assert_eq!(result.conclusion, Conclusion::HumanWritten);
/// assert!(result.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Three-way classification
    pub conclusion: Conclusion,

    /// Estimated probability (0-100) that the text is AI written
    pub ai_probability: f64,

    /// Strongest signals behind the conclusion, in order
    pub evidence: Vec<Evidence>,

    /// Quoted spans of the input flagged as suspicious, in order
    pub suspicious_excerpts: Vec<SuspiciousExcerpt>,

    /// Rewrite recommendations, in order
    pub humanize_suggestions: Vec<HumanizeSuggestion>,

    /// Caveats on the confidence of the analysis
    pub limitations: String,
}

impl AnalysisResult {
    /// Validate value constraints that deserialization cannot express
    ///
    /// `aiProbability` must be a finite number within
    /// [`MIN_PROBABILITY`, `MAX_PROBABILITY`], both ends inclusive.
    pub fn validate(&self) -> Result<(), String> {
        if !self.ai_probability.is_finite() {
            return Err(format!("aiProbability {} is not a finite number", self.ai_probability));
        }
        if self.ai_probability < MIN_PROBABILITY || self.ai_probability > MAX_PROBABILITY {
            return Err(format!(
                "aiProbability {} out of range [{}, {}]",
                self.ai_probability, MIN_PROBABILITY, MAX_PROBABILITY
            ));
        }
        Ok(())
    }
}
