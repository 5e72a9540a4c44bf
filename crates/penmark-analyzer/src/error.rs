//! Error types for the Analyzer

use penmark_llm::LlmError;
use std::fmt;
use thiserror::Error;

/// Message shown when analysis is triggered without text
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";

/// Message shown when the backend could not be reached
pub const REQUEST_FAILED_MESSAGE: &str =
    "The analysis service could not be reached. Please try again.";

/// Message shown when the backend reply did not match the expected format
pub const INVALID_RESPONSE_MESSAGE: &str =
    "An error occurred during analysis. The model may have returned an unexpected format. Please try again.";

/// Errors that can occur during analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Analysis was triggered with no meaningful text
    #[error("No text to analyze")]
    EmptyInput,

    /// The backend call did not complete (network, auth, quota, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend replied with something that is not a valid result
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Text exceeds the configured maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),
}

/// Discriminant of an [`AnalysisError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`AnalysisError::EmptyInput`]
    EmptyInput,
    /// See [`AnalysisError::RequestFailed`]
    RequestFailed,
    /// See [`AnalysisError::InvalidResponse`]
    InvalidResponse,
    /// See [`AnalysisError::TextTooLong`]
    TextTooLong,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::EmptyInput => "EmptyInput",
            ErrorKind::RequestFailed => "RequestFailed",
            ErrorKind::InvalidResponse => "InvalidResponse",
            ErrorKind::TextTooLong => "TextTooLong",
        };
        f.write_str(name)
    }
}

impl AnalysisError {
    /// Discriminant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::EmptyInput => ErrorKind::EmptyInput,
            AnalysisError::RequestFailed(_) => ErrorKind::RequestFailed,
            AnalysisError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            AnalysisError::TextTooLong(..) => ErrorKind::TextTooLong,
        }
    }

    /// Human-readable message for the person who triggered the analysis
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            AnalysisError::RequestFailed(_) => REQUEST_FAILED_MESSAGE.to_string(),
            AnalysisError::InvalidResponse(_) => INVALID_RESPONSE_MESSAGE.to_string(),
            AnalysisError::TextTooLong(len, max) => format!(
                "The text is too long to analyze ({} characters, maximum {}).",
                len, max
            ),
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidResponse(msg) => AnalysisError::InvalidResponse(msg),
            other => AnalysisError::RequestFailed(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::InvalidResponse(format!("JSON parse error: {}", e))
    }
}
