//! Penmark Domain Layer
//!
//! This crate holds the data contract shared by every other Penmark crate:
//! what an analysis request carries, what a valid analysis result looks like,
//! and the trait boundary behind which the language-model backend lives.
//!
//! ## Key Concepts
//!
//! - **Conclusion**: the three-way label attached to an analyzed text
//! - **Evidence item**: a named stylistic signal plus its interpretation
//! - **Suspicious excerpt**: a verbatim quoted span flagged with a reason
//! - **Humanize suggestion**: a problem / fix / example / rationale edit
//! - **LlmProvider**: the opaque model backend that produces the judgement
//!
//! ## Architecture
//!
//! - Pure data and validation only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod options;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use options::{AnalysisMode, AnalysisOptions, AUTO_LANGUAGE};
pub use result::{
    AnalysisResult, Conclusion, Evidence, HumanizeSuggestion,
    SuspiciousExcerpt, MAX_PROBABILITY, MIN_PROBABILITY,
};
pub use traits::LlmProvider;
