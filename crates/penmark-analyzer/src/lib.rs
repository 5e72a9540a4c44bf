//! Penmark Analyzer
//!
//! Sends user text to a language model with a fixed instructional prompt and
//! turns the reply into a validated [`AnalysisResult`].
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LlmProvider (prompt + schema) → strip fence → parse → validate → AnalysisResult
//! ```
//!
//! # Key Features
//!
//! - **Prompt construction**: pure and deterministic, input embedded verbatim
//! - **Declared output schema**: passed to the backend as data
//! - **Fence normalization**: tolerates replies wrapped in a markdown code block
//! - **Wholesale validation**: a malformed reply is rejected, never partially accepted
//! - **No retries**: one backend call per analysis
//!
//! # Example Usage
//!
//! ```no_run
//! use penmark_analyzer::{Analyzer, AnalyzerConfig};
//! use penmark_domain::AnalysisOptions;
//! use penmark_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{
//!     "conclusion": "Uncertain",
//!     "aiProbability": 50,
//!     "evidence": [],
//!     "suspiciousExcerpts": [],
//!     "humanizeSuggestions": [],
//!     "limitations": "Text is very short."
//! }"#);
//!
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default());
//! let result = analyzer.analyze("Short.", &AnalysisOptions::default()).await?;
//!
//! println!("{} ({}%)", result.conclusion, result.ai_probability);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod parser;
mod prompt;
mod schema;


pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::{
    AnalysisError, ErrorKind, EMPTY_INPUT_MESSAGE, INVALID_RESPONSE_MESSAGE, REQUEST_FAILED_MESSAGE,
};
pub use parser::{parse_analysis_response, strip_code_fence};
pub use prompt::{build_prompt, PromptBuilder, UNCERTAIN_WORD_THRESHOLD};
pub use schema::analysis_response_schema;

pub use penmark_domain::AnalysisResult;
