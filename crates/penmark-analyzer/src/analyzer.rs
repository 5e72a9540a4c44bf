//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::parser::parse_analysis_response;
use crate::prompt::PromptBuilder;
use crate::schema::analysis_response_schema;
use penmark_domain::{AnalysisOptions, AnalysisResult, LlmProvider};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Analyzer asks a language model whether a text reads as AI written
///
/// One call to [`Analyzer::analyze`] makes exactly one backend request.
/// Failures are reported immediately; retrying is the caller's decision.
pub struct Analyzer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: AnalyzerConfig,
    schema: Value,
    model_name: String,
}

impl<L> Analyzer<L>
where
    L: LlmProvider,
    L::Error: Into<AnalysisError>,
{
    /// Create a new Analyzer
    pub fn new(llm_provider: L, config: AnalyzerConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
            schema: analysis_response_schema(),
            model_name: "llm".to_string(),
        }
    }

    /// Set the model name used in log output
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `text` and return the model's validated judgement
    ///
    /// The caller is responsible for rejecting empty input before calling
    /// this; the analyzer forwards whatever it is given.
    ///
    /// # Errors
    ///
    /// - `TextTooLong` if the text exceeds `max_text_length` characters
    /// - `RequestFailed` if the backend call fails
    /// - `InvalidResponse` if the reply is not a valid result
    pub async fn analyze(
        &self,
        text: &str,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        let char_count = text.chars().count();
        if char_count > self.config.max_text_length {
            return Err(AnalysisError::TextTooLong(char_count, self.config.max_text_length));
        }

        info!(
            "Starting analysis with model '{}', language '{}', mode '{}', text length {}",
            self.model_name, options.language, options.mode, char_count
        );
        let start_time = Instant::now();

        let prompt = PromptBuilder::new(text, options).build();
        debug!("Prompt length: {} chars", prompt.len());

        let llm_response = self
            .llm_provider
            .generate_structured(&prompt, &self.schema)
            .await
            .map_err(|e| {
                let e: AnalysisError = e.into();
                warn!("Model request failed: {}", e);
                e
            })?;

        debug!("LLM response length: {} chars", llm_response.len());

        let result = parse_analysis_response(&llm_response)?;

        info!(
            "Analysis complete in {}ms: {} ({}%), {} evidence, {} excerpts, {} suggestions",
            start_time.elapsed().as_millis(),
            result.conclusion,
            result.ai_probability,
            result.evidence.len(),
            result.suspicious_excerpts.len(),
            result.humanize_suggestions.len()
        );

        Ok(result)
    }
}
