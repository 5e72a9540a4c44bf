//! Trait definitions for external interactions
//!
//! These traits define the boundary between the analysis contract and the
//! model backend. Implementations live in `penmark-llm`.

use async_trait::async_trait;
use serde_json::Value;

/// Trait for language-model backends
///
/// The backend receives a prompt and a declared output schema, and returns
/// the raw text of the model's reply. Interpreting that text is the caller's
/// job.
///
/// Implemented by the infrastructure layer (penmark-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for backend operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a reply constrained to a JSON document matching `schema`
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<String, Self::Error>;
}
