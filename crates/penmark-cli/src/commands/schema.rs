//! Schema command implementation.

use crate::error::Result;
use penmark_analyzer::analysis_response_schema;

/// Print the response schema declared to the model.
pub fn execute_schema() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&analysis_response_schema())?);
    Ok(())
}
