//! Command implementations.

pub mod analyze;
pub mod config;
pub mod prompt;
pub mod schema;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::prompt::execute_prompt;
pub use self::schema::execute_schema;

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use penmark_analyzer::Analyzer;
use penmark_llm::GeminiProvider;
use std::fs;
use std::io::{self, Read};

/// Read the input text from the argument, a file, or stdin.
pub fn read_input(input: InputArgs) -> Result<String> {
    if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(file_path) = input.file {
        Ok(fs::read_to_string(file_path)?)
    } else if let Some(text) = input.text {
        Ok(text)
    } else {
        Err(CliError::InvalidInput(
            "Provide the text as an argument, or use --file or --stdin".to_string(),
        ))
    }
}

/// Build the Gemini-backed analyzer described by `config`.
pub fn build_analyzer(config: &Config) -> Result<Analyzer<GeminiProvider>> {
    let provider = GeminiProvider::new(
        config.provider.endpoint.as_str(),
        config.provider.model.as_str(),
        config.api_key()?,
        config.timeout(),
    )?;

    Ok(Analyzer::new(provider, config.analyzer_config()).with_model_name(config.provider.model.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_from_argument() {
        let input = InputArgs {
            text: Some("inline text".to_string()),
            file: None,
            stdin: false,
        };
        assert_eq!(read_input(input).unwrap(), "inline text");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.txt");
        fs::write(&path, "From a file.\n").unwrap();

        let input = InputArgs {
            text: None,
            file: Some(path.to_string_lossy().into_owned()),
            stdin: false,
        };
        assert_eq!(read_input(input).unwrap(), "From a file.\n");
    }

    #[test]
    fn test_read_input_requires_a_source() {
        let input = InputArgs {
            text: None,
            file: None,
            stdin: false,
        };
        assert!(matches!(read_input(input), Err(CliError::InvalidInput(_))));
    }
}
