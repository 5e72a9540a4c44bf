//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::commands::read_input;
use crate::config::Config;
use crate::error::Result;
use penmark_analyzer::build_prompt;
use penmark_domain::AnalysisOptions;

/// Print the prompt the model would receive for the given text.
pub fn execute_prompt(args: PromptArgs, config: &Config) -> Result<()> {
    let text = read_input(args.input)?;
    let options = AnalysisOptions::new(
        args.language.unwrap_or_else(|| config.analysis.language.clone()),
        config.analysis.mode,
    );

    println!("{}", build_prompt(&text, &options));
    Ok(())
}
