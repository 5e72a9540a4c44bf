//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::read_input;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{AnalysisSession, RunOutcome};
use penmark_analyzer::AnalysisError;
use penmark_domain::LlmProvider;

/// Execute the analyze command.
///
/// Drives the same session the REPL uses, so empty input is rejected
/// before any request is made.
pub async fn execute_analyze<L>(
    args: AnalyzeArgs,
    session: &AnalysisSession<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Into<AnalysisError>,
{
    session.set_text(read_input(args.input)?);
    if let Some(language) = args.language {
        session.set_language(language);
    }
    if let Some(mode) = args.mode {
        session.set_mode(mode.into());
    }

    match session.run_analysis().await {
        RunOutcome::Succeeded(result) => {
            println!("{}", formatter.format_result(&result)?);
            Ok(())
        }
        RunOutcome::Failed(err) => Err(err.into()),
        RunOutcome::AlreadyRunning => Err(CliError::InvalidInput(
            "An analysis is already running".to_string(),
        )),
    }
}
