//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL is a line-oriented form: build up the text, pick a language and
//! mode, then run `analyze`.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::{AnalysisSession, RunOutcome, SessionStatus};
use penmark_analyzer::AnalysisError;
use penmark_domain::{AnalysisMode, LlmProvider};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::Path;

/// Run the interactive REPL against `session`.
pub async fn run_repl<L>(
    session: &AnalysisSession<L>,
    formatter: &Formatter,
    history_path: &Path,
    history_size: usize,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Into<AnalysisError>,
{
    println!("{}", formatter.info("Penmark REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let _ = editor.load_history(history_path);

    loop {
        let prompt = match session.status() {
            SessionStatus::Failed => "penmark (error)> ",
            _ => "penmark> ",
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, session, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        fs::create_dir_all(parent).ok();
    }
    editor.save_history(history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    /// Replace the draft text
    Text(String),
    /// Append a line to the draft text
    Append(String),
    /// Replace the draft text with a file's contents
    Load(String),
    Clear,
    Lang(String),
    Mode(AnalysisMode),
    Analyze,
    Show,
    Status,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "text" => Ok(ReplCommand::Text(rest.to_string())),
        "append" | "+" => Ok(ReplCommand::Append(rest.to_string())),
        "load" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: load <file>".to_string()));
            }
            Ok(ReplCommand::Load(rest.to_string()))
        }
        "clear" => Ok(ReplCommand::Clear),
        "lang" | "language" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: lang <code|auto>".to_string()));
            }
            Ok(ReplCommand::Lang(rest.to_string()))
        }
        "mode" => AnalysisMode::parse(rest)
            .map(ReplCommand::Mode)
            .ok_or_else(|| CliError::InvalidInput("Usage: mode light|full".to_string())),
        "analyze" | "run" => Ok(ReplCommand::Analyze),
        "show" => Ok(ReplCommand::Show),
        "status" => Ok(ReplCommand::Status),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            word
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command<L>(
    cmd: ReplCommand,
    session: &AnalysisSession<L>,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Into<AnalysisError>,
{
    let applied = match cmd {
        ReplCommand::Text(text) => session.set_text(text),
        ReplCommand::Append(line) => session.append_text(&line),
        ReplCommand::Load(path) => {
            let text = fs::read_to_string(&path)?;
            session.set_text(text)
        }
        ReplCommand::Clear => session.clear_text(),
        ReplCommand::Lang(language) => session.set_language(language),
        ReplCommand::Mode(mode) => session.set_mode(mode),
        ReplCommand::Analyze => {
            println!("{}", formatter.info("Analyzing..."));
            match session.run_analysis().await {
                RunOutcome::Succeeded(result) => {
                    println!("{}", formatter.format_result(&result)?);
                }
                RunOutcome::Failed(err) => {
                    tracing::debug!("Analysis failed: {}", err);
                    eprintln!("{}", formatter.error(&err.user_message()));
                }
                RunOutcome::AlreadyRunning => {
                    println!("{}", formatter.warning("An analysis is already running"));
                }
            }
            return Ok(());
        }
        ReplCommand::Show => {
            match (session.result(), session.error()) {
                (_, Some(error)) => eprintln!("{}", formatter.error(&error)),
                (Some(result), None) => println!("{}", formatter.format_result(&result)?),
                (None, None) => println!("{}", formatter.info("No analysis yet. Type 'analyze' to run one.")),
            }
            return Ok(());
        }
        ReplCommand::Status => {
            let form = session.snapshot();
            println!(
                "Status: {}\nLanguage: {}\nMode: {}\nText: {} characters, {} words",
                session.status(),
                session.options().language_label(),
                form.mode,
                form.text.chars().count(),
                form.text.split_whitespace().count()
            );
            return Ok(());
        }
        ReplCommand::Exit | ReplCommand::Help => return Ok(()),
    };

    if applied {
        println!("{}", formatter.success("Updated"));
    } else {
        println!("{}", formatter.warning("An analysis is running; input is locked"));
    }
    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

/// Print REPL help.
fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  text <text>          Replace the text to analyze");
    println!("  append <line>        Append a line to the text");
    println!("  load <file>          Replace the text with a file's contents");
    println!("  clear                Clear the text");
    println!("  lang <code|auto>     Set the language hint (en, vi, other, ...)");
    println!("  mode light|full      Set the analysis mode");
    println!("  analyze              Run the analysis");
    println!("  show                 Show the last result or error");
    println!("  status               Show the form state");
    println!("  help                 Show this help");
    println!("  exit                 Exit the REPL");
    println!();
}
