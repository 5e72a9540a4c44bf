//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use penmark_domain::AnalysisMode;

/// Penmark - estimate whether a text was written by a human or an AI model.
#[derive(Debug, Parser)]
#[command(name = "penmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PENMARK_CONFIG")]
    pub config: Option<String>,

    /// Model to use (overrides the configured one)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Sectioned report (default)
    Pretty,
    /// JSON format
    Json,
    /// Quiet format (conclusion and probability)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a text and report how likely it is AI-written
    Analyze(AnalyzeArgs),

    /// Print the prompt that would be sent, without calling the model
    Prompt(PromptArgs),

    /// Print the response schema declared to the model
    Schema,

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Where the input text comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Text to analyze
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with_all = ["text", "stdin"])]
    pub file: Option<String>,

    /// Read the text from stdin
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Language hint ("auto", "en", "vi", ...)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Analysis mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Language hint ("auto", "en", "vi", ...)
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Quick pass
    Light,
    /// Full analysis
    Full,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Pretty => crate::config::OutputFormat::Pretty,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for AnalysisMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Light => AnalysisMode::Light,
            ModeArg::Full => AnalysisMode::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_repl() {
        let cli = Cli::parse_from(["penmark"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "penmark",
            "analyze",
            "Some text to check.",
            "--language",
            "vi",
            "--mode",
            "light",
        ]);
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.input.text.as_deref(), Some("Some text to check."));
                assert_eq!(args.language.as_deref(), Some("vi"));
                assert!(matches!(args.mode, Some(ModeArg::Light)));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["penmark", "schema", "--format", "json", "-vv", "--no-color"]);
        assert!(matches!(cli.command, Some(Command::Schema)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
    }

    #[test]
    fn test_file_conflicts_with_text() {
        let result = Cli::try_parse_from(["penmark", "analyze", "inline", "--file", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["penmark", "config", "init", "--force"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            })) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }

    #[test]
    fn test_mode_conversion() {
        let mode: AnalysisMode = ModeArg::Light.into();
        assert_eq!(mode, AnalysisMode::Light);
    }
}
