//! Penmark CLI - Estimate whether a text was written by a human or an AI model.

use clap::Parser;
use penmark_cli::commands;
use penmark_cli::logging::init_tracing;
use penmark_cli::repl;
use penmark_cli::{AnalysisSession, Cli, Command, Config, Formatter};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> penmark_cli::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    if let Some(model) = cli.model {
        config.provider.model = model;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Schema) => commands::execute_schema()?,
        Some(Command::Prompt(args)) => commands::execute_prompt(args, &config)?,
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?
        }
        Some(Command::Analyze(args)) => {
            let analyzer = commands::build_analyzer(&config)?;
            let session = AnalysisSession::new(analyzer, config.default_options());
            commands::execute_analyze(args, &session, &formatter).await?;
        }
        None | Some(Command::Repl) => {
            let analyzer = commands::build_analyzer(&config)?;
            let session = AnalysisSession::new(analyzer, config.default_options());
            let history_path = Config::dir()?.join("history.txt");
            repl::run_repl(&session, &formatter, &history_path, config.settings.history_size).await?;
        }
    }

    Ok(())
}
