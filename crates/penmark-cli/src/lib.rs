//! Penmark CLI library.
//!
//! Configuration management, the analysis session (form state), command
//! execution, and terminal rendering of analysis results.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod repl;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::AnalysisSession;
