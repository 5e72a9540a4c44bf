//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use penmark_domain::{AnalysisResult, Conclusion};
use colored::*;
use std::fmt::Write as _;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Shown under every pretty report.
pub const DISCLAIMER: &str = "This tool provides a probabilistic analysis and should not be used as definitive proof. Always use results as a guide for editing and review.";

const BAR_WIDTH: usize = 20;
const TABLE_WIDTH: usize = 100;

/// Presentation band for an AI probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityBand {
    /// 70 and above
    High,
    /// 40 up to 70
    Medium,
    /// Below 40
    Low,
}

impl ProbabilityBand {
    /// Band for a probability in [0, 100].
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 70.0 {
            ProbabilityBand::High
        } else if probability >= 40.0 {
            ProbabilityBand::Medium
        } else {
            ProbabilityBand::Low
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ProbabilityBand::High => "High",
            ProbabilityBand::Medium => "Medium",
            ProbabilityBand::Low => "Low",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            ProbabilityBand::High => "red",
            ProbabilityBand::Medium => "yellow",
            ProbabilityBand::Low => "green",
        }
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an analysis result.
    pub fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Pretty => Ok(self.format_result_pretty(result)),
            OutputFormat::Quiet => Ok(format!("{}\t{}", result.conclusion, result.ai_probability)),
        }
    }

    /// Format a result as a sectioned report.
    fn format_result_pretty(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();
        let band = ProbabilityBand::from_probability(result.ai_probability);

        let _ = writeln!(
            out,
            "{} {}",
            self.heading("Overall Conclusion:"),
            self.colorize(&format!("[ {} ]", result.conclusion), conclusion_color(result.conclusion))
        );
        let _ = writeln!(
            out,
            "{} {}% ({})",
            self.heading("AI-Written Probability:"),
            result.ai_probability,
            band.label()
        );
        let _ = writeln!(
            out,
            "{}",
            self.colorize(&probability_bar(result.ai_probability), band.color())
        );

        let _ = writeln!(out, "\n{}", self.heading("Evidence Breakdown"));
        if result.evidence.is_empty() {
            let _ = writeln!(out, "{}", self.none_reported());
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Signal", "Explanation"]);
            for item in &result.evidence {
                builder.push_record([item.signal.as_str(), item.explanation.as_str()]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .with(Width::wrap(TABLE_WIDTH));
            let _ = writeln!(out, "{}", table);
        }

        let _ = writeln!(out, "\n{}", self.heading("Suspicious Excerpts"));
        if result.suspicious_excerpts.is_empty() {
            let _ = writeln!(out, "{}", self.none_reported());
        }
        for item in &result.suspicious_excerpts {
            let _ = writeln!(out, "  \"{}\"", self.colorize(&item.excerpt, "yellow"));
            let _ = writeln!(out, "    {} {}", self.colorize("Reason:", "yellow"), item.reason);
        }

        let _ = writeln!(out, "\n{}", self.heading("Humanize Suggestions"));
        if result.humanize_suggestions.is_empty() {
            let _ = writeln!(out, "{}", self.none_reported());
        }
        for (index, item) in result.humanize_suggestions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} {}", index + 1, self.colorize("Problem:", "red"), item.problem);
            let _ = writeln!(out, "     {} {}", self.colorize("Fix:", "green"), item.fix);
            let _ = writeln!(out, "     {} \"{}\"", self.colorize("Rewritten example:", "cyan"), item.example);
            let _ = writeln!(out, "     {} {}", self.colorize("Why it works:", "cyan"), item.why);
        }

        let _ = writeln!(out, "\n{}", self.heading("Limitations"));
        let _ = writeln!(out, "  {}", result.limitations);

        let _ = write!(out, "\n{}", self.colorize(DISCLAIMER, "dimmed"));
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, text: &str) -> String {
        self.colorize(text, "bold")
    }

    fn none_reported(&self) -> String {
        self.colorize("  None reported.", "dimmed")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "bold" => text.bold().to_string(),
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}

fn conclusion_color(conclusion: Conclusion) -> &'static str {
    match conclusion {
        Conclusion::AiWritten => "red",
        Conclusion::HumanWritten => "green",
        Conclusion::Uncertain => "yellow",
    }
}

/// Fixed-width bar filled in proportion to `probability`.
fn probability_bar(probability: f64) -> String {
    let filled = ((probability.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
