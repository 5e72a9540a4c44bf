//! Analysis session: the form behind the REPL and the one-shot command.
//!
//! A session owns the user's draft text, the chosen language and mode, and
//! the outcome of the last analysis. At most one analysis runs at a time.

use penmark_analyzer::{AnalysisError, Analyzer};
use penmark_domain::{AnalysisMode, AnalysisOptions, AnalysisResult, LlmProvider};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Editable form fields and the last outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Draft text
    pub text: String,

    /// Language hint
    pub language: String,

    /// Analysis mode
    pub mode: AnalysisMode,

    /// User-facing message from the last failed run
    pub error: Option<String>,

    /// Result of the last successful run
    pub result: Option<AnalysisResult>,
}

/// Observable session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing has run yet, or the form was reset
    Idle,
    /// A request is outstanding
    InFlight,
    /// The last run produced a result
    Succeeded,
    /// The last run failed
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::InFlight => "analyzing",
            SessionStatus::Succeeded => "done",
            SessionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a call to [`AnalysisSession::run_analysis`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Another analysis was already outstanding; nothing was sent
    AlreadyRunning,
    /// The analysis completed and its result is stored
    Succeeded(AnalysisResult),
    /// The analysis failed; the user-facing message is stored
    Failed(AnalysisError),
}

/// Resets the in-flight flag when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single user's analysis form.
pub struct AnalysisSession<L>
where
    L: LlmProvider,
{
    analyzer: Analyzer<L>,
    form: Mutex<FormState>,
    in_flight: AtomicBool,
}

impl<L> AnalysisSession<L>
where
    L: LlmProvider,
    L::Error: Into<AnalysisError>,
{
    /// Create a session with empty text and the given default options.
    pub fn new(analyzer: Analyzer<L>, defaults: AnalysisOptions) -> Self {
        Self {
            analyzer,
            form: Mutex::new(FormState {
                language: defaults.language,
                mode: defaults.mode,
                ..FormState::default()
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        if self.is_in_flight() {
            return SessionStatus::InFlight;
        }
        let form = self.form();
        if form.error.is_some() {
            SessionStatus::Failed
        } else if form.result.is_some() {
            SessionStatus::Succeeded
        } else {
            SessionStatus::Idle
        }
    }

    /// Copy of the form as it is now.
    pub fn snapshot(&self) -> FormState {
        self.form().clone()
    }

    /// Last stored result, if any.
    pub fn result(&self) -> Option<AnalysisResult> {
        self.form().result.clone()
    }

    /// Last stored error message, if any.
    pub fn error(&self) -> Option<String> {
        self.form().error.clone()
    }

    /// Options the next run would use.
    pub fn options(&self) -> AnalysisOptions {
        let form = self.form();
        AnalysisOptions::new(form.language.clone(), form.mode)
    }

    /// Replace the draft text. Returns false if ignored while in flight.
    pub fn set_text(&self, text: impl Into<String>) -> bool {
        self.edit(|form| form.text = text.into())
    }

    /// Append a line to the draft text.
    pub fn append_text(&self, line: &str) -> bool {
        self.edit(|form| {
            if !form.text.is_empty() {
                form.text.push('\n');
            }
            form.text.push_str(line);
        })
    }

    /// Clear the draft text.
    pub fn clear_text(&self) -> bool {
        self.edit(|form| form.text.clear())
    }

    /// Set the language hint.
    pub fn set_language(&self, language: impl Into<String>) -> bool {
        self.edit(|form| form.language = language.into())
    }

    /// Set the analysis mode.
    pub fn set_mode(&self, mode: AnalysisMode) -> bool {
        self.edit(|form| form.mode = mode)
    }

    /// Analyze the current draft.
    ///
    /// Empty or whitespace-only text is rejected without contacting the
    /// model; the previous result is left in place. Otherwise the previous
    /// outcome is cleared before the request is sent.
    pub async fn run_analysis(&self) -> RunOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Analysis already in flight; ignoring trigger");
            return RunOutcome::AlreadyRunning;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let (text, options) = {
            let mut form = self.form();
            if form.text.trim().is_empty() {
                let err = AnalysisError::EmptyInput;
                form.error = Some(err.user_message());
                return RunOutcome::Failed(err);
            }
            form.error = None;
            form.result = None;
            (
                form.text.clone(),
                AnalysisOptions::new(form.language.clone(), form.mode),
            )
        };

        let outcome = self.analyzer.analyze(&text, &options).await;

        let mut form = self.form();
        match outcome {
            Ok(result) => {
                form.result = Some(result.clone());
                RunOutcome::Succeeded(result)
            }
            Err(err) => {
                form.error = Some(err.user_message());
                RunOutcome::Failed(err)
            }
        }
    }

    fn edit(&self, apply: impl FnOnce(&mut FormState)) -> bool {
        if self.is_in_flight() {
            return false;
        }
        apply(&mut self.form());
        true
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penmark_analyzer::AnalyzerConfig;
    use penmark_llm::MockProvider;

    const REPLY: &str = r#"{"conclusion":"Uncertain","aiProbability":55,"evidence":[],"suspiciousExcerpts":[],"humanizeSuggestions":[],"limitations":"Short text."}"#;

    fn session(provider: MockProvider) -> AnalysisSession<MockProvider> {
        let analyzer = Analyzer::new(provider, AnalyzerConfig::default());
        AnalysisSession::new(analyzer, AnalysisOptions::default())
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session(MockProvider::new(REPLY));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.options(), AnalysisOptions::default());
        assert!(session.snapshot().text.is_empty());
    }

    #[test]
    fn test_append_joins_lines() {
        let session = session(MockProvider::new(REPLY));
        assert!(session.append_text("first"));
        assert!(session.append_text("second"));
        assert_eq!(session.snapshot().text, "first\nsecond");
        assert!(session.clear_text());
        assert!(session.snapshot().text.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_text_never_reaches_model() {
        let provider = MockProvider::new(REPLY);
        let session = session(provider.clone());
        session.set_text("   \n\t ");

        let outcome = session.run_analysis().await;

        assert_eq!(outcome, RunOutcome::Failed(AnalysisError::EmptyInput));
        assert_eq!(session.error().as_deref(), Some("Please enter some text to analyze."));
        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(provider.call_count(), 0);
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn test_success_stores_result_and_options() {
        let provider = MockProvider::new(REPLY);
        let session = session(provider.clone());
        session.set_text("Some text.");
        session.set_language("vi");
        session.set_mode(AnalysisMode::Light);

        let outcome = session.run_analysis().await;

        assert!(matches!(outcome, RunOutcome::Succeeded(_)));
        assert_eq!(session.status(), SessionStatus::Succeeded);
        assert!(session.error().is_none());
        assert!(provider
            .last_prompt()
            .unwrap()
            .contains("Input Text (Language: vi):"));
    }
}
