// Session state store.
// Holds per-language buffers, stdin, the output channel and the run lifecycle.

use tracing::{debug, warn};

use crate::execution::{ExecutionRequest, ExecutionResult};
use crate::language::LanguageId;

/// Placeholder shown in the output channel while a run is in flight.
pub const RUNNING_PLACEHOLDER: &str = "Running code...";

/// Prefix that marks failure text in the output channel.
pub const ERROR_PREFIX: &str = "Error: ";

/// Source text for every supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    cpp: String,
    javascript: String,
    java: String,
    python: String,
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self {
            cpp: LanguageId::Cpp.starter_template().to_string(),
            javascript: LanguageId::Javascript.starter_template().to_string(),
            java: LanguageId::Java.starter_template().to_string(),
            python: LanguageId::Python.starter_template().to_string(),
        }
    }
}

impl CodeBuffer {
    pub fn get(&self, lang: LanguageId) -> &str {
        match lang {
            LanguageId::Cpp => &self.cpp,
            LanguageId::Javascript => &self.javascript,
            LanguageId::Java => &self.java,
            LanguageId::Python => &self.python,
        }
    }

    fn slot_mut(&mut self, lang: LanguageId) -> &mut String {
        match lang {
            LanguageId::Cpp => &mut self.cpp,
            LanguageId::Javascript => &mut self.javascript,
            LanguageId::Java => &mut self.java,
            LanguageId::Python => &mut self.python,
        }
    }

    pub fn set(&mut self, lang: LanguageId, text: impl Into<String>) {
        *self.slot_mut(lang) = text.into();
    }
}

/// Run lifecycle. `Idle --begin_run--> Running --complete_run--> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
}

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

/// All editor and run state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    buffer: CodeBuffer,
    active_language: LanguageId,
    stdin: String,
    output: String,
    output_is_error: bool,
    phase: RunPhase,
    theme: Theme,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    pub fn active_language(&self) -> LanguageId {
        self.active_language
    }

    /// Buffer contents of the active language.
    pub fn active_code(&self) -> &str {
        self.buffer.get(self.active_language)
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Whether the output channel currently holds failure text.
    pub fn output_is_error(&self) -> bool {
        self.output_is_error
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Select which buffer subsequent edits and runs target. Buffers are untouched.
    pub fn set_active_language(&mut self, lang: LanguageId) {
        debug!(from = %self.active_language, to = %lang, "switching language");
        self.active_language = lang;
    }

    /// Replace one language's buffer, leaving the others as they are.
    pub fn update_buffer(&mut self, lang: LanguageId, text: impl Into<String>) {
        self.buffer.set(lang, text);
    }

    pub fn set_stdin(&mut self, text: impl Into<String>) {
        self.stdin = text.into();
    }

    /// Move to `Running` and snapshot the request to send.
    ///
    /// Returns `None` without touching any state if a run is already in flight.
    /// The check and the transition happen in this one call, so two overlapping
    /// runs can never both be accepted.
    pub fn begin_run(&mut self) -> Option<ExecutionRequest> {
        if self.is_running() {
            debug!("run rejected: already running");
            return None;
        }

        let request = ExecutionRequest::from_session(self);
        self.phase = RunPhase::Running;
        self.output = RUNNING_PLACEHOLDER.to_string();
        self.output_is_error = false;
        Some(request)
    }

    /// Apply the outcome of the in-flight run and return to `Idle`.
    pub fn complete_run(&mut self, result: ExecutionResult) {
        if !self.is_running() {
            warn!("completing a run that was never started");
        }

        self.output_is_error = !result.is_success();
        self.output = result.into_output_text();
        self.phase = RunPhase::Idle;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_has_starter_code_everywhere() {
        let session = SessionState::new();
        for lang in LanguageId::ALL {
            assert!(!session.buffer().get(lang).is_empty());
            assert_eq!(session.buffer().get(lang), lang.starter_template());
        }
        assert_eq!(session.active_language(), LanguageId::Cpp);
        assert_eq!(session.output(), "");
        assert_eq!(session.phase(), RunPhase::Idle);
        assert_eq!(session.theme(), Theme::Dark);
    }

    #[test]
    fn test_language_switch_keeps_buffers() {
        let mut session = SessionState::new();
        session.update_buffer(LanguageId::Python, "print(1)");
        session.set_active_language(LanguageId::Java);
        session.set_active_language(LanguageId::Python);

        assert_eq!(session.active_code(), "print(1)");
        assert_eq!(
            session.buffer().get(LanguageId::Java),
            LanguageId::Java.starter_template()
        );
    }

    #[test]
    fn test_set_active_language_changes_nothing_else() {
        let mut session = SessionState::new();
        session.set_stdin("42");
        let before = session.clone();

        session.set_active_language(LanguageId::Javascript);

        assert_eq!(session.active_language(), LanguageId::Javascript);
        assert_eq!(session.buffer(), before.buffer());
        assert_eq!(session.stdin(), before.stdin());
        assert_eq!(session.output(), before.output());
        assert_eq!(session.phase(), before.phase());
    }

    #[test]
    fn test_update_inactive_buffer() {
        let mut session = SessionState::new();
        session.update_buffer(LanguageId::Java, "class X{}");

        assert_eq!(session.active_language(), LanguageId::Cpp);
        assert_eq!(session.active_code(), LanguageId::Cpp.starter_template());
        assert_eq!(session.buffer().get(LanguageId::Java), "class X{}");
    }

    #[test]
    fn test_begin_run_sets_placeholder() {
        let mut session = SessionState::new();
        session.set_stdin("5");

        let request = session.begin_run().expect("idle session accepts a run");

        assert!(session.is_running());
        assert_eq!(session.output(), RUNNING_PLACEHOLDER);
        assert_eq!(request.language, LanguageId::Cpp);
        assert_eq!(request.input, "5\n");
    }

    #[test]
    fn test_begin_run_twice_is_rejected() {
        let mut session = SessionState::new();
        assert!(session.begin_run().is_some());
        let after_first = session.clone();

        assert!(session.begin_run().is_none());
        assert_eq!(session, after_first);
    }

    #[test]
    fn test_complete_run_success() {
        let mut session = SessionState::new();
        session.begin_run();
        session.complete_run(ExecutionResult::Success {
            output: "Hello\n".to_string(),
        });

        assert_eq!(session.output(), "Hello\n");
        assert!(!session.output_is_error());
        assert!(!session.is_running());
    }

    #[test]
    fn test_complete_run_failure_is_marked() {
        let mut session = SessionState::new();
        session.begin_run();
        session.complete_run(ExecutionResult::Failure {
            message: "SyntaxError: unexpected token".to_string(),
        });

        assert_eq!(session.output(), "Error: SyntaxError: unexpected token");
        assert!(session.output_is_error());
        assert_eq!(session.phase(), RunPhase::Idle);
    }

    #[test]
    fn test_edits_after_begin_do_not_touch_request() {
        let mut session = SessionState::new();
        session.update_buffer(LanguageId::Cpp, "int main(){}");
        let request = session.begin_run().unwrap();

        session.update_buffer(LanguageId::Cpp, "changed");
        session.set_stdin("late");
        session.set_active_language(LanguageId::Python);

        assert_eq!(request.code, "int main(){}");
        assert_eq!(request.language, LanguageId::Cpp);
        assert_eq!(request.input, "\n");
    }

    #[test]
    fn test_new_run_replaces_previous_output() {
        let mut session = SessionState::new();
        session.begin_run();
        session.complete_run(ExecutionResult::Failure {
            message: "boom".to_string(),
        });

        session.begin_run();
        assert_eq!(session.output(), RUNNING_PLACEHOLDER);
        assert!(!session.output_is_error());

        session.complete_run(ExecutionResult::Success {
            output: "ok".to_string(),
        });
        assert_eq!(session.output(), "ok");
    }

    #[test]
    fn test_toggle_theme() {
        let mut session = SessionState::new();
        session.toggle_theme();
        assert_eq!(session.theme(), Theme::Light);
        session.toggle_theme();
        assert_eq!(session.theme(), Theme::Dark);
    }
}
