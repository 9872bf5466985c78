// App state and main event loop.
// Routes keys to the session store, dispatches runs, and applies their results.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::CodeNestError;
use crate::execution::{ExecutionClient, ExecutionResult};
use crate::export;
use crate::language::LanguageId;
use crate::state::{Console, SessionState, TextCursor};
use crate::ui;

/// Which text surface receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Stdin,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Editor => Focus::Stdin,
            Focus::Stdin => Focus::Editor,
        }
    }
}

/// Main application state.
pub struct App {
    pub session: SessionState,
    pub focus: Focus,
    /// One cursor per language buffer, so switching back restores the position.
    editor_cursors: HashMap<LanguageId, TextCursor>,
    pub stdin_cursor: TextCursor,
    pub console: Console,
    pub show_help: bool,
    pub should_quit: bool,
    client: Arc<ExecutionClient>,
    export_dir: PathBuf,
    results_tx: UnboundedSender<ExecutionResult>,
    results_rx: UnboundedReceiver<ExecutionResult>,
}

impl App {
    pub fn new(client: ExecutionClient, export_dir: PathBuf) -> Self {
        let session = SessionState::new();
        let editor_cursors = LanguageId::ALL
            .into_iter()
            .map(|lang| (lang, TextCursor::at_end(session.buffer().get(lang))))
            .collect();
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            session,
            focus: Focus::default(),
            editor_cursors,
            stdin_cursor: TextCursor::default(),
            console: Console::default(),
            show_help: false,
            should_quit: false,
            client: Arc::new(client),
            export_dir,
            results_tx,
            results_rx,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.apply_results();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Cursor of the active language's buffer.
    pub fn editor_cursor(&self) -> TextCursor {
        self.editor_cursors
            .get(&self.session.active_language())
            .copied()
            .unwrap_or_default()
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('r') => self.start_run(),
                KeyCode::Char('s') => self.export(),
                KeyCode::Char('t') => self.session.toggle_theme(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::F(2) => self.switch_language(self.session.active_language().next()),
            KeyCode::F(3) => self.switch_language(self.session.active_language().prev()),
            KeyCode::Tab => self.focus = self.focus.toggle(),
            _ => self.edit(key.code),
        }
    }

    fn switch_language(&mut self, lang: LanguageId) {
        self.session.set_active_language(lang);
        info!(language = %lang, "language selected");
        self.console
            .log_info(format!("Language: {}", lang.display_name()));
    }

    /// Apply an editing key to the focused surface.
    fn edit(&mut self, code: KeyCode) {
        match self.focus {
            Focus::Editor => {
                let lang = self.session.active_language();
                let mut cursor = self.editor_cursor();
                if let Some(text) = apply_edit(&mut cursor, self.session.active_code(), code) {
                    self.session.update_buffer(lang, text);
                }
                self.editor_cursors.insert(lang, cursor);
            }
            Focus::Stdin => {
                let mut cursor = self.stdin_cursor;
                if let Some(text) = apply_edit(&mut cursor, self.session.stdin(), code) {
                    self.session.set_stdin(text);
                }
                self.stdin_cursor = cursor;
            }
        }
    }

    /// Begin a run and send it on a background task.
    fn start_run(&mut self) {
        let Some(request) = self.session.begin_run() else {
            self.console.log_warn("A run is already in progress");
            return;
        };

        self.console
            .log_info(format!("Running {} code", request.language.display_name()));

        let client = Arc::clone(&self.client);
        let run = tokio::spawn(async move { client.run(&request).await });

        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = join_run(run).await;
            // Receiver only goes away when the app is shutting down.
            let _ = tx.send(result);
        });
    }

    /// Complete the in-flight run with any result that has arrived.
    fn apply_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.record_result(result);
        }
    }

    fn record_result(&mut self, result: ExecutionResult) {
        match &result {
            ExecutionResult::Success { .. } => self.console.log_info("Run finished"),
            ExecutionResult::Failure { message } => {
                self.console.log_error(format!("Run failed: {}", message))
            }
        }
        self.session.complete_run(result);
    }

    fn export(&mut self) {
        match export::save_export(&self.session, &self.export_dir) {
            Ok(path) => self
                .console
                .log_info(format!("Saved {}", path.display())),
            Err(e @ CodeNestError::EmptyBuffer { .. }) => {
                self.console.log_warn(format!("Export skipped: {}", e))
            }
            Err(e) => self.console.log_error(format!("Export failed: {}", e)),
        }
    }
}

/// Wait for a spawned run. A task that panicked or was cancelled still
/// yields a failure, so the session always leaves `Running`.
async fn join_run(run: JoinHandle<ExecutionResult>) -> ExecutionResult {
    run.await.unwrap_or_else(|e| {
        error!(error = %e, "run task ended without a result");
        ExecutionResult::Failure {
            message: format!("run did not complete: {}", e),
        }
    })
}

/// Apply an editing key through `cursor`. Returns the new text when it changed.
fn apply_edit(cursor: &mut TextCursor, text: &str, code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(cursor.insert(text, c)),
        KeyCode::Enter => Some(cursor.insert(text, '\n')),
        KeyCode::Backspace => cursor.backspace(text),
        KeyCode::Delete => cursor.delete(text),
        KeyCode::Left => {
            cursor.move_left(text);
            None
        }
        KeyCode::Right => {
            cursor.move_right(text);
            None
        }
        KeyCode::Up => {
            cursor.move_up(text);
            None
        }
        KeyCode::Down => {
            cursor.move_down(text);
            None
        }
        KeyCode::Home => {
            cursor.move_home(text);
            None
        }
        KeyCode::End => {
            cursor.move_end(text);
            None
        }
        _ => None,
    }
}
