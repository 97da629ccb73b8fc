//! Live rendering of a streaming reply

use crate::output::console::ConsoleFormatter;
use allar_application::GenerationProgress;
use allar_domain::{GenerationOutcome, MessageId, Role, SessionId};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Prints each fragment as it lands in the placeholder.
///
/// The controller reports the full accumulated content on every update; only
/// the part not yet on screen is written, so the terminal ends up holding
/// exactly the final reply. A spinner covers the wait for the first fragment.
pub struct StreamRenderer {
    show_spinner: bool,
    state: Mutex<RenderState>,
    out: Mutex<Box<dyn Write + Send>>,
}

#[derive(Default)]
struct RenderState {
    spinner: Option<ProgressBar>,
    /// Bytes of the current reply already written.
    printed: usize,
}

impl StreamRenderer {
    pub fn new(show_spinner: bool) -> Self {
        Self::with_writer(show_spinner, Box::new(io::stdout()))
    }

    pub fn with_writer(show_spinner: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            show_spinner,
            state: Mutex::new(RenderState::default()),
            out: Mutex::new(out),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.yellow} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn state(&self) -> MutexGuard<'_, RenderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// The part of `content` past the first `printed` bytes.
///
/// Falls back to the whole content if it no longer extends what was printed.
fn unprinted(content: &str, printed: usize) -> (&str, bool) {
    match content.get(printed..) {
        Some(rest) => (rest, false),
        None => (content, true),
    }
}

impl GenerationProgress for StreamRenderer {
    fn on_generation_start(&self, _session_id: &SessionId, _placeholder_id: &MessageId) {
        let mut state = self.state();
        state.printed = 0;
        self.write(&format!("\n{}\n  ", ConsoleFormatter::message_label(Role::Assistant, ' ')));

        if self.show_spinner {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(Self::spinner_style());
            spinner.set_message("Synthesizing strategy...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            state.spinner = Some(spinner);
        }
    }

    fn on_content_updated(&self, _session_id: &SessionId, _message_id: &MessageId, content: &str) {
        let mut state = self.state();
        if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }

        let (rest, restarted) = unprinted(content, state.printed);
        if restarted {
            self.write("\n  ");
        }
        self.write(&rest.replace('\n', "\n  "));
        state.printed = content.len();
    }

    fn on_generation_end(&self, outcome: &GenerationOutcome) {
        let mut state = self.state();
        if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }
        state.printed = 0;

        match outcome {
            GenerationOutcome::Completed => self.write("\n\n"),
            GenerationOutcome::Failed(reason) => self.write(&format!(
                "\n{}\n\n",
                ConsoleFormatter::error(&format!("Generation failed: {}", reason))
            )),
        }
    }
}
