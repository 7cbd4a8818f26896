//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline` so lines can be read while a reply is
//! still pending. The prompt doubles as the typing indicator: it shows the
//! active date range when idle and a waiting marker while an exchange is in
//! flight.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use journallm_types::range::DateRange;

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (untrimmed).
    Line(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Prompt text for the current state.
pub fn prompt_for(range: &DateRange, waiting: bool) -> String {
    if waiting {
        format!("  {} ", style("You (waiting for reply) >").yellow().bold())
    } else {
        format!(
            "  {} {} ",
            style(format!("[{} → {}]", range.start, range.end)).dim(),
            style("You >").green().bold()
        )
    }
}

/// Async input handler.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create the input handler with its initial prompt.
    ///
    /// The returned `SharedWriter` must be used for all output while the
    /// prompt is active, so printed lines do not clobber what the user is
    /// typing.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    /// Read a line of input. Non-empty lines are added to the recall
    /// history.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    let _ = self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear_screen(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exit.
    pub fn finish(mut self) {
        let _ = self.rl.flush();
    }
}
