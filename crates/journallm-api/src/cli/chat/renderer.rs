//! Terminal rendering of chat messages.
//!
//! Each history entry is shown as a bubble: a header with the author and
//! the local time, then the body. Assistant replies are markdown and go
//! through `termimad`; user text is printed as typed.

use chrono::{DateTime, Local};
use console::style;
use termimad::MadSkin;

use journallm_types::chat::{ChatMessage, MessageRole};

/// Longest history preview shown by `/history`, in characters.
const PREVIEW_CHARS: usize = 100;

pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code.set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// A full message bubble stamped with `at`.
    pub fn bubble(&self, message: &ChatMessage, at: DateTime<Local>) -> String {
        let header = format!(
            "  {} {}",
            styled_label(message.role),
            style(format!("· {}", timestamp(at))).dim()
        );
        let body = match message.role {
            MessageRole::User => indent(&message.content),
            MessageRole::Assistant => {
                indent(self.skin.term_text(&message.content).to_string().trim_end())
            }
        };
        format!("\n{header}\n{body}\n")
    }

    /// One-line error banner.
    pub fn error_banner(&self, message: &str) -> String {
        format!("\n  {} {}\n", style("!").red().bold(), style(message).red())
    }

    /// Dim informational line.
    pub fn notice(&self, message: &str) -> String {
        format!("  {}", style(message).dim())
    }

    /// Compact listing of the conversation for `/history`.
    pub fn history(&self, messages: &[ChatMessage]) -> String {
        if messages.is_empty() {
            return self.notice("No messages yet.");
        }
        let mut out = String::new();
        for message in messages {
            out.push_str(&format!(
                "  {} {}\n",
                styled_label(message.role),
                preview(&message.content)
            ));
        }
        out
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "You",
        MessageRole::Assistant => "Assistant",
    }
}

fn styled_label(role: MessageRole) -> String {
    match role {
        MessageRole::User => style(label(role)).green().bold().to_string(),
        MessageRole::Assistant => style(label(role)).cyan().bold().to_string(),
    }
}

fn timestamp(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line of `content`, cut to [`PREVIEW_CHARS`] characters.
fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() > PREVIEW_CHARS {
        let head: String = first_line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else if content.lines().nth(1).is_some() {
        format!("{first_line}...")
    } else {
        first_line.to_string()
    }
}
