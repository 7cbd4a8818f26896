//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. The bare words `exit` and `quit` also end the
//! session.

use console::style;

use journallm_types::range::{DateRange, parse_date};

/// Available commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Reset the conversation history.
    Clear,
    /// Clear the terminal screen.
    Cls,
    /// Exit the chat session.
    Exit,
    /// Show the conversation so far.
    History,
    /// Show the current date range.
    ShowRange,
    /// Switch to a new date range.
    SetRange(DateRange),
    /// A known command used wrongly; carries the usage hint.
    Invalid(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a chat command.
///
/// Returns `None` for ordinary messages.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(ChatCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/cls" => Some(ChatCommand::Cls),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/range" => Some(parse_range(&args)),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

fn parse_range(args: &[&str]) -> ChatCommand {
    match args {
        [] => ChatCommand::ShowRange,
        [start, end] => match (parse_date(start), parse_date(end)) {
            (Ok(start), Ok(end)) => ChatCommand::SetRange(DateRange::from_dates(start, end)),
            (Err(e), _) | (_, Err(e)) => ChatCommand::Invalid(e.to_string()),
        },
        _ => ChatCommand::Invalid("usage: /range <start> <end> (YYYY-MM-DD)".to_string()),
    }
}

/// The help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Start the conversation over"),
        ("/cls", "Clear the screen"),
        ("/history", "Show the conversation so far"),
        ("/range", "Show or set the journal dates: /range <start> <end>"),
        ("/exit", "End the chat session"),
    ];

    let mut text = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, description) in rows {
        text.push_str(&format!("  {:<10} {description}\n", style(cmd).cyan()));
    }
    text.push_str(&format!(
        "\n  {}\n",
        style("Ctrl+D to exit, Ctrl+C keeps the session").dim()
    ));
    text
}
