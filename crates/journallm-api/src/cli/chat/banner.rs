//! Welcome banner display for chat sessions.

use console::style;

use journallm_types::range::DateRange;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the backend URL, the journal date window, and the first eight
/// characters of the conversation ID used in log lines.
pub fn print_welcome_banner(api_url: &str, range: &DateRange, conversation_id: &str) {
    println!();
    println!(
        "  {} {}",
        style("*").cyan().bold(),
        style("Journal assistant").cyan().bold()
    );
    println!(
        "  {}",
        style("Answers are grounded in your journal entries for the selected dates.").dim()
    );
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(api_url).dim());
    println!(
        "  {}  {} → {}",
        style("Dates:").bold(),
        style(&range.start).dim(),
        style(&range.end).dim()
    );
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&conversation_id[..8.min(conversation_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, exit or Ctrl+D to leave").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
