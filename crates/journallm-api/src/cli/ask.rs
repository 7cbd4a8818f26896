//! One-shot question command.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use console::style;

use journallm_core::exchange::ExchangeOutcome;
use journallm_types::chat::{ChatMessage, MessageRole};
use journallm_types::range::DateRange;

use crate::cli::chat::renderer::ChatRenderer;
use crate::state::AppState;

/// Send a single message with an empty history and print the reply.
///
/// Validation and transport failures are returned as errors so the process
/// exits non-zero.
pub async fn ask(state: &AppState, message: &str, range: DateRange, json: bool) -> Result<()> {
    let controller = state.controller();
    let exchange = controller.begin(message, &range)?;

    let spinner = indicatif::ProgressBar::new_spinner();
    if json {
        spinner.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    } else if let Ok(spinner_style) =
        indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let sent_at = Local::now();
    let started = Instant::now();
    let outcome = exchange.complete().await;
    spinner.finish_and_clear();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let reply = match outcome {
        ExchangeOutcome::Replied(reply) => reply,
        ExchangeOutcome::Failed(e) => {
            tracing::debug!(error = %e, "Ask failed");
            anyhow::bail!(e.user_message());
        }
        ExchangeOutcome::Discarded => anyhow::bail!("reply was discarded"),
    };

    if json {
        let body = serde_json::json!({
            "response": reply,
            "start_date": range.start,
            "end_date": range.end,
            "response_ms": elapsed_ms,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    print!(
        "{}",
        transcript(&renderer, &controller.history(), sent_at, Local::now())
    );
    println!(
        "\n  {} {:.1}s {} {} → {}\n",
        style("|").dim(),
        style(elapsed_ms as f64 / 1000.0).dim(),
        style("\u{00b7}").dim(),
        style(&range.start).dim(),
        style(&range.end).dim(),
    );
    Ok(())
}

/// Render the exchange with the question stamped when it was sent and the
/// reply stamped when it arrived.
fn transcript(
    renderer: &ChatRenderer,
    history: &[ChatMessage],
    sent_at: DateTime<Local>,
    replied_at: DateTime<Local>,
) -> String {
    history
        .iter()
        .map(|message| {
            let at = match message.role {
                MessageRole::User => sent_at,
                MessageRole::Assistant => replied_at,
            };
            renderer.bubble(message, at)
        })
        .collect()
}
