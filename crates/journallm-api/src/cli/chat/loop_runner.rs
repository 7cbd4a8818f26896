//! Main chat loop orchestration.
//!
//! Reads input and waits on the in-flight exchange at the same time, so the
//! conversation can be cleared or inspected while a reply is pending. New
//! messages typed during that time are refused by the controller's pending
//! gate.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use chrono::Local;
use rustyline_async::SharedWriter;
use tracing::info;

use journallm_core::exchange::ExchangeOutcome;
use journallm_types::chat::ChatMessage;
use journallm_types::error::ValidationError;
use journallm_types::range::DateRange;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, prompt_for};
use super::renderer::ChatRenderer;

type InFlight<'a> = Pin<Box<dyn Future<Output = ExchangeOutcome> + Send + 'a>>;

/// Await the in-flight exchange, or yield `None` at once when there is none
/// so the `select!` branch is disabled for this round.
async fn next_outcome(in_flight: &mut Option<InFlight<'_>>) -> Option<ExchangeOutcome> {
    match in_flight {
        Some(exchange) => Some(exchange.as_mut().await),
        None => None,
    }
}

fn emit(out: &mut SharedWriter, text: &str) {
    let _ = writeln!(out, "{text}");
}

/// Run the interactive chat loop against the configured backend.
pub async fn run_chat_loop(state: &AppState, initial_range: DateRange) -> anyhow::Result<()> {
    let controller = state.controller();
    let renderer = ChatRenderer::new();
    let mut range = initial_range;

    print_welcome_banner(
        &state.api_url,
        &range,
        &controller.conversation_id().to_string(),
    );

    let (mut chat_input, mut out) = ChatInput::new(prompt_for(&range, false))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut in_flight: Option<InFlight<'_>> = None;

    loop {
        tokio::select! {
            Some(outcome) = next_outcome(&mut in_flight) => {
                in_flight = None;
                chat_input.set_prompt(&prompt_for(&range, false));
                match outcome {
                    ExchangeOutcome::Replied(reply) => {
                        let bubble = renderer.bubble(&ChatMessage::assistant(reply), Local::now());
                        emit(&mut out, &bubble);
                    }
                    ExchangeOutcome::Failed(e) => {
                        emit(&mut out, &renderer.error_banner(&e.user_message()));
                    }
                    ExchangeOutcome::Discarded => {
                        emit(&mut out, &renderer.notice("A reply to the cleared conversation was dropped."));
                    }
                }
            }

            event = chat_input.read_line() => match event {
                InputEvent::Eof => {
                    emit(&mut out, &format!("\n{}", renderer.notice("Session ended.")));
                    break;
                }
                InputEvent::Interrupted => {
                    emit(&mut out, &renderer.notice("Press Ctrl+D to exit, or keep chatting."));
                }
                InputEvent::Line(text) => {
                    if let Some(cmd) = commands::parse(&text) {
                        match cmd {
                            ChatCommand::Help => emit(&mut out, &commands::help_text()),
                            ChatCommand::Clear => {
                                controller.clear();
                                emit(&mut out, &renderer.notice("Conversation cleared."));
                            }
                            ChatCommand::Cls => chat_input.clear_screen(),
                            ChatCommand::Exit => {
                                emit(&mut out, &format!("\n{}", renderer.notice("Session ended.")));
                                break;
                            }
                            ChatCommand::History => {
                                emit(&mut out, &renderer.history(&controller.history()));
                            }
                            ChatCommand::ShowRange => {
                                emit(&mut out, &renderer.notice(&format!("Dates: {} → {}", range.start, range.end)));
                            }
                            ChatCommand::SetRange(new_range) => match new_range.validate() {
                                Ok(()) => {
                                    range = new_range;
                                    if in_flight.is_none() {
                                        chat_input.set_prompt(&prompt_for(&range, false));
                                    }
                                    emit(&mut out, &renderer.notice(&format!("Dates set to {} → {}", range.start, range.end)));
                                }
                                Err(e) => emit(&mut out, &renderer.error_banner(&e.to_string())),
                            },
                            ChatCommand::Invalid(hint) => emit(&mut out, &renderer.error_banner(&hint)),
                            ChatCommand::Unknown(name) => {
                                emit(&mut out, &renderer.notice(&format!("Unknown command: {name}. Type /help for available commands.")));
                            }
                        }
                        continue;
                    }

                    match controller.begin(&text, &range) {
                        Ok(exchange) => {
                            let sent = ChatMessage::user(exchange.request().message.clone());
                            emit(&mut out, &renderer.bubble(&sent, Local::now()));
                            chat_input.set_prompt(&prompt_for(&range, true));
                            in_flight = Some(Box::pin(exchange.complete()));
                        }
                        Err(ValidationError::ExchangePending) => {
                            emit(&mut out, &renderer.notice("Still waiting for the previous reply."));
                        }
                        Err(e) if e.is_silent() => {}
                        Err(e) => emit(&mut out, &renderer.error_banner(&e.to_string())),
                    }
                }
            },
        }
    }

    info!(
        conversation = %controller.conversation_id(),
        turns = controller.turn_count(),
        "Chat session ended"
    );
    drop(in_flight);
    chat_input.finish();
    Ok(())
}
