//! Interactive CLI chat experience for JournaLLM.
//!
//! This module implements the chat loop: timestamped message rendering,
//! a waiting prompt while a reply is pending, slash commands, and error
//! banners. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
