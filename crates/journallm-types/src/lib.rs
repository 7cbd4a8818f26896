//! Shared domain types for the JournaLLM chat client.
//!
//! This crate contains the types used across the workspace: conversation
//! messages, the journal date range, the backend wire format, client
//! configuration, and the error types for validation and transport.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod range;
pub mod wire;
