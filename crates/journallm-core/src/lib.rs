//! Conversation logic for the JournaLLM chat client.
//!
//! This crate defines the `ChatTransport` port that the infrastructure
//! layer implements, and the `ChatController` that drives one backend
//! exchange per user turn. It depends only on `journallm-types` -- never on
//! `journallm-infra` or any HTTP crate.

pub mod exchange;
pub mod transport;
