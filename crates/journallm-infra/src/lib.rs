//! Infrastructure layer for JournaLLM.
//!
//! Contains the implementation of the `ChatTransport` port defined in
//! `journallm-core` (a reqwest client for the journal backend) and the
//! loader for the client's `config.toml`.

pub mod config;
pub mod http;
