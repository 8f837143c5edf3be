//! EGE score tracking - HTTP service and Telegram bot
//!
//! Two binaries share this crate: `egetrack-api` serves user and score
//! CRUD over a SQLite store, and `egetrack-bot` drives a registration and
//! score-entry conversation on Telegram against that service.

// The lib target only feeds the two binaries, not an external API surface.
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::must_use_candidate)]

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod dialog;
pub mod service;
pub mod telegram;
