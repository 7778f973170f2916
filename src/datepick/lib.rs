//! # Datepick Architecture
//!
//! Datepick is a **UI-agnostic calendar picker engine**. It is a library that
//! happens to ship a terminal client, not a terminal tool with some library
//! code attached.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, replays scripts, prints calendars      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, per-picker handles            │
//! │  - Every call enters as an origin call                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Picker operations, pair relay, user intents              │
//! │  - Operates on a Workspace, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (registry, model, host, render)                │
//! │  - Registry of live pickers and pair slots                  │
//! │  - In-memory host document, Renderer trait                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Range pairs
//!
//! Two pickers created with the same `id` option form a range. They refer to
//! each other through [`model::PickerId`] handles held by the registry, never
//! through references, and every mutating command carries a
//! [`commands::Relay`] flag that limits forwarding to one hop.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr. Redraws go through
//! [`render::Renderer`]; what a redraw means is up to the client.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests against a [`render::ViewCache`].
//! 2. **API**: dispatch tests.
//! 3. **CLI**: integration tests driving the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Picker operations and intent dispatch
//! - [`registry`]: Live pickers, pair slots, listener lifecycle
//! - [`model`]: Picker state and value types
//! - [`view`]: The render data contract
//! - [`render`]: Renderer trait and implementations
//! - [`host`]: In-memory host document
//! - [`dates`]: Calendar arithmetic
//! - [`constraints`]: Selectability rules
//! - [`config`]: Picker options and CLI configuration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod constraints;
pub mod dates;
pub mod error;
pub mod host;
pub mod model;
pub mod registry;
pub mod render;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
