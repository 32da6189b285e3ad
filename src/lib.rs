//! cellar — terminal client for a personal beer-cellar inventory.
//!
//! Provides:
//! - `model` — record and draft types, submit-time validation
//! - `store` — record store client (PostgreSQL, in-memory) and the
//!   worker thread that serializes remote operations
//! - `auth` — identity provider abstraction (env, static)
//! - `inventory` — in-memory record list state with change notification
//! - `view` — derived view: filtering, category set, statistics
//! - `editor` — create/edit form buffers and the editing state machine
//! - `prefs` — persisted display preferences (light/dark theme)
//! - `fmt` — shared formatting helpers (ABV, IBU, dates)
//! - `tui` — TUI shell (ratatui/crossterm), state, input, widgets

pub mod auth;
pub mod editor;
pub mod fmt;
pub mod inventory;
pub mod model;
pub mod prefs;
pub mod store;
pub mod tui;
pub mod view;
