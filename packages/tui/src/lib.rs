//! Bionic Brokerage TUI - Terminal User Interface for the brokerage assistant
//!
//! Three tabs (AI Concierge, Agent Multiplier, Predictive Hunter) built with
//! ratatui. Gateway calls run on spawned tasks and report back as events.

pub mod app;
pub mod clipboard;
pub mod events;
pub mod input;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::AppState;
