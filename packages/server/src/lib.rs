//! Shared pomodoro room timer server.
//!
//! Clients join a room over WebSocket and every member of the room sees the
//! same countdown, driven by a single timer engine task.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
pub mod config;
