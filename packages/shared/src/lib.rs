//! Utilities shared by the Pomoroom packages.

pub mod logger;
pub mod time;
