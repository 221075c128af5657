//! Tick driver の実装
//!
//! - `tokio_interval`: `tokio::time::interval` を使った実装

pub mod tokio_interval;

pub use tokio_interval::TokioTickScheduler;
