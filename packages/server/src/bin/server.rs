//! Pomodoro room timer server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pomoroom-server
//! cargo run --bin pomoroom-server -- --host 0.0.0.0 --port 3000 --work-minutes 50
//! ```

use clap::Parser;
use pomoroom_server::{
    bootstrap::build_server,
    config::{Args, ServerConfig},
};
use pomoroom_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(&args);
    let server = build_server(config.timer);

    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
