//! Command line configuration.

use std::time::Duration;

use clap::Parser;

use crate::domain::PhaseDurations;

/// Command line arguments of `pomoroom-server`
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pomoroom-server")]
#[command(about = "Shared pomodoro room timer server over WebSocket", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to (0 picks a free port)
    #[arg(short = 'p', long, default_value = "8080")]
    pub port: u16,

    /// Work phase length used when a room is created without settings
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub work_minutes: u32,

    /// Break phase length used when a room is created without settings
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub break_minutes: u32,

    /// Countdown period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval_ms: u64,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

/// Timer engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Phase lengths for rooms joined without (valid) settings
    pub defaults: PhaseDurations,
    pub tick_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            defaults: PhaseDurations::default(),
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timer: TimerConfig,
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            timer: TimerConfig {
                // at most 1440 * 60 by the clap range, no overflow
                defaults: PhaseDurations::new(args.work_minutes * 60, args.break_minutes * 60),
                tick_interval: Duration::from_millis(args.tick_interval_ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        // テスト項目: 引数無しのデフォルト値
        // given (前提条件):
        let args = Args::parse_from(["pomoroom-server"]);

        // when (操作):
        let config = ServerConfig::from(&args);

        // then (期待する結果):
        assert_eq!(args.log_level, "debug");
        assert_eq!(
            config,
            ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                timer: TimerConfig::default(),
            }
        );
    }

    #[test]
    fn test_custom_args() {
        // テスト項目: 各オプションが設定に反映される
        // given (前提条件):
        let args = Args::parse_from([
            "pomoroom-server",
            "-H",
            "0.0.0.0",
            "-p",
            "3000",
            "--work-minutes",
            "50",
            "--break-minutes",
            "10",
            "--tick-interval-ms",
            "20",
        ]);

        // when (操作):
        let config = ServerConfig::from(&args);

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.timer.defaults, PhaseDurations::new(3000, 600));
        assert_eq!(config.timer.tick_interval, Duration::from_millis(20));
    }

    #[test]
    fn test_minutes_out_of_range_rejected() {
        // テスト項目: 0 分や 1440 分を超える指定は拒否される
        for value in ["0", "1441"] {
            // when (操作):
            let result = Args::try_parse_from(["pomoroom-server", "--work-minutes", value]);

            // then (期待する結果):
            assert!(result.is_err(), "value: {}", value);
        }
    }
}
