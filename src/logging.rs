//! Log output for the dashboard server
//!
//! The log file always receives every enabled event: JSON lines in
//! production, plain text otherwise. The console mirrors everything during
//! local runs, but only warnings and errors when writing JSON, so container
//! output stays readable next to the structured file.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is not set.
///
/// Without `enable_tracing`, per-statement sqlx logs and per-request session
/// rejections are held back; admin refusals still log at warn.
pub fn filter_directive(config: &AppConfig) -> String {
    if config.enable_tracing {
        config.log_level.clone()
    } else {
        format!(
            "{},sqlx=warn,gamestore_admin::user_auth=warn",
            config.log_level
        )
    }
}

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    }
}

pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(config));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let console_layer = fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(LevelFilter::WARN);
        registry.with(file_layer).with(console_layer).init();
    } else {
        let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
        let console_layer = fmt::layer().with_ansi(true);
        registry.with(file_layer).with(console_layer).init();
    }

    guard
}
