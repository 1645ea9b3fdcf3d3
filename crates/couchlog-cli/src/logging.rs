use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter from the -v count: 0 = info, 1 = debug with the noisy hyper
/// targets capped, 2+ = full trace. RUST_LOG wins when set.
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let default = match verbose_level {
        0 => "info",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);

    // JSON when piped or forced, matching the structured-log expectation
    // of container deployments
    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    match log_file {
        Some(log_path) => {
            let log_dir = log_path
                .parent()
                .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
            std::fs::create_dir_all(log_dir)?;
            let log_filename = log_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
            // Rotation prefix without the extension, so daily files come
            // out as couchlog.log, couchlog.log.2026-08-05, ...
            let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

            if json {
                registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer(appender),
                    )
                    .init();
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(appender),
                    )
                    .init();
            }
        }
        None => {
            if json {
                registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer(io::stderr),
                    )
                    .init();
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer(io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
