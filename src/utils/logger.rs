use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global tracing subscriber.
///
/// With a log directory, output goes to a timestamped file inside it.
/// Without one, output goes to stderr so that stdout stays free for
/// generated documents.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    match log_dir {
        Some(dir) => {
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir))?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/ride_rent_seo_{}.log", dir, timestamp);

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter())
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(false)
                .with_ansi(false)
                .with_writer(fs::File::create(&log_file).with_context(|| format!("Failed to create log file {}", log_file))?)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized, writing to {}", log_file);
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter())
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            info!("Logger initialized, writing to stderr");
        }
    }

    Ok(())
}
