use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ride_rent_seo::api::config::ApiConfig;
use ride_rent_seo::api::{generate_sitemap, start_server};
use ride_rent_seo::utils::logger::init_logger;

#[derive(Debug, Parser)]
#[command(name = "ride_rent_seo", version, about = "Sitemap service for the Ride.Rent marketplace")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Build one country sitemap and print it to stdout
    Generate {
        /// Country code, e.g. "ae"
        #[arg(long)]
        country: String,
    },
}

#[actix_web::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = ApiConfig::load(cli.config.as_deref())?;
    init_logger(config.log_dir.as_deref()).context("Failed to initialize logger")?;
    info!("Configuration loaded: backend={}, site={}", config.api_base_url, config.site_url);

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            start_server(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate { country } => {
            let sitemap = generate_sitemap(&config, &country).await?;
            print!("{}", sitemap.xml);

            // Fallback output is still printed
            if sitemap.fallback {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
