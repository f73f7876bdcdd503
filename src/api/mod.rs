pub mod config;
pub mod handlers;
pub mod models;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::api::config::ApiConfig;
use crate::api::handlers::{health_check, robots_handler, sitemap_handler};
use crate::sitemap::{find_country, render_sitemap, BackendClient, SitemapAggregator, COUNTRIES};

/// State shared by all request handlers
pub struct AppState {
    pub aggregator: SitemapAggregator,
    pub site_url: String,
    pub started_at: Instant,
}

impl AppState {
    /// Builds the backend client and aggregator from the configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Arc::new(BackendClient::new(config)?);
        Ok(Self {
            aggregator: SitemapAggregator::new(client, config.site_url.clone()),
            site_url: config.site_url.clone(),
            started_at: Instant::now(),
        })
    }
}

/// A sitemap built outside the HTTP server
#[derive(Debug, Clone)]
pub struct GeneratedSitemap {
    pub xml: String,
    pub entry_count: usize,
    /// The backend failed and only static pages were rendered
    pub fallback: bool,
}

/// Builds and renders one country sitemap, as the `generate` command does
///
/// # Arguments
/// * `config` - Service configuration (backend, paging limits, site URL)
/// * `country_code` - Country to build, e.g. `ae`
///
/// # Returns
/// * `Result<GeneratedSitemap>` - The rendered XML, which is the static-page
///   fallback when the backend failed, or an error for an unknown country
#[instrument(skip(config))]
pub async fn generate_sitemap(config: &ApiConfig, country_code: &str) -> Result<GeneratedSitemap> {
    let country = find_country(country_code)
        .with_context(|| format!("Unknown country code '{}'", country_code))?;
    let state = AppState::new(config)?;

    let outcome = state.aggregator.build(country).await;
    if outcome.is_fallback() {
        error!("Sitemap for {} fell back to static pages", country.country_code);
    } else {
        info!("Generated {} entries for {}", outcome.entries().len(), country.country_code);
    }

    Ok(GeneratedSitemap {
        xml: render_sitemap(outcome.entries()),
        entry_count: outcome.entries().len(),
        fallback: outcome.is_fallback(),
    })
}

/// Registers every route of the service
///
/// Each country gets its own `/{code}/sitemap.xml` resource, so an unknown
/// country never reaches the sitemap handler.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for country in COUNTRIES {
        let path = format!("/{}/sitemap.xml", country.country_code);
        debug!("Registering sitemap route {}", path);
        cfg.route(
            &path,
            web::get().to(move |state: web::Data<AppState>| sitemap_handler(state, country)),
        );
    }
    cfg.route("/robots.txt", web::get().to(robots_handler))
        .route("/health", web::get().to(health_check));
}

/// Starts the HTTP server with the specified configuration
///
/// # Arguments
/// * `config` - Service configuration (bind address, backend, paging limits)
///
/// # Returns
/// * `Result<()>` - Success once the server stops, or an error
#[instrument(skip_all, fields(host = %config.host, port = config.port))]
pub async fn start_server(config: ApiConfig) -> Result<()> {
    info!("Starting SEO service on {}:{}", config.host, config.port);

    let state = web::Data::new(AppState::new(&config)?);

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", config.host, config.port, e);
        e
    })?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
