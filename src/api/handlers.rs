use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse, Responder};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::api::models::HealthStatus;
use crate::api::AppState;
use crate::sitemap::{render_sitemap, CountryConfig, COUNTRIES};

/// Seconds crawlers and CDNs may cache a successful sitemap
const SITEMAP_MAX_AGE: u32 = 3600;

/// HTTP handler for a country sitemap
///
/// Always answers with a well-formed XML document: 200 with the full
/// sitemap, or 500 with the static pages when aggregation failed.
///
/// # Arguments
/// * `state` - Shared application state holding the aggregator
/// * `country` - Country bound to this route at registration time
///
/// # Returns
/// * `application/xml` response
#[instrument(skip_all, fields(country = country.country_code, request_id = %Uuid::new_v4()))]
pub async fn sitemap_handler(state: web::Data<AppState>, country: &'static CountryConfig) -> HttpResponse {
    info!("Received sitemap request for {}", country.country_code);

    let outcome = state.aggregator.build(country).await;
    let body = render_sitemap(outcome.entries());
    debug!("Rendered {} entries into {} bytes", outcome.entries().len(), body.len());

    if outcome.is_fallback() {
        warn!("Serving fallback sitemap for {}", country.country_code);
        return HttpResponse::InternalServerError()
            .content_type("application/xml")
            .insert_header(CacheControl(vec![CacheDirective::NoStore]))
            .body(body);
    }

    HttpResponse::Ok()
        .content_type("application/xml")
        .insert_header(CacheControl(vec![CacheDirective::Public, CacheDirective::MaxAge(SITEMAP_MAX_AGE)]))
        .body(body)
}

/// Serves robots.txt pointing crawlers at every country sitemap
#[instrument(skip_all)]
pub async fn robots_handler(state: web::Data<AppState>) -> impl Responder {
    let site_url = state.site_url.trim_end_matches('/');
    let mut body = String::from("User-agent: *\nAllow: /\n\n");
    for country in COUNTRIES {
        body.push_str(&format!("Sitemap: {}/{}/sitemap.xml\n", site_url, country.country_code));
    }

    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(body)
}

/// Health check endpoint for monitoring service status
#[instrument(skip_all)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime_secs = state.started_at.elapsed().as_secs();
    debug!("Health check: uptime={}s", uptime_secs);

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        countries: COUNTRIES.iter().map(|c| c.country_code.to_string()).collect(),
        uptime_secs,
    })
}
