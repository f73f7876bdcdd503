use serde::Serialize;

/// Health status response for the /health endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Status indicator, always "healthy" while the process serves requests
    pub status: String,

    /// Country codes with a sitemap endpoint
    pub countries: Vec<String>,

    /// Seconds since the server started
    pub uptime_secs: u64,
}
