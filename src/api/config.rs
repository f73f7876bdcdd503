use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `RIDE_RENT_PORT=9000`
pub const ENV_PREFIX: &str = "RIDE_RENT";

/// Configuration for the SEO service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public origin the sitemap URLs are built on
    pub site_url: String,

    /// Base URL of the marketplace backend API
    pub api_base_url: String,

    /// Whole-request timeout for backend calls, in seconds
    pub request_timeout_secs: u64,

    /// Connection timeout for backend calls, in seconds
    pub connect_timeout_secs: u64,

    /// Most pages fetched per category, whatever the backend reports
    pub max_pages: u32,

    /// Records requested per page
    pub page_limit: u32,

    pub user_agent: String,

    /// Directory for log files; logs go to stderr when unset
    pub log_dir: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            site_url: "https://ride.rent".to_string(),
            api_base_url: "http://127.0.0.1:5000/v1/riderent".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_pages: 50,
            page_limit: 100,
            user_agent: "RideRentSeo/1.0".to_string(),
            log_dir: None,
        }
    }
}

impl ApiConfig {
    /// Loads the configuration from an optional file and the environment
    ///
    /// Values are layered as defaults, then the file (format picked from its
    /// extension), then `RIDE_RENT_*` environment variables.
    ///
    /// # Arguments
    /// * `path` - Optional path to a TOML, YAML or JSON configuration file
    ///
    /// # Returns
    /// * `Result<ApiConfig>` - The validated configuration or an error
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: ApiConfig = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects values the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        if self.page_limit == 0 {
            bail!("page_limit must be at least 1");
        }
        for (name, value) in [("site_url", &self.site_url), ("api_base_url", &self.api_base_url)] {
            let parsed = url::Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", name, value))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("{} must start with http:// or https://", name);
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
