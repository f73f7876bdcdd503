use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

use super::country::{CountryConfig, HttpMethod, SitemapCategory};
use crate::api::config::ApiConfig;

/// Envelope every paginated backend response is wrapped in
#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    pub result: PageResult<T>,
}

/// One page of a backend resource list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub page: String,                 // Echoed by the backend as a string
    #[serde(default)]
    pub total_number_of_pages: u32,
}

/// JSON body for listing endpoints that take POST
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRequest<'a> {
    page: u32,
    limit: u32,
    country_id: &'a str,
}

/// HTTP client for the marketplace backend's paginated listing endpoints
///
/// Built once per process and shared; the underlying `reqwest::Client`
/// keeps its own connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    api_base_url: String,
    page_limit: u32,
    max_pages: u32,
}

impl BackendClient {
    /// Creates a backend client from the service configuration
    ///
    /// # Arguments
    /// * `config` - Service configuration holding the backend URL, timeouts and paging limits
    ///
    /// # Returns
    /// * `Result<BackendClient>` - A ready client or an error if the HTTP client could not be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        debug!("Initializing backend client for {} with user agent: {}", config.api_base_url, config.user_agent);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        match HeaderValue::from_str(&config.user_agent) {
            Ok(value) => {
                headers.insert(USER_AGENT, value);
            }
            Err(e) => {
                error!("Invalid user agent string '{}': {}", config.user_agent, e);
                return Err(e).context("Failed to create User-Agent header");
            }
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            page_limit: config.page_limit,
            max_pages: config.max_pages,
        })
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetches a single page of a category's resource list
    ///
    /// # Arguments
    /// * `category` - Resource category; must have a backend endpoint
    /// * `country` - Country whose records are requested
    /// * `page` - 1-based page number
    ///
    /// # Returns
    /// * `Result<PageResult<T>>` - The decoded page or an error on transport, status or JSON failure
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        category: SitemapCategory,
        country: &CountryConfig,
        page: u32,
    ) -> Result<PageResult<T>> {
        let endpoint = category
            .endpoint()
            .with_context(|| format!("Category {} has no backend endpoint", category))?;
        let url = format!("{}{}", self.api_base_url, endpoint.path);

        trace!("Requesting {} page {} from {}", category, page, url);
        let request = match endpoint.method {
            HttpMethod::Get => self.client.get(&url).query(&[
                ("page", page.to_string()),
                ("limit", self.page_limit.to_string()),
                ("countryId", country.country_id.to_string()),
            ]),
            HttpMethod::Post => self.client.post(&url).json(&PageRequest {
                page,
                limit: self.page_limit,
                country_id: country.country_id,
            }),
        };

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        debug!("Response status for {} page {}: {}", category, page, response.status());
        let response = response
            .error_for_status()
            .with_context(|| format!("Backend rejected {} page {}", category, page))?;

        let envelope: PageEnvelope<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {} page {}", category, page))?;

        Ok(envelope.result)
    }

    /// Fetches every page of a category, one request at a time
    ///
    /// Stops once the backend's reported page count is reached or the
    /// configured page ceiling is hit, whichever comes first. Each page gets
    /// one attempt; the first failure aborts the whole category.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        category: SitemapCategory,
        country: &CountryConfig,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let result = self.fetch_page::<T>(category, country, page).await?;
            let total_pages = result.total_number_of_pages;
            trace!(
                "{} page {} (backend page '{}') returned {} records of {} pages",
                category, page, result.page, result.list.len(), total_pages
            );
            records.extend(result.list);

            if page >= total_pages {
                break;
            }
            if page >= self.max_pages {
                warn!(
                    "Stopping {} for {} at page ceiling {} of {} reported pages",
                    category, country.country_code, self.max_pages, total_pages
                );
                break;
            }
            page += 1;
        }

        info!("Fetched {} {} records for {} over {} pages", records.len(), category, country.country_code, page);
        Ok(records)
    }
}
