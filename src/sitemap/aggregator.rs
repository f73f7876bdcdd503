use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::client::BackendClient;
use super::country::{CountryConfig, SitemapCategory};
use super::entry::{ChangeFrequency, SitemapEntry};
use super::records::{
    BlogRecord, BrandRecord, CategoryRecord, CityListingRecord, CompanyRecord, EntryContext,
    ListingRecord, SitemapRecord, StateRecord, VehicleRecord, VehicleSeriesRecord,
};

/// Pages that exist for every country regardless of backend content
const STATIC_PAGES: &[(&str, ChangeFrequency, f32)] = &[
    ("", ChangeFrequency::Daily, 1.0),
    ("about-us", ChangeFrequency::Monthly, 0.5),
    ("faq", ChangeFrequency::Monthly, 0.5),
    ("privacy-policy", ChangeFrequency::Monthly, 0.5),
    ("terms-condition", ChangeFrequency::Monthly, 0.5),
    ("blog", ChangeFrequency::Monthly, 0.5),
];

/// Result of building a country sitemap
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapOutcome {
    /// Every category was fetched
    Complete(Vec<SitemapEntry>),
    /// Aggregation failed; only static pages are listed
    Fallback(Vec<SitemapEntry>),
}

impl SitemapOutcome {
    pub fn entries(&self) -> &[SitemapEntry] {
        match self {
            SitemapOutcome::Complete(entries) | SitemapOutcome::Fallback(entries) => entries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SitemapOutcome::Fallback(_))
    }
}

/// Collects every crawlable URL of a country from the backend
pub struct SitemapAggregator {
    client: Arc<BackendClient>,
    site_url: String,
}

impl SitemapAggregator {
    pub fn new(client: Arc<BackendClient>, site_url: impl Into<String>) -> Self {
        Self {
            client,
            site_url: site_url.into(),
        }
    }

    fn context<'a>(&'a self, country: &'a CountryConfig, generated_at: DateTime<Utc>) -> EntryContext<'a> {
        EntryContext {
            site_url: &self.site_url,
            country_code: country.country_code,
            generated_at,
        }
    }

    /// Entries for the pages every country has, used on their own as the fallback
    pub fn static_entries(&self, country: &CountryConfig, generated_at: DateTime<Utc>) -> Vec<SitemapEntry> {
        let ctx = self.context(country, generated_at);
        static_entries(&ctx)
    }

    /// Fetches all categories of `country` and flattens them in the country's category order
    ///
    /// Remote categories are requested concurrently; pages within a category
    /// are requested one after another. Any failure aborts the whole run.
    ///
    /// # Arguments
    /// * `country` - Country to build the sitemap for
    ///
    /// # Returns
    /// * `Result<Vec<SitemapEntry>>` - All entries, or the first error encountered
    #[instrument(level = "debug", skip_all, fields(country = country.country_code))]
    pub async fn aggregate(&self, country: &CountryConfig) -> Result<Vec<SitemapEntry>> {
        let ctx = self.context(country, Utc::now());
        debug!("Aggregating {} categories", country.categories.len());

        let groups = try_join_all(
            country
                .categories
                .iter()
                .map(|category| self.collect_category(*category, country, &ctx)),
        )
        .await?;

        let entries: Vec<SitemapEntry> = groups.into_iter().flatten().collect();
        info!("Aggregated {} sitemap entries for {}", entries.len(), country.country_code);
        Ok(entries)
    }

    /// Builds the sitemap for `country`, degrading to the static pages on any failure
    #[instrument(skip_all, fields(country = country.country_code))]
    pub async fn build(&self, country: &CountryConfig) -> SitemapOutcome {
        match self.aggregate(country).await {
            Ok(entries) => SitemapOutcome::Complete(entries),
            Err(e) => {
                error!("Sitemap aggregation for {} failed, serving static pages only: {:#}", country.country_code, e);
                SitemapOutcome::Fallback(self.static_entries(country, Utc::now()))
            }
        }
    }

    async fn collect_category(
        &self,
        category: SitemapCategory,
        country: &CountryConfig,
        ctx: &EntryContext<'_>,
    ) -> Result<Vec<SitemapEntry>> {
        match category {
            SitemapCategory::StaticPages => Ok(static_entries(ctx)),
            SitemapCategory::States => self.collect::<StateRecord>(category, country, ctx).await,
            SitemapCategory::Categories => self.collect::<CategoryRecord>(category, country, ctx).await,
            SitemapCategory::Brands => self.collect::<BrandRecord>(category, country, ctx).await,
            SitemapCategory::ListingPages => self.collect::<ListingRecord>(category, country, ctx).await,
            SitemapCategory::CityListingPages => self.collect::<CityListingRecord>(category, country, ctx).await,
            SitemapCategory::Vehicles => self.collect::<VehicleRecord>(category, country, ctx).await,
            SitemapCategory::VehicleSeries => self.collect::<VehicleSeriesRecord>(category, country, ctx).await,
            SitemapCategory::Blogs => self.collect::<BlogRecord>(category, country, ctx).await,
            SitemapCategory::Companies => self.collect::<CompanyRecord>(category, country, ctx).await,
        }
    }

    async fn collect<T: SitemapRecord>(
        &self,
        category: SitemapCategory,
        country: &CountryConfig,
        ctx: &EntryContext<'_>,
    ) -> Result<Vec<SitemapEntry>> {
        let records = self.client.fetch_all::<T>(category, country).await?;
        let entries: Vec<SitemapEntry> =
            records.iter().filter_map(|record| record.to_entry(ctx)).collect();

        let skipped = records.len() - entries.len();
        if skipped > 0 {
            warn!("Skipped {} {} records with a blank path segment", skipped, category.name());
        }
        Ok(entries)
    }
}

fn static_entries(ctx: &EntryContext<'_>) -> Vec<SitemapEntry> {
    STATIC_PAGES
        .iter()
        .map(|(path, frequency, priority)| {
            SitemapEntry::new(ctx.url(path), ctx.generated_at, *frequency, *priority)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ApiConfig;
    use crate::sitemap::country::{INDIA, UAE};

    fn aggregator(api_base_url: &str) -> SitemapAggregator {
        let config = ApiConfig {
            api_base_url: api_base_url.to_string(),
            ..ApiConfig::default()
        };
        let client = BackendClient::new(&config).unwrap();
        SitemapAggregator::new(Arc::new(client), "https://ride.rent")
    }

    #[test]
    fn test_static_entries() {
        let entries = aggregator("http://127.0.0.1:9").static_entries(&UAE, Utc::now());

        assert_eq!(entries.len(), STATIC_PAGES.len());
        assert_eq!(entries[0].url(), "https://ride.rent/ae");
        assert_eq!(entries[0].priority(), 1.0);
        assert!(entries.iter().any(|e| e.url() == "https://ride.rent/ae/faq"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back_to_static_pages() {
        // Port 9 (discard) refuses connections on test hosts
        let aggregator = aggregator("http://127.0.0.1:9");

        for country in [&UAE, &INDIA] {
            let outcome = aggregator.build(country).await;
            assert!(outcome.is_fallback());
            assert_eq!(outcome.entries().len(), STATIC_PAGES.len());
            assert!(outcome.entries()[0].url().ends_with(country.country_code));
        }
    }
}
