//! Sitemap aggregation: backend paging, record mapping and XML output.

pub mod aggregator;
pub mod client;
pub mod country;
pub mod entry;
pub mod records;
pub mod xml;

pub use aggregator::{SitemapAggregator, SitemapOutcome};
pub use client::BackendClient;
pub use country::{find_country, CountryConfig, SitemapCategory, COUNTRIES};
pub use entry::{ChangeFrequency, SitemapEntry};
pub use xml::render_sitemap;
