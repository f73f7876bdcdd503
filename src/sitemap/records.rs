use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::entry::{ChangeFrequency, SitemapEntry};
use crate::utils::path_segment;

/// Shared inputs for turning backend records into absolute page URLs
#[derive(Debug, Clone)]
pub struct EntryContext<'a> {
    pub site_url: &'a str,
    pub country_code: &'a str,
    pub generated_at: DateTime<Utc>,
}

impl<'a> EntryContext<'a> {
    /// Absolute URL for a path below the country prefix. An empty path is the
    /// country home page.
    pub fn url(&self, path: &str) -> String {
        let base = format!("{}/{}", self.site_url.trim_end_matches('/'), self.country_code);
        let path = path.trim_matches('/');
        if path.is_empty() {
            base
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn modified(&self, updated_at: Option<DateTime<Utc>>) -> DateTime<Utc> {
        updated_at.unwrap_or(self.generated_at)
    }
}

/// A backend list item that maps onto at most one sitemap entry
pub trait SitemapRecord: DeserializeOwned + Send {
    /// `None` when a required path segment is blank, since the page it would
    /// point at does not exist.
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry>;
}

/// Identifiers keep their case; only characters unsafe in a path are escaped
fn id_segment(id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(urlencoding::encode(id).into_owned())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub state_value: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for StateRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        Some(SitemapEntry::new(
            ctx.url(&path_segment(&self.state_value)?),
            ctx.modified(self.updated_at),
            ChangeFrequency::Daily,
            0.9,
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub state_value: String,
    pub category_value: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for CategoryRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!("{}/{}", path_segment(&self.state_value)?, path_segment(&self.category_value)?);
        Some(SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Daily, 0.9))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRecord {
    pub state_value: String,
    pub category_value: String,
    pub brand_value: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for BrandRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!(
            "{}/rent/{}/{}",
            path_segment(&self.state_value)?,
            path_segment(&self.category_value)?,
            path_segment(&self.brand_value)?
        );
        Some(SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Weekly, 0.8))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub state_value: String,
    pub category_value: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for ListingRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!("{}/listing/{}", path_segment(&self.state_value)?, path_segment(&self.category_value)?);
        Some(SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Daily, 0.8))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityListingRecord {
    pub state_value: String,
    pub category_value: String,
    pub city_value: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for CityListingRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!(
            "{}/listing/{}/city/{}",
            path_segment(&self.state_value)?,
            path_segment(&self.category_value)?,
            path_segment(&self.city_value)?
        );
        Some(SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Daily, 0.7))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub state_value: String,
    pub category_value: String,
    pub brand_value: String,
    pub vehicle_title: String,
    pub vehicle_code: String,
    #[serde(default)]
    pub vehicle_photos: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for VehicleRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!(
            "{}/rent/{}/{}/{}/for-rent/{}",
            path_segment(&self.state_value)?,
            path_segment(&self.category_value)?,
            path_segment(&self.brand_value)?,
            path_segment(&self.vehicle_title)?,
            id_segment(&self.vehicle_code)?
        );
        Some(
            SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Daily, 0.7)
                .with_images(&self.vehicle_photos),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSeriesRecord {
    pub state_value: String,
    pub category_value: String,
    pub brand_value: String,
    pub vehicle_series: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for VehicleSeriesRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!(
            "{}/rent/{}/{}/{}",
            path_segment(&self.state_value)?,
            path_segment(&self.category_value)?,
            path_segment(&self.brand_value)?,
            path_segment(&self.vehicle_series)?
        );
        Some(SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Weekly, 0.6))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    pub blog_id: String,
    pub blog_title: String,
    #[serde(default)]
    pub blog_image: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for BlogRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!("blog/{}/{}", path_segment(&self.blog_title)?, id_segment(&self.blog_id)?);
        Some(
            SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Weekly, 0.6)
                .with_images(self.blog_image.iter()),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SitemapRecord for CompanyRecord {
    fn to_entry(&self, ctx: &EntryContext<'_>) -> Option<SitemapEntry> {
        let path = format!("profile/{}/{}", path_segment(&self.company_name)?, id_segment(&self.company_id)?);
        Some(
            SitemapEntry::new(ctx.url(&path), ctx.modified(self.updated_at), ChangeFrequency::Monthly, 0.5)
                .with_images(self.company_logo.iter()),
        )
    }
}
