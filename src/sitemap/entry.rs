use chrono::{DateTime, Utc};
use std::fmt;

/// How often a crawler should expect a page to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` record of a sitemap document
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    url: String,                     // Absolute page URL
    last_modified: DateTime<Utc>,    // Last change of the underlying resource
    change_frequency: ChangeFrequency,
    priority: f32,                   // Always within [0, 1]
    images: Vec<String>,             // Absolute image URLs
}

impl SitemapEntry {
    /// Creates an entry without images. `priority` is clamped into [0, 1];
    /// a NaN priority becomes 0.
    pub fn new(
        url: impl Into<String>,
        last_modified: DateTime<Utc>,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) -> Self {
        let priority = if priority.is_nan() { 0.0 } else { priority.clamp(0.0, 1.0) };
        Self {
            url: url.into(),
            last_modified,
            change_frequency,
            priority,
            images: Vec::new(),
        }
    }

    /// Attaches image URLs, dropping anything that is not an absolute http(s) URL
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.images = images
            .into_iter()
            .filter_map(|image| {
                let image = image.as_ref().trim();
                match url::Url::parse(image) {
                    Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(image.to_string()),
                    _ => None,
                }
            })
            .collect();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        self.change_frequency
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}
