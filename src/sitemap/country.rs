use std::fmt;

/// HTTP method a backend listing endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Backend route serving one paginated resource list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: &'static str,
}

/// Group of pages contributed to a country sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitemapCategory {
    StaticPages,
    States,
    Categories,
    Brands,
    ListingPages,
    CityListingPages,
    Vehicles,
    VehicleSeries,
    Blogs,
    Companies,
}

impl SitemapCategory {
    /// Backend endpoint for the category, `None` for pages known up front
    pub fn endpoint(&self) -> Option<Endpoint> {
        let (method, path) = match self {
            SitemapCategory::StaticPages => return None,
            SitemapCategory::States => (HttpMethod::Get, "/states/list"),
            SitemapCategory::Categories => (HttpMethod::Get, "/vehicle-category/list"),
            SitemapCategory::Brands => (HttpMethod::Get, "/vehicle-brand/list"),
            SitemapCategory::ListingPages => (HttpMethod::Get, "/listing/list"),
            SitemapCategory::CityListingPages => (HttpMethod::Get, "/city/list"),
            SitemapCategory::Vehicles => (HttpMethod::Post, "/vehicle/list"),
            SitemapCategory::VehicleSeries => (HttpMethod::Get, "/vehicle-series/list"),
            SitemapCategory::Blogs => (HttpMethod::Get, "/blogs/list"),
            SitemapCategory::Companies => (HttpMethod::Get, "/company/list"),
        };
        Some(Endpoint { method, path })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SitemapCategory::StaticPages => "static-pages",
            SitemapCategory::States => "states",
            SitemapCategory::Categories => "categories",
            SitemapCategory::Brands => "brands",
            SitemapCategory::ListingPages => "listing-pages",
            SitemapCategory::CityListingPages => "city-listing-pages",
            SitemapCategory::Vehicles => "vehicles",
            SitemapCategory::VehicleSeries => "vehicle-series",
            SitemapCategory::Blogs => "blogs",
            SitemapCategory::Companies => "companies",
        }
    }
}

impl fmt::Display for SitemapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A country the marketplace serves, with the order its sitemap is assembled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryConfig {
    pub country_code: &'static str,            // Path prefix, e.g. "ae"
    pub country_id: &'static str,              // Opaque backend identifier
    pub categories: &'static [SitemapCategory],
}

// India lists city pages in the slot where the UAE lists state listing pages.
const UAE_CATEGORIES: &[SitemapCategory] = &[
    SitemapCategory::StaticPages,
    SitemapCategory::States,
    SitemapCategory::Categories,
    SitemapCategory::Brands,
    SitemapCategory::ListingPages,
    SitemapCategory::Vehicles,
    SitemapCategory::VehicleSeries,
    SitemapCategory::Blogs,
    SitemapCategory::Companies,
];

const INDIA_CATEGORIES: &[SitemapCategory] = &[
    SitemapCategory::StaticPages,
    SitemapCategory::States,
    SitemapCategory::Categories,
    SitemapCategory::Brands,
    SitemapCategory::CityListingPages,
    SitemapCategory::Vehicles,
    SitemapCategory::VehicleSeries,
    SitemapCategory::Blogs,
    SitemapCategory::Companies,
];

pub const UAE: CountryConfig = CountryConfig {
    country_code: "ae",
    country_id: "ee8a7c04-2e1d-4c5f-9b6a-1f0a3d7e5c21",
    categories: UAE_CATEGORIES,
};

pub const INDIA: CountryConfig = CountryConfig {
    country_code: "in",
    country_id: "68ea1314-08ed-4bba-a2b1-af549946523d",
    categories: INDIA_CATEGORIES,
};

/// Every country that gets a sitemap endpoint
pub static COUNTRIES: &[CountryConfig] = &[UAE, INDIA];

/// Looks up a country by its path prefix, ignoring case
pub fn find_country(country_code: &str) -> Option<&'static CountryConfig> {
    COUNTRIES
        .iter()
        .find(|country| country.country_code.eq_ignore_ascii_case(country_code))
}
