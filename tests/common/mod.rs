#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use ride_rent_seo::api::config::ApiConfig;
use ride_rent_seo::sitemap::country::HttpMethod;
use ride_rent_seo::sitemap::{CountryConfig, SitemapCategory};
use serde_json::{json, Value};

/// Number of static pages every country sitemap starts with
pub const STATIC_PAGE_COUNT: usize = 6;

pub fn config_for(server: &ServerGuard) -> ApiConfig {
    ApiConfig {
        api_base_url: server.url(),
        site_url: "https://ride.rent".to_string(),
        request_timeout_secs: 5,
        ..ApiConfig::default()
    }
}

/// Backend envelope for one page
pub fn page_body(list: Value, page: u32, total_pages: u32) -> String {
    json!({
        "result": {
            "list": list,
            "page": page.to_string(),
            "totalNumberOfPages": total_pages
        }
    })
    .to_string()
}

fn method_and_path(category: SitemapCategory) -> (&'static str, &'static str) {
    let endpoint = category.endpoint().expect("remote category");
    let method = match endpoint.method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    };
    (method, endpoint.path)
}

/// Mocks a single page of `category` for `country`
pub async fn mock_page(
    server: &mut ServerGuard,
    category: SitemapCategory,
    country: &CountryConfig,
    page: u32,
    total_pages: u32,
    list: Value,
) -> Mock {
    let (method, path) = method_and_path(category);
    let mock = server.mock(method, path);
    let mock = if method == "GET" {
        mock.match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.to_string()),
            Matcher::UrlEncoded("countryId".into(), country.country_id.into()),
        ]))
    } else {
        mock.match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(json!({ "page": page, "countryId": country.country_id })))
    };

    mock.with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(list, page, total_pages))
        .expect(1)
        .create_async()
        .await
}

/// Mocks every remote category of `country` as a single empty page,
/// except the ones listed in `skip`
pub async fn mock_empty_categories(
    server: &mut ServerGuard,
    country: &CountryConfig,
    skip: &[SitemapCategory],
) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for category in country.categories {
        if category.endpoint().is_none() || skip.contains(category) {
            continue;
        }
        mocks.push(mock_page(server, *category, country, 1, 1, json!([])).await);
    }
    mocks
}
