mod common;

use std::sync::Arc;

use anyhow::Result;
use mockito::{Matcher, Server};
use ride_rent_seo::api::config::ApiConfig;
use ride_rent_seo::sitemap::country::{INDIA, UAE};
use ride_rent_seo::sitemap::{render_sitemap, BackendClient, SitemapAggregator, SitemapCategory};
use serde_json::json;

use common::{config_for, mock_empty_categories, mock_page, STATIC_PAGE_COUNT};

fn aggregator(config: &ApiConfig) -> Result<SitemapAggregator> {
    let client = BackendClient::new(config)?;
    Ok(SitemapAggregator::new(Arc::new(client), config.site_url.clone()))
}

#[tokio::test]
async fn test_category_with_three_pages_issues_three_requests() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &UAE, &[SitemapCategory::States]).await;

    let mut pages = Vec::new();
    for page in 1..=3 {
        let list = json!([{ "stateValue": format!("state-{}", page) }]);
        pages.push(mock_page(&mut server, SitemapCategory::States, &UAE, page, 3, list).await);
    }

    let aggregator = aggregator(&config_for(&server))?;
    let entries = aggregator.aggregate(&UAE).await?;

    for mock in &pages {
        mock.assert_async().await;
    }

    assert_eq!(entries.len(), STATIC_PAGE_COUNT + 3);
    let state_urls: Vec<&str> = entries[STATIC_PAGE_COUNT..].iter().map(|e| e.url()).collect();
    assert_eq!(
        state_urls,
        vec![
            "https://ride.rent/ae/state-1",
            "https://ride.rent/ae/state-2",
            "https://ride.rent/ae/state-3",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_page_ceiling_bounds_requests() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &UAE, &[SitemapCategory::Blogs]).await;

    let first = mock_page(&mut server, SitemapCategory::Blogs, &UAE, 1, 40, json!([])).await;
    let second = mock_page(&mut server, SitemapCategory::Blogs, &UAE, 2, 40, json!([])).await;
    let third = server
        .mock("GET", "/blogs/list")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let config = ApiConfig { max_pages: 2, ..config_for(&server) };
    let outcome = aggregator(&config)?.build(&UAE).await;

    assert!(!outcome.is_fallback());
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_entries_follow_category_order() -> Result<()> {
    let mut server = Server::new_async().await;
    let skip = [SitemapCategory::States, SitemapCategory::Vehicles, SitemapCategory::Blogs];
    let _others = mock_empty_categories(&mut server, &UAE, &skip).await;

    let _states = mock_page(&mut server, SitemapCategory::States, &UAE, 1, 1, json!([{ "stateValue": "dubai" }])).await;
    let _vehicles = mock_page(
        &mut server,
        SitemapCategory::Vehicles,
        &UAE,
        1,
        1,
        json!([{
            "stateValue": "dubai",
            "categoryValue": "cars",
            "brandValue": "nissan",
            "vehicleTitle": "Nissan Patrol",
            "vehicleCode": "NP-77",
            "vehiclePhotos": ["https://cdn.ride.rent/np.jpg"]
        }]),
    )
    .await;
    let _blogs = mock_page(
        &mut server,
        SitemapCategory::Blogs,
        &UAE,
        1,
        1,
        json!([{ "blogId": "b1", "blogTitle": "Desert Drives" }]),
    )
    .await;

    let entries = aggregator(&config_for(&server))?.aggregate(&UAE).await?;
    let urls: Vec<&str> = entries.iter().map(|e| e.url()).collect();

    assert_eq!(urls[0], "https://ride.rent/ae");
    assert_eq!(
        &urls[STATIC_PAGE_COUNT..],
        &[
            "https://ride.rent/ae/dubai",
            "https://ride.rent/ae/dubai/rent/cars/nissan/nissan-patrol/for-rent/NP-77",
            "https://ride.rent/ae/blog/desert-drives/b1",
        ]
    );
    assert_eq!(entries[STATIC_PAGE_COUNT + 1].images(), &["https://cdn.ride.rent/np.jpg".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_india_uses_city_listing_instead_of_listing_pages() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &INDIA, &[SitemapCategory::CityListingPages]).await;

    let cities = mock_page(
        &mut server,
        SitemapCategory::CityListingPages,
        &INDIA,
        1,
        1,
        json!([{ "stateValue": "kerala", "categoryValue": "bikes", "cityValue": "kochi" }]),
    )
    .await;
    let listing = server
        .mock("GET", "/listing/list")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let entries = aggregator(&config_for(&server))?.aggregate(&INDIA).await?;

    cities.assert_async().await;
    listing.assert_async().await;
    assert!(entries.iter().any(|e| e.url() == "https://ride.rent/in/kerala/listing/bikes/city/kochi"));
    assert!(entries.iter().all(|e| e.url().starts_with("https://ride.rent/in")));
    Ok(())
}

#[tokio::test]
async fn test_backend_error_degrades_to_static_pages() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &UAE, &[SitemapCategory::Companies]).await;
    let _companies = server
        .mock("GET", "/company/list")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let outcome = aggregator(&config_for(&server))?.build(&UAE).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.entries().len(), STATIC_PAGE_COUNT);

    let xml = render_sitemap(outcome.entries());
    assert!(xml.contains("<loc>https://ride.rent/ae</loc>"));
    assert!(xml.trim_end().ends_with("</urlset>"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_degrades_to_static_pages() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &INDIA, &[SitemapCategory::States]).await;
    let _states = server
        .mock("GET", "/states/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": {"list": "not-a-list"}}"#)
        .create_async()
        .await;

    let outcome = aggregator(&config_for(&server))?.build(&INDIA).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.entries().len(), STATIC_PAGE_COUNT);
    assert_eq!(outcome.entries()[0].url(), "https://ride.rent/in");
    Ok(())
}

#[tokio::test]
async fn test_records_with_blank_segments_are_skipped() -> Result<()> {
    let mut server = Server::new_async().await;
    let _others = mock_empty_categories(&mut server, &UAE, &[SitemapCategory::States, SitemapCategory::Blogs]).await;
    let _states = mock_page(
        &mut server,
        SitemapCategory::States,
        &UAE,
        1,
        1,
        json!([{ "stateValue": "" }, { "stateValue": "Sharjah" }]),
    )
    .await;
    let _blogs = mock_page(
        &mut server,
        SitemapCategory::Blogs,
        &UAE,
        1,
        1,
        json!([{ "blogId": "b9", "blogTitle": "???" }, { "blogId": "b10", "blogTitle": "Škoda Weekend" }]),
    )
    .await;

    let outcome = aggregator(&config_for(&server))?.build(&UAE).await;

    assert!(!outcome.is_fallback());
    let urls: Vec<&str> = outcome.entries()[STATIC_PAGE_COUNT..].iter().map(|e| e.url()).collect();
    assert_eq!(
        urls,
        vec!["https://ride.rent/ae/sharjah", "https://ride.rent/ae/blog/%C5%A1koda-weekend/b10"]
    );
    Ok(())
}
