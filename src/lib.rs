pub mod api;
pub mod query;
pub mod sitemap;
pub mod utils;
