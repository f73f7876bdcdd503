//! Query string normalization for listing links and redirects.

pub mod bag;
pub mod legacy;


pub use bag::{merge_query_updates, normalize_single_value, QueryParamBag, QueryValue};
pub use legacy::legacy_listing_redirect;
