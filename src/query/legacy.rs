use tracing::debug;

use super::bag::QueryParamBag;
use crate::utils::{decode_segment, path_segment, slugify};

/// Query key that old listing links used for the vehicle category
pub const CATEGORY_KEY: &str = "category";
/// Query key that old listing links used for the brand filter
pub const BRAND_KEY: &str = "brand";

/// Computes the canonical target for a legacy listing link.
///
/// Legacy links look like `/{country}/{state}/listing?category=cars&brand=bmw&sort=price`.
/// The canonical form moves the category (and the brand, when it is
/// unambiguous) into the path: `/{country}/{state}/listing/cars/brand/bmw?sort=price`.
///
/// # Arguments
/// * `country_code` - Country path prefix, e.g. `ae`
/// * `state` - State path segment as received, possibly percent-encoded
/// * `query` - Raw query component of the legacy link
///
/// # Returns
/// * `Some(target)` when the link can be collapsed, `None` when the category
///   is absent or multi-valued and the filtered listing should be kept as is
pub fn legacy_listing_redirect(country_code: &str, state: &str, query: &str) -> Option<String> {
    let bag = QueryParamBag::parse(query);

    let category = match bag.single(CATEGORY_KEY).and_then(|value| path_segment(&value)) {
        Some(category) => category,
        None => {
            debug!("Legacy listing link has no single category, keeping it as a filtered listing");
            return None;
        }
    };

    let state = match path_segment(&decode_segment(state)) {
        Some(state) => state,
        None => {
            debug!("Legacy listing link has an empty state segment");
            return None;
        }
    };

    let mut path = format!("/{}/{}/listing/{}", slugify(country_code), state, category);
    let mut remaining = bag.set_or_remove_key(CATEGORY_KEY, None);

    // An ambiguous brand stays behind as a filter
    if let Some(brand) = bag.single(BRAND_KEY).and_then(|value| path_segment(&value)) {
        path.push_str("/brand/");
        path.push_str(&brand);
        remaining = remaining.set_or_remove_key(BRAND_KEY, None);
    }

    if !remaining.is_empty() {
        path.push('?');
        path.push_str(&remaining.to_query_string());
    }

    debug!("Legacy listing link collapses to {}", path);
    Some(path)
}
