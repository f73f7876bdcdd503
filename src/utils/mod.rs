pub mod logger;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}]+").expect("slug pattern is valid"));

/// Turns a free-form label ("Toyota Land Cruiser 2024") into a slug
/// ("toyota-land-cruiser-2024"). Letters outside ASCII are kept lowercased,
/// so "Škoda" becomes "škoda".
pub fn slugify(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug ready to be placed in a URL path, percent-encoded. `None` when the
/// label has no letters or digits at all.
pub fn path_segment(value: &str) -> Option<String> {
    let slug = slugify(value);
    if slug.is_empty() {
        return None;
    }
    Some(urlencoding::encode(&slug).into_owned())
}

/// Percent-decodes a path segment, keeping the raw text when it is not valid UTF-8
pub fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}
