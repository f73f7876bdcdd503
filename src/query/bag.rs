use std::fmt;
use tracing::trace;
use url::form_urlencoded;

/// Value carried by one query key
///
/// A key that appears once parses to `Single`; repeated keys
/// (`brand=a&brand=b`) collapse into `Multi` in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

impl QueryValue {
    /// All raw values in order
    pub fn values(&self) -> Vec<&str> {
        match self {
            QueryValue::Single(value) => vec![value.as_str()],
            QueryValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            QueryValue::Single(first) => {
                let first = std::mem::take(first);
                *self = QueryValue::Multi(vec![first, value]);
            }
            QueryValue::Multi(values) => values.push(value),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, QueryValue::Multi(values) if values.is_empty())
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryValue {
    fn from(values: Vec<S>) -> Self {
        QueryValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

/// Parsed query string with unique keys in first-seen order
///
/// Every transformation borrows the bag and returns a new one, so a bag
/// parsed from an incoming request can be rewritten several ways without
/// the variants affecting each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParamBag {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParamBag {
    /// Parses a raw query component. A leading `?` is accepted. Pairs with an
    /// empty key are dropped; malformed percent escapes are kept literally.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut pairs: Vec<(String, QueryValue)> = Vec::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key.is_empty() {
                trace!("Skipping query pair with empty key");
                continue;
            }
            match pairs.iter_mut().find(|(existing, _)| existing.as_str() == &*key) {
                Some((_, slot)) => slot.push(value.into_owned()),
                None => pairs.push((key.into_owned(), QueryValue::Single(value.into_owned()))),
            }
        }

        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Unambiguous single value for `key`, see [`normalize_single_value`]
    pub fn single(&self, key: &str) -> Option<String> {
        normalize_single_value(self.get(key))
    }

    /// Returns a copy with `key` set to `value`, or removed when `value` is
    /// `None`. An existing key keeps its position; a new key is appended.
    pub fn set_or_remove_key(&self, key: &str, value: Option<QueryValue>) -> Self {
        let mut pairs = self.pairs.clone();

        match value {
            Some(value) if !value.is_empty() => {
                match pairs.iter_mut().find(|(existing, _)| existing == key) {
                    Some((_, slot)) => *slot = value,
                    None => pairs.push((key.to_string(), value)),
                }
            }
            // None, or an empty value list
            _ => pairs.retain(|(existing, _)| existing != key),
        }

        Self { pairs }
    }

    /// Applies every update in order and returns the resulting bag.
    ///
    /// The source bag is never touched, so a caller sees either all of the
    /// updates or none of them.
    pub fn merge_updates<I, K>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<QueryValue>)>,
        K: AsRef<str>,
    {
        updates
            .into_iter()
            .fold(self.clone(), |bag, (key, value)| bag.set_or_remove_key(key.as_ref(), value))
    }

    /// Serializes as `application/x-www-form-urlencoded` without a leading `?`.
    /// Multi values are written as repeated keys.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            for item in value.values() {
                serializer.append_pair(key, item);
            }
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParamBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Reduces a possibly multi-valued parameter to one value.
///
/// Only a single, non-empty value without a comma survives. Multi-select
/// values (repeated keys or `a,b`) return `None` so callers leave them as
/// filters instead of guessing a canonical path. The surviving value is
/// returned as received; a whitespace-only value counts as absent.
pub fn normalize_single_value(value: Option<&QueryValue>) -> Option<String> {
    let raw = match value? {
        QueryValue::Single(value) => value.as_str(),
        QueryValue::Multi(values) if values.len() == 1 => values[0].as_str(),
        QueryValue::Multi(_) => return None,
    };

    if raw.trim().is_empty() || raw.contains(',') {
        return None;
    }
    Some(raw.to_string())
}

/// Parses `query`, applies `updates` and re-serializes it.
///
/// This is the "change one filter, keep the rest" helper used when building
/// links from listing pages.
pub fn merge_query_updates<I, K>(query: &str, updates: I) -> String
where
    I: IntoIterator<Item = (K, Option<QueryValue>)>,
    K: AsRef<str>,
{
    QueryParamBag::parse(query).merge_updates(updates).to_query_string()
}
