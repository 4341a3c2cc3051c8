//! Query-string codec for [`FilterState`].
//!
//! Parameters, in emission order: `scope`, `city`, `cat`, `sort`, `q`, `id`.
//! Default values are omitted, so an untouched listing has no query string at all.
//! Parsing is total: unknown or malformed values fall back to defaults.

use crate::domain::{FilterState, Scope, SortMode};

/// Region slug used for `scope` when none is configured.
pub const DEFAULT_REGION_SLUG: &str = "sarawak";

/// The parts of the address bar the core cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl Location {
    /// Splits an href into path and query, dropping any fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use placesheet::app::Location;
    ///
    /// let loc = Location::from_href("/places.html?city=miri#top");
    /// assert_eq!(loc.path, "/places.html");
    /// assert_eq!(loc.query, "city=miri");
    /// ```
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let without_fragment = href.split_once('#').map_or(href, |(head, _)| head);
        match without_fragment.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Self {
                path: without_fragment.to_string(),
                query: String::new(),
            },
        }
    }

    #[must_use]
    pub fn href(&self) -> String {
        compose_url(&self.path, &self.query)
    }
}

/// Joins a path and a query, leaving off the `?` when the query is empty.
#[must_use]
pub fn compose_url(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Builds a [`FilterState`] from a query string, with or without the leading `?`.
///
/// The first occurrence of a parameter wins. `scope` counts only when it equals
/// `region_slug` ignoring ASCII case. An unknown `sort` reads as `hot`. The
/// region-default rule is applied to the result.
///
/// # Examples
///
/// ```
/// use placesheet::app::url::parse_query;
/// use placesheet::domain::{Scope, SortMode};
///
/// let state = parse_query("?cat=Taste&sort=top&q=laksa+house", "sarawak");
/// assert_eq!(state.scope, Scope::Region);
/// assert_eq!(state.sort, SortMode::Top);
/// assert_eq!(state.query, "laksa house");
/// ```
#[must_use]
pub fn parse_query(query: &str, region_slug: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if seen.iter().any(|k| *k == key) {
            continue;
        }
        seen.push(key.to_string());

        match &*key {
            "scope" if value.eq_ignore_ascii_case(region_slug) => state.scope = Scope::Region,
            "city" => state.city_id = value.into_owned(),
            "cat" => state.category = value.into_owned(),
            "sort" => {
                state.sort = value.parse().unwrap_or_else(|_| {
                    tracing::debug!(sort = %value, "unknown sort in URL, using hot");
                    SortMode::Hot
                });
            }
            "q" => state.query = value.trim().to_string(),
            "id" if !value.is_empty() => state.selected_id = Some(value.into_owned()),
            _ => {}
        }
    }

    state.normalized()
}

/// Serializes the non-default fields of `state` as a query string (no leading `?`).
///
/// # Examples
///
/// ```
/// use placesheet::app::url::serialize_query;
/// use placesheet::domain::{FilterState, SortMode};
///
/// let state = FilterState {
///     city_id: "sibu".into(),
///     sort: SortMode::Near,
///     ..FilterState::default()
/// };
/// assert_eq!(serialize_query(&state, "sarawak"), "city=sibu&sort=near");
/// assert_eq!(serialize_query(&FilterState::default(), "sarawak"), "");
/// ```
#[must_use]
pub fn serialize_query(state: &FilterState, region_slug: &str) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if state.scope == Scope::Region {
        out.append_pair("scope", region_slug);
    }
    if !state.city_id.is_empty() {
        out.append_pair("city", &state.city_id);
    }
    if !state.category.is_empty() {
        out.append_pair("cat", &state.category);
    }
    if state.sort != SortMode::Hot {
        out.append_pair("sort", state.sort.as_str());
    }
    if !state.query.is_empty() {
        out.append_pair("q", &state.query);
    }
    if let Some(id) = state.selected_id.as_deref().filter(|id| !id.is_empty()) {
        out.append_pair("id", id);
    }

    out.finish()
}
