//! Multi-criteria catalog filter.
//!
//! Criteria are applied in a fixed order: city, category, then the free-text
//! query. Survivors keep their relative order, so sorting afterwards only has to
//! break ties the catalog already broke.

use crate::domain::{FilterState, PlaceRecord};

/// Returns whether `place` satisfies every active criterion in `state`.
///
/// The query matches case-insensitively as a substring of the name, the address
/// or any tag. A blank query matches everything.
#[must_use]
pub fn matches(place: &PlaceRecord, state: &FilterState) -> bool {
    if !place.is_active() {
        return false;
    }

    // Region and unscoped listings narrow by city the same way; region only
    // changes presentation (chips, badges).
    if !state.city_id.is_empty() && place.city_id != state.city_id {
        return false;
    }

    if !state.category.is_empty() && place.category != state.category {
        return false;
    }

    let query = state.query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    place.name.to_lowercase().contains(&needle)
        || place.address.to_lowercase().contains(&needle)
        || place.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// Filters `places` by `state`, preserving order.
///
/// # Examples
///
/// ```
/// use placesheet::domain::{FilterState, PlaceRecord};
/// use placesheet::pipeline::filter_places;
///
/// let places = vec![
///     PlaceRecord::new("1", "Cat Museum", "kuching"),
///     PlaceRecord::new("2", "Canada Hill", "miri"),
/// ];
/// let state = FilterState { city_id: "miri".into(), ..FilterState::default() };
/// let ids: Vec<_> = filter_places(&places, &state).into_iter().map(|p| p.id).collect();
/// assert_eq!(ids, ["2"]);
/// ```
#[must_use]
pub fn filter_places(places: &[PlaceRecord], state: &FilterState) -> Vec<PlaceRecord> {
    let _span = tracing::debug_span!(
        "filter_places",
        total = places.len(),
        city = %state.city_id,
        category = %state.category,
        query_len = state.query.len()
    )
    .entered();

    let filtered: Vec<PlaceRecord> = places
        .iter()
        .filter(|p| matches(p, state))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "filter applied");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlaceStatus, Scope};

    fn place(id: &str, name: &str, city: &str, category: &str, tags: &[&str]) -> PlaceRecord {
        let mut p = PlaceRecord::new(id, name, city);
        p.category = category.to_string();
        p.tags = tags.iter().map(|t| (*t).to_string()).collect();
        p
    }

    fn sample() -> Vec<PlaceRecord> {
        let mut closed = place("5", "Old Bazaar", "kuching", "Culture", &["market"]);
        closed.status = PlaceStatus::Inactive;

        let mut riverside = place("4", "Riverside Majestic", "kuching", "Stay", &["hotel"]);
        riverside.address = "Jalan Tunku Abdul Rahman".to_string();

        vec![
            place("1", "Top Spot", "kuching", "Taste", &["Seafood"]),
            place("2", "Canada Hill", "miri", "Experience", &["nature"]),
            place("3", "Sibu Central Market", "sibu", "Culture", &["market", "food"]),
            riverside,
            closed,
        ]
    }

    fn ids(places: &[PlaceRecord]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_state_keeps_every_active_place_in_order() {
        let out = filter_places(&sample(), &FilterState::default());
        assert_eq!(ids(&out), ["1", "2", "3", "4"]);
    }

    #[test]
    fn city_and_category_are_exact() {
        let state = FilterState {
            scope: Scope::Region,
            city_id: "kuching".into(),
            category: "Stay".into(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_places(&sample(), &state)), ["4"]);
    }

    #[test]
    fn region_without_city_spans_all_cities() {
        let state = FilterState {
            scope: Scope::Region,
            category: "Culture".into(),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_places(&sample(), &state)), ["3"]);
    }

    #[test]
    fn query_matches_name_address_and_tags_case_insensitively() {
        let by_tag = FilterState { query: "SEAFOOD".into(), ..FilterState::default() };
        assert_eq!(ids(&filter_places(&sample(), &by_tag)), ["1"]);

        let by_address = FilterState { query: "tunku".into(), ..FilterState::default() };
        assert_eq!(ids(&filter_places(&sample(), &by_address)), ["4"]);

        let by_name = FilterState { query: "  market ".into(), ..FilterState::default() };
        assert_eq!(ids(&filter_places(&sample(), &by_name)), ["3"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let states = [
            FilterState::default(),
            FilterState { query: "o".into(), ..FilterState::default() },
            FilterState { city_id: "kuching".into(), ..FilterState::default() },
            FilterState { category: "Culture".into(), scope: Scope::Region, ..FilterState::default() },
        ];
        for state in &states {
            let once = filter_places(&sample(), state);
            let twice = filter_places(&once, state);
            assert_eq!(once, twice);
            assert!(once.iter().all(|p| p.is_active() && matches(p, state)));
        }
    }
}
