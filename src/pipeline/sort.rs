//! Ordering of filtered results.
//!
//! Every mode uses a stable sort, so places with equal keys keep their catalog
//! order and the list does not reshuffle between renders. Absent fields read through
//! the sentinel accessors on [`PlaceRecord`] and therefore always land in the most
//! conservative position.

use super::geo::{distance_km, Geolocation};
use crate::domain::{Coordinates, PlaceRecord, SortMode};
use std::cmp::Ordering;
use std::time::Duration;

/// Default bound on a geolocation request.
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_millis(3000);

fn by_hot(a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.rating_or_zero().total_cmp(&a.rating_or_zero()))
        .then_with(|| b.updated_at_or_epoch().cmp(&a.updated_at_or_epoch()))
}

fn by_new(a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
    b.updated_at_or_epoch().cmp(&a.updated_at_or_epoch())
}

fn by_top(a: &PlaceRecord, b: &PlaceRecord) -> Ordering {
    b.rating_or_zero().total_cmp(&a.rating_or_zero())
}

/// Sorts `places` in place for `mode`.
///
/// `near` needs a fix: with `user` absent it orders exactly like `hot`. With a fix,
/// places ascend by distance and places without coordinates (distance +∞) follow
/// every located place, in their prior relative order.
///
/// # Examples
///
/// ```
/// use placesheet::domain::{PlaceRecord, SortMode};
/// use placesheet::pipeline::sort_places;
///
/// let mut a = PlaceRecord::new("1", "A", "kuching");
/// a.rating = Some(4.9);
/// let mut b = PlaceRecord::new("2", "B", "kuching");
/// b.rating = Some(4.2);
/// b.featured = true;
///
/// let mut places = vec![a, b];
/// sort_places(&mut places, SortMode::Hot, None);
/// assert_eq!(places[0].id, "2");
/// ```
pub fn sort_places(places: &mut [PlaceRecord], mode: SortMode, user: Option<Coordinates>) {
    let _span = tracing::debug_span!("sort_places", count = places.len(), mode = %mode, has_fix = user.is_some()).entered();

    match (mode, user) {
        (SortMode::New, _) => places.sort_by(by_new),
        (SortMode::Top, _) => places.sort_by(by_top),
        (SortMode::Near, Some(me)) => places.sort_by(|a, b| {
            distance_km(a.coordinates, Some(me)).total_cmp(&distance_km(b.coordinates, Some(me)))
        }),
        (SortMode::Hot | SortMode::Near, _) => places.sort_by(by_hot),
    }
}

/// Sorts `places`, asking `geo` for a fix first when `mode` is `near`.
///
/// Returns the fix that was used, if any. A failed or timed-out request silently
/// falls back to `hot` ordering.
pub async fn sort_with_geolocation<G>(
    places: &mut [PlaceRecord],
    mode: SortMode,
    geo: &G,
    timeout: Duration,
) -> Option<Coordinates>
where
    G: Geolocation + ?Sized,
{
    let fix = if mode == SortMode::Near {
        let fix = geo.current_position(timeout).await;
        if fix.is_none() {
            tracing::debug!(timeout_ms = timeout.as_millis(), "no geolocation fix, falling back to hot");
        }
        fix
    } else {
        None
    };

    sort_places(places, mode, fix);
    fix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::geo::FixedLocation;
    use futures_util::FutureExt;

    fn place(id: &str, rating: Option<f64>, featured: bool, updated_at: Option<i64>) -> PlaceRecord {
        let mut p = PlaceRecord::new(id, format!("Place {id}"), "kuching");
        p.rating = rating;
        p.featured = featured;
        p.updated_at = updated_at;
        p
    }

    fn located(id: &str, lat: f64, lng: f64) -> PlaceRecord {
        let mut p = place(id, None, false, None);
        p.coordinates = Some(Coordinates::new(lat, lng));
        p
    }

    fn ids(places: &[PlaceRecord]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn featured_outranks_higher_rating() {
        let mut places = vec![
            place("1", Some(4.9), false, crate::catalog::parse_updated_at("2024-01-01")),
            place("2", Some(4.2), true, crate::catalog::parse_updated_at("2023-01-01")),
        ];
        sort_places(&mut places, SortMode::Hot, None);
        assert_eq!(ids(&places), ["2", "1"]);
    }

    #[test]
    fn hot_breaks_ties_on_rating_then_recency() {
        let mut places = vec![
            place("old", Some(4.0), false, Some(100)),
            place("unrated", None, false, Some(900)),
            place("new", Some(4.0), false, Some(200)),
            place("undated", Some(4.0), false, None),
        ];
        sort_places(&mut places, SortMode::Hot, None);
        assert_eq!(ids(&places), ["new", "old", "undated", "unrated"]);
    }

    #[test]
    fn new_and_top_are_stable_with_sentinels_last() {
        let mut places = vec![
            place("a", None, false, None),
            place("b", Some(3.0), false, Some(5)),
            place("c", None, false, None),
            place("d", Some(3.0), false, Some(5)),
        ];
        sort_places(&mut places, SortMode::New, None);
        assert_eq!(ids(&places), ["b", "d", "a", "c"]);

        let mut places = vec![
            place("a", None, false, None),
            place("b", Some(3.0), false, None),
            place("c", Some(0.0), false, None),
            place("d", Some(3.0), false, None),
        ];
        sort_places(&mut places, SortMode::Top, None);
        assert_eq!(ids(&places), ["b", "d", "a", "c"]);
    }

    #[test]
    fn near_orders_by_distance_and_puts_unlocated_last() {
        let me = Coordinates::new(1.55, 110.35);
        let mut unlocated = place("nowhere", Some(5.0), true, Some(999));
        unlocated.coordinates = None;
        let mut places = vec![
            unlocated,
            located("far", 4.40, 113.99),
            located("near", 1.56, 110.34),
            located("mid", 2.29, 111.83),
        ];
        sort_places(&mut places, SortMode::Near, Some(me));
        assert_eq!(ids(&places), ["near", "mid", "far", "nowhere"]);

        for pair in places.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(distance_km(a.coordinates, Some(me)) <= distance_km(b.coordinates, Some(me)));
        }
    }

    #[test]
    fn near_without_fix_is_hot() {
        let mut near = vec![place("1", Some(4.9), false, None), place("2", Some(1.0), true, None)];
        let mut hot = near.clone();
        sort_places(&mut near, SortMode::Near, None);
        sort_places(&mut hot, SortMode::Hot, None);
        assert_eq!(near, hot);
    }

    #[test]
    fn every_mode_is_a_permutation() {
        let base = vec![
            located("x", 1.0, 110.0),
            place("y", Some(2.0), true, Some(1)),
            place("z", None, false, Some(3)),
            located("w", 3.0, 112.0),
        ];
        let mut expected: Vec<String> = base.iter().map(|p| p.id.clone()).collect();
        expected.sort();

        for mode in SortMode::ALL {
            for fix in [None, Some(Coordinates::new(2.0, 111.0))] {
                let mut places = base.clone();
                sort_places(&mut places, mode, fix);
                let mut got: Vec<String> = places.iter().map(|p| p.id.clone()).collect();
                got.sort();
                assert_eq!(got, expected, "mode {mode} fix {fix:?}");
            }
        }
    }

    #[test]
    fn geolocation_failure_falls_back_silently() {
        let mut places = vec![place("1", Some(1.0), false, None), place("2", Some(3.0), false, None)];
        let fix = sort_with_geolocation(&mut places, SortMode::Near, &FixedLocation(None), DEFAULT_GEOLOCATION_TIMEOUT)
            .now_or_never()
            .unwrap();
        assert_eq!(fix, None);
        assert_eq!(ids(&places), ["2", "1"]);
    }

    #[test]
    fn geolocation_is_only_asked_for_near() {
        let me = Coordinates::new(1.0, 110.0);
        let mut places = vec![located("far", 5.0, 115.0), located("close", 1.0, 110.1)];

        let fix = sort_with_geolocation(&mut places, SortMode::Top, &FixedLocation(Some(me)), DEFAULT_GEOLOCATION_TIMEOUT)
            .now_or_never()
            .unwrap();
        assert_eq!(fix, None);
        assert_eq!(ids(&places), ["far", "close"]);

        let fix = sort_with_geolocation(&mut places, SortMode::Near, &FixedLocation(Some(me)), DEFAULT_GEOLOCATION_TIMEOUT)
            .now_or_never()
            .unwrap();
        assert_eq!(fix, Some(me));
        assert_eq!(ids(&places), ["close", "far"]);
    }
}
