//! Detail presentation decision: full page or in-page sheet.

use crate::catalog::Catalog;
use crate::domain::PlaceRecord;

/// Detail page used when none is configured.
pub const DEFAULT_DETAIL_PAGE: &str = "place.html";

/// Outcome of a detail request.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation<'a> {
    /// Leave the listing for the dedicated detail page.
    Navigate(String),
    /// Show the record in the bottom sheet.
    Sheet(&'a PlaceRecord),
    /// The id is not in the catalog.
    NotFound(String),
}

/// Link to the dedicated detail page for `place`, carrying its id and city.
///
/// # Examples
///
/// ```
/// use placesheet::app::presenter::detail_href;
/// use placesheet::domain::PlaceRecord;
///
/// let place = PlaceRecord::new("kch 1", "Kuching Waterfront", "kuching");
/// assert_eq!(detail_href("place.html", &place), "place.html?id=kch+1&city=kuching");
/// ```
#[must_use]
pub fn detail_href(detail_page: &str, place: &PlaceRecord) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &place.id)
        .append_pair("city", &place.city_id)
        .finish();
    format!("{detail_page}?{query}")
}

/// Decides how to present `id`.
///
/// `wide` must be measured by the caller at the moment of the request; a viewport
/// at or above the breakpoint navigates, anything narrower gets the sheet.
/// Unknown ids yield [`Presentation::NotFound`] whatever the width.
#[must_use]
pub fn present<'a>(catalog: &'a Catalog, id: &str, wide: bool, detail_page: &str) -> Presentation<'a> {
    let Some(place) = catalog.get(id) else {
        tracing::debug!(place_id = %id, "detail requested for unknown place");
        return Presentation::NotFound(id.to_string());
    };

    if wide {
        Presentation::Navigate(detail_href(detail_page, place))
    } else {
        Presentation::Sheet(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![PlaceRecord::new("sbu-7", "Rejang Esplanade", "sibu")])
    }

    #[test]
    fn wide_viewport_navigates_with_id_and_city() {
        let catalog = catalog();
        assert_eq!(
            present(&catalog, "sbu-7", true, DEFAULT_DETAIL_PAGE),
            Presentation::Navigate("place.html?id=sbu-7&city=sibu".to_string())
        );
    }

    #[test]
    fn narrow_viewport_gets_the_record() {
        let catalog = catalog();
        match present(&catalog, "sbu-7", false, DEFAULT_DETAIL_PAGE) {
            Presentation::Sheet(place) => assert_eq!(place.name, "Rejang Esplanade"),
            other => panic!("expected sheet, got {other:?}"),
        }
    }

    #[test]
    fn unknown_id_is_signaled_on_both_widths() {
        let catalog = catalog();
        for wide in [true, false] {
            assert_eq!(
                present(&catalog, "nope", wide, DEFAULT_DETAIL_PAGE),
                Presentation::NotFound("nope".to_string())
            );
        }
    }
}
