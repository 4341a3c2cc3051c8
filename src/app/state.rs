//! Discovery state management and view model computation.
//!
//! This module defines [`DiscoveryState`], the state store behind the listing page.
//! It owns the current [`FilterState`], the derived result list, the detail sheet
//! machine and the last geolocation fix, and it computes view models from them.
//!
//! # Architecture
//!
//! Core data (catalog, city directory, settings) is kept apart from derived data
//! (`results`). Every setter re-runs the pipeline before returning, so `results`
//! always reflects the current filter and sort. Selection changes do not affect
//! the list and skip the pipeline.
//!
//! # Example
//!
//! ```rust
//! use placesheet::app::{DiscoveryState, Settings};
//! use placesheet::catalog::{Catalog, CityDirectory};
//! use placesheet::domain::PlaceRecord;
//!
//! let catalog = Catalog::from_records(vec![
//!     PlaceRecord::new("1", "Cat Museum", "kuching"),
//!     PlaceRecord::new("2", "Canada Hill", "miri"),
//! ]);
//! let mut state = DiscoveryState::from_query(catalog, CityDirectory::default(), Settings::default(), "city=miri");
//! assert_eq!(state.results.len(), 1);
//!
//! state.set_city("");
//! assert_eq!(state.results.len(), 2);
//! assert_eq!(state.query_string(), "");
//! ```

use super::presenter::{detail_href, DEFAULT_DETAIL_PAGE};
use super::sheet::SheetMachine;
use super::url::{parse_query, serialize_query, DEFAULT_REGION_SLUG};
use crate::catalog::{Catalog, CityDirectory, Favorites};
use crate::domain::error::Result;
use crate::domain::{Coordinates, FilterState, PlaceRecord, Scope, SortMode};
use crate::pipeline::{filter_places, sort_places, DEFAULT_GEOLOCATION_TIMEOUT};
use crate::ui::helpers::{contact_links, highlight_ranges, map_href, meta_line, price_marks, rating_text, sheet_rating_text, call_href};
use crate::ui::viewmodel::{
    CardViewModel, CityChip, EmptyState, HeaderInfo, ListViewModel, SharePayload, SheetViewModel,
};
use std::time::Duration;

/// Viewport width, in CSS pixels, from which details open as a full page.
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

const CARD_TAGS: usize = 3;
const SHEET_TAGS: usize = 2;

/// Behavioral settings resolved from [`crate::Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Slug written as `scope=` for region-wide listings.
    pub region_slug: String,
    /// Page that full-page details navigate to.
    pub detail_page: String,
    /// Bound on one geolocation request.
    pub geolocation_timeout: Duration,
    /// Viewport width at or above which details navigate instead of opening the sheet.
    pub breakpoint_px: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region_slug: DEFAULT_REGION_SLUG.to_string(),
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
        }
    }
}

/// Central state container for one listing page.
///
/// Mutated only through its setters (by the event handler), so the region-default
/// rule and the derived result list are always consistent with the filter.
#[derive(Debug, Clone)]
pub struct DiscoveryState {
    /// Active places in feed order.
    pub catalog: Catalog,

    /// City names and chip order.
    pub cities: CityDirectory,

    pub settings: Settings,

    filter: FilterState,

    /// Places matching the filter, in sort order.
    ///
    /// A `near` sort without a fix is in `hot` order.
    pub results: Vec<PlaceRecord>,

    /// Detail sheet state machine.
    pub sheet: SheetMachine,

    /// Last successful geolocation fix of this session.
    ///
    /// Reused by later `near` sorts instead of asking the device again.
    pub last_fix: Option<Coordinates>,

    /// Bumped for every geolocation request; answers carrying an older value are stale.
    pub location_generation: u64,

    /// True while the latest geolocation request is unanswered.
    pub location_pending: bool,

    /// Id of the last detail request that did not resolve.
    pub not_found: Option<String>,
}

impl DiscoveryState {
    /// Creates the state from an initial filter and runs the pipeline once.
    #[must_use]
    pub fn new(catalog: Catalog, cities: CityDirectory, settings: Settings, filter: FilterState) -> Self {
        let mut state = Self {
            catalog,
            cities,
            settings,
            filter: filter.normalized(),
            results: Vec::new(),
            sheet: SheetMachine::default(),
            last_fix: None,
            location_generation: 0,
            location_pending: false,
            not_found: None,
        };
        state.recompute();
        state
    }

    /// Creates the state from the page's initial query string.
    #[must_use]
    pub fn from_query(catalog: Catalog, cities: CityDirectory, settings: Settings, query: &str) -> Self {
        let filter = parse_query(query, &settings.region_slug);
        Self::new(catalog, cities, settings, filter)
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The current state as a query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        serialize_query(&self.filter, &self.settings.region_slug)
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.update(|f| f.scope = scope);
    }

    /// Narrows to one city; an empty slug means every city.
    pub fn set_city(&mut self, city_id: &str) {
        let city_id = city_id.trim().to_string();
        self.update(|f| f.city_id = city_id);
    }

    /// Narrows to one category; an empty name means every category.
    pub fn set_category(&mut self, category: &str) {
        let category = category.trim().to_string();
        self.update(|f| f.category = category);
    }

    /// Sets the free-text search, trimmed.
    pub fn set_query(&mut self, query: &str) {
        let query = query.trim().to_string();
        self.update(|f| f.query = query);
    }

    pub fn set_sort_mode(&mut self, sort: SortMode) {
        self.update(|f| f.sort = sort);
    }

    /// Sets the sort from its query-string token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiscoveryError::InvalidState`] for a name outside
    /// `hot`, `new`, `top`, `near`. The state is left unchanged.
    pub fn set_sort_name(&mut self, name: &str) -> Result<()> {
        let sort: SortMode = name.parse()?;
        self.set_sort_mode(sort);
        Ok(())
    }

    /// Clears the category and the search text together.
    pub fn clear(&mut self) {
        self.update(|f| {
            f.category.clear();
            f.query.clear();
        });
    }

    /// Sets or clears the selected place id. Does not touch the result list.
    pub fn select(&mut self, id: Option<&str>) {
        self.filter.selected_id = id.filter(|id| !id.is_empty()).map(str::to_string);
    }

    /// The fix the current sort should use, if any.
    #[must_use]
    pub fn active_fix(&self) -> Option<Coordinates> {
        if self.filter.sort == SortMode::Near {
            self.last_fix
        } else {
            None
        }
    }

    /// True while a `near` sort waits for its first fix.
    #[must_use]
    pub fn is_locating(&self) -> bool {
        self.location_pending && self.filter.sort == SortMode::Near
    }

    /// Re-runs filter and sort over the catalog.
    pub fn recompute(&mut self) {
        let mut results = filter_places(self.catalog.places(), &self.filter);
        sort_places(&mut results, self.filter.sort, self.active_fix());
        self.results = results;
    }

    fn update(&mut self, mutate: impl FnOnce(&mut FilterState)) {
        let mut next = self.filter.clone();
        mutate(&mut next);
        self.filter = next.normalized();
        self.recompute();
    }

    /// Computes the listing view model.
    ///
    /// `href` is the page's current URL, used for share payloads.
    #[must_use]
    pub fn compute_viewmodel(&self, favorites: &dyn Favorites, href: &str) -> ListViewModel {
        let _span = tracing::debug_span!("compute_viewmodel", results = self.results.len()).entered();

        let show_badge = self.filter.is_cross_city();
        let cards: Vec<CardViewModel> = self
            .results
            .iter()
            .map(|place| self.compute_card(place, show_badge, favorites))
            .collect();

        let empty_state = cards.is_empty().then(|| EmptyState {
            message: "No places found".to_string(),
            subtitle: "Try another city or category, or clear the search".to_string(),
        });

        ListViewModel {
            header: self.compute_header(),
            city_chips: self.compute_city_chips(),
            sort: self.filter.sort,
            category: self.filter.category.clone(),
            query: self.filter.query.clone(),
            cards,
            empty_state,
            not_found: self.not_found.clone(),
            locating: self.is_locating(),
            sheet: self.compute_sheet(favorites, href),
        }
    }

    /// Computes the sheet content for the record on display, if any.
    #[must_use]
    pub fn compute_sheet(&self, favorites: &dyn Favorites, href: &str) -> Option<SheetViewModel> {
        let place = self.catalog.get(self.sheet.record_id()?)?;

        Some(SheetViewModel {
            id: place.id.clone(),
            phase: self.sheet.phase(),
            cover: place.cover.clone(),
            title: place.name.clone(),
            rating: sheet_rating_text(place.rating),
            tags: place.tags.iter().take(SHEET_TAGS).cloned().collect(),
            call_href: call_href(&place.contacts.phone),
            map_href: map_href(place.coordinates),
            share: SharePayload {
                title: place.name.clone(),
                text: format!("{} · {}", place.name, place.city_id),
                url: href.to_string(),
            },
            favorite: favorites.is_favorite(&place.id),
        })
    }

    fn compute_card(&self, place: &PlaceRecord, show_badge: bool, favorites: &dyn Favorites) -> CardViewModel {
        CardViewModel {
            id: place.id.clone(),
            name: place.name.clone(),
            city_badge: show_badge.then(|| self.cities.display_name(&place.city_id).to_string()),
            meta: meta_line(&place.category, &place.address),
            tags: place.tags.iter().take(CARD_TAGS).cloned().collect(),
            rating: rating_text(place.rating),
            price: price_marks(place.price_level),
            cover: place.cover.clone(),
            detail_href: detail_href(&self.settings.detail_page, place),
            links: contact_links(&place.contacts),
            favorite: favorites.is_favorite(&place.id),
            highlight_ranges: highlight_ranges(&place.name, &self.filter.query),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let region = self.cities.region_label.as_str();
        let place_text = if self.filter.scope == Scope::Region || self.filter.city_id.is_empty() {
            region
        } else {
            self.cities.display_name(&self.filter.city_id)
        };

        let title = if self.filter.category.is_empty() {
            place_text.to_string()
        } else {
            format!("{place_text} · {}", self.filter.category)
        };

        let subtitle = if self.filter.is_cross_city() {
            "Cross-city results · pick a city above to narrow down".to_string()
        } else if self.filter.city_id.is_empty() {
            "All places".to_string()
        } else {
            format!("City results · {}", self.cities.display_name(&self.filter.city_id))
        };

        HeaderInfo { title, subtitle }
    }

    fn compute_city_chips(&self) -> Vec<CityChip> {
        if self.filter.scope != Scope::Region {
            return vec![];
        }

        let all = CityChip {
            slug: String::new(),
            label: "All".to_string(),
            active: self.filter.city_id.is_empty(),
        };
        std::iter::once(all)
            .chain(self.cities.cities.iter().map(|c| CityChip {
                slug: c.slug.clone(),
                label: c.name.clone(),
                active: c.slug == self.filter.city_id,
            }))
            .collect()
    }
}
