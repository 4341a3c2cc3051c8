//! Placesheet: the discovery core of a regional place directory.
//!
//! A listing page shows places (eateries, attractions, shops) filtered by city,
//! category and free text, ranked by one of four orders, with the whole state
//! mirrored in the query string so any view can be shared as a link. On narrow
//! screens a place opens in a drag-to-snap bottom sheet; on wide screens it
//! navigates to a full detail page.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host page (DOM, history, geolocation, storage)     │  ← Implements runtime traits
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Executes actions
//! │  - DiscoveryController                              │
//! │  - Serialized URL writes                            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Decisions only
//! │  - Event handling, state store                      │
//! │  - Query-string codec, detail presenter             │
//! │  - Bottom-sheet state machine                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Pipeline      │   │ Catalog       │   │ UI            │
//! │ (pipeline/)   │   │ (catalog/)    │   │ (ui/)         │
//! │ - Filter      │   │ - Normalize   │   │ - View models │
//! │ - Sort        │   │ - Cities      │   │ - Helpers     │
//! │ - Haversine   │   │ - Favorites   │   │ - Highlights  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): records, filter state, errors    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action state machine, URL codec, sheet FSM
//! - [`catalog`]: Raw feed normalization, city directory, favorites
//! - [`domain`]: Place records, filter state, errors
//! - [`pipeline`]: Filtering, sorting, great-circle distance
//! - [`runtime`]: Host capability traits and the controller
//! - [`ui`]: Serializable view models and formatting helpers
//! - [`observability`]: OpenTelemetry tracing into an in-memory buffer
//!
//! # Configuration
//!
//! The host passes a string map, typically the `data-*` attributes of the script tag:
//!
//! ```html
//! <script src="places.js" data-breakpoint_px="768" data-cities="sarawak"
//!         data-detail_page="place.html" data-trace_level="debug"></script>
//! ```
//!
//! # Example
//!
//! ```rust
//! use placesheet::app::Location;
//! use placesheet::catalog::Catalog;
//! use placesheet::{initialize, Config};
//!
//! let catalog = Catalog::from_json(r#"[
//!     {"id": "1", "name": "Kolo Mee Corner", "cityId": "kuching", "tagIds": ["Taste"], "rating": 4.6},
//!     {"id": "2", "name": "Tanjung Lobang", "cityId": "miri", "tagIds": ["Nature"], "rating": 4.4}
//! ]"#)?;
//!
//! let state = initialize(&Config::default(), catalog, &Location::from_href("/places.html?city=miri"));
//! assert_eq!(state.results.len(), 1);
//! # Ok::<(), placesheet::DiscoveryError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod observability;
pub mod pipeline;
pub mod runtime;
pub mod ui;

pub use app::{handle_event, Action, DiscoveryState, Event, Location, Settings, SheetPhase};
pub use domain::{DiscoveryError, FilterState, PlaceRecord, Result, Scope, SortMode};
pub use runtime::DiscoveryController;

use app::presenter::DEFAULT_DETAIL_PAGE;
use app::state::DEFAULT_BREAKPOINT_PX;
use app::url::DEFAULT_REGION_SLUG;
use catalog::{Catalog, CityDirectory};
use pipeline::DEFAULT_GEOLOCATION_TIMEOUT;
use std::collections::BTreeMap;
use std::time::Duration;

/// Page configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Viewport width (CSS px) at or above which details open as a full page. Default: 768
    pub breakpoint_px: u32,

    /// Upper bound on one geolocation request. Default: 3000
    pub geolocation_timeout_ms: u64,

    /// Slug written as `scope=` for region-wide listings. Default: `"sarawak"`
    pub region_slug: String,

    /// Full-page detail target. Default: `"place.html"`
    pub detail_page: String,

    /// Built-in city directory name. Ignored if `cities_file` is set.
    pub cities: Option<String>,

    /// Path to a TOML city directory. See [`catalog::cities`] for the format.
    pub cities_file: Option<String>,

    /// `EnvFilter` directives for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            geolocation_timeout_ms: millis(DEFAULT_GEOLOCATION_TIMEOUT),
            region_slug: DEFAULT_REGION_SLUG.to_string(),
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            cities: None,
            cities_file: None,
            trace_level: None,
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Malformed or missing numbers keep their defaults; blank strings count as unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use placesheet::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("breakpoint_px".to_string(), "1024".to_string());
    /// map.insert("geolocation_timeout_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.breakpoint_px, 1024);
    /// assert_eq!(config.geolocation_timeout_ms, 3000);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let breakpoint_px = map
            .get("breakpoint_px")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.breakpoint_px);

        let geolocation_timeout_ms = map
            .get("geolocation_timeout_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.geolocation_timeout_ms);

        Self {
            breakpoint_px,
            geolocation_timeout_ms,
            region_slug: text("region_slug").unwrap_or(defaults.region_slug),
            detail_page: text("detail_page").unwrap_or(defaults.detail_page),
            cities: text("cities"),
            cities_file: text("cities_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Runtime settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            region_slug: self.region_slug.clone(),
            detail_page: self.detail_page.clone(),
            geolocation_timeout: Duration::from_millis(self.geolocation_timeout_ms),
            breakpoint_px: self.breakpoint_px,
        }
    }

    /// Loads the configured city directory: file first, then built-in name, then the default.
    ///
    /// Failures are logged and fall back rather than aborting page setup.
    #[must_use]
    pub fn city_directory(&self) -> CityDirectory {
        self.cities_file.as_ref().map_or_else(
            || {
                self.cities.as_ref().map_or_else(CityDirectory::default, |name| {
                    CityDirectory::from_name(name).unwrap_or_else(|| {
                        tracing::debug!(cities = %name, "unknown city directory, using default");
                        CityDirectory::default()
                    })
                })
            },
            |path| {
                CityDirectory::from_file(path).unwrap_or_else(|e| {
                    tracing::warn!(cities_file = %path, error = %e, "failed to load city directory, using default");
                    CityDirectory::default()
                })
            },
        )
    }
}

/// Builds the initial page state from configuration, the catalog and the current URL.
///
/// Tracing is not initialized here; call [`observability::init_tracing`] first if
/// spans should be captured.
#[must_use]
pub fn initialize(config: &Config, catalog: Catalog, location: &Location) -> DiscoveryState {
    let _span = tracing::debug_span!("initialize", places = catalog.len(), query = %location.query).entered();

    let cities = config.city_directory();
    DiscoveryState::from_query(catalog, cities, config.settings(), &location.query)
}
