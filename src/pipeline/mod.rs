//! List pipeline: filter, then sort.
//!
//! # Modules
//!
//! - `geo`: Haversine distance and the geolocation capability
//! - `filter`: Stable multi-criteria filter
//! - `sort`: Stable ordering for `hot`, `new`, `top` and `near`

pub mod filter;
pub mod geo;
pub mod sort;

pub use filter::{filter_places, matches};
pub use geo::{distance_km, FixedLocation, Geolocation, EARTH_RADIUS_KM};
pub use sort::{sort_places, sort_with_geolocation, DEFAULT_GEOLOCATION_TIMEOUT};
