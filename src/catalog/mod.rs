//! Catalog layer: raw feed ingestion and reference data.
//!
//! # Modules
//!
//! - `models`: Raw feed records exactly as the data provider ships them
//! - `normalize`: Raw → [`crate::domain::PlaceRecord`] conversion and the active-only [`Catalog`]
//! - `cities`: City directory (display names, chip order) from built-in or TOML files
//! - `favorites`: Favorites store trait and an in-memory implementation

pub mod cities;
pub mod favorites;
pub mod models;
pub mod normalize;

pub use cities::{City, CityDirectory};
pub use favorites::{Favorites, MemoryFavorites};
pub use models::{RawFeed, RawLocation, RawPlace, RawSocials};
pub use normalize::{category_from_tags, normalize_place, parse_updated_at, Catalog};
