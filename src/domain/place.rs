//! Place domain model.
//!
//! A [`PlaceRecord`] is one point of interest in the catalog, already normalized from
//! the raw data feed (see [`crate::catalog`]). Optional numeric fields are exposed
//! through sentinel accessors so every comparator reads them the same way:
//!
//! | field        | absent value        |
//! |--------------|---------------------|
//! | `rating`     | `0.0`               |
//! | `price_level`| `0`                 |
//! | `updated_at` | `0` (Unix epoch)    |
//! | distance     | `f64::INFINITY`     |

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Publication status of a place record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceStatus {
    #[default]
    Active,
    /// Anything the feed marks other than `active` (`inactive`, `draft`, `closed`, ...).
    Inactive,
}

/// Social profile links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Socials {
    pub instagram: String,
    pub facebook: String,
}

/// Contact channels for a place. Empty strings mean "not available".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contacts {
    pub phone: String,
    pub whatsapp: String,
    pub website: String,
    pub email: String,
    pub socials: Socials,
}

/// One point of interest in the catalog.
///
/// # Fields
///
/// - `id`: unique identifier, also used in the `id` query parameter
/// - `city_id`: city slug the place belongs to (e.g. `kuching`)
/// - `category`: explicit or tag-derived category, empty when none applies
/// - `coordinates`: `None` when the feed has no usable location
/// - `rating`: 0–5, `None` when unrated
/// - `price_level`: 0–3, `None` when unknown
/// - `updated_at`: Unix timestamp (seconds) of the last update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub city_id: String,
    pub category: String,
    pub tags: Vec<String>,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub cover: String,
    pub hours: String,
    pub rating: Option<f64>,
    pub price_level: Option<u8>,
    pub contacts: Contacts,
    pub status: PlaceStatus,
    pub featured: bool,
    pub updated_at: Option<i64>,
}

impl PlaceRecord {
    /// Creates an active, unrated record with only identity fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use placesheet::domain::PlaceRecord;
    ///
    /// let place = PlaceRecord::new("kch-001", "Kuching Waterfront", "kuching");
    /// assert!(place.is_active());
    /// assert_eq!(place.rating_or_zero(), 0.0);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, city_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city_id: city_id.into(),
            category: String::new(),
            tags: Vec::new(),
            address: String::new(),
            coordinates: None,
            cover: String::new(),
            hours: String::new(),
            rating: None,
            price_level: None,
            contacts: Contacts::default(),
            status: PlaceStatus::Active,
            featured: false,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlaceStatus::Active
    }

    /// Rating with the unrated sentinel applied.
    #[must_use]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Price level with the unknown sentinel applied.
    #[must_use]
    pub fn price_level_or_zero(&self) -> u8 {
        self.price_level.unwrap_or(0)
    }

    /// Last update timestamp, Unix epoch when unknown.
    #[must_use]
    pub fn updated_at_or_epoch(&self) -> i64 {
        self.updated_at.unwrap_or(0)
    }
}
