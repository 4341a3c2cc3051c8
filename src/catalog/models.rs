//! Raw catalog record model.
//!
//! These types mirror the JSON feed exactly as the data provider ships it. They are
//! deliberately lenient: numeric fields are kept as [`serde_json::Value`] so that a
//! string where a number was expected degrades to "absent" instead of rejecting the
//! whole catalog. Normalization into [`crate::domain::PlaceRecord`] happens in
//! [`super::normalize`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw location object as found in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lng: Value,
}

/// Raw social links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSocials {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

/// One merchant entry from the data feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<Value>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub open_hours: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub price_level: Value,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub socials: Option<RawSocials>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Top-level feed envelope: either a bare array or `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFeed {
    Items { items: Vec<RawPlace> },
    List(Vec<RawPlace>),
}

impl RawFeed {
    #[must_use]
    pub fn into_places(self) -> Vec<RawPlace> {
        match self {
            Self::Items { items } => items,
            Self::List(list) => list,
        }
    }
}
