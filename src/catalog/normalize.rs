//! Normalization from raw feed records into [`PlaceRecord`]s.
//!
//! The feed is hand-maintained and uneven: categories are often missing, covers live
//! in either `images` or `cover`, numbers sometimes arrive as strings. Everything is
//! folded into the strict domain model here, once, so the pipelines never need to
//! second-guess a field.

use super::models::{RawFeed, RawPlace};
use crate::domain::error::{DiscoveryError, Result};
use crate::domain::{Contacts, Coordinates, PlaceRecord, PlaceStatus, Socials};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::collections::HashSet;

/// Tag → category rules, checked in order; the first rule with a matching tag wins.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Stay", &["stay", "hotel", "lodge", "resort"]),
    (
        "Culture",
        &[
            "culture", "museum", "temple", "history", "landmark", "market", "handicraft",
            "university", "shopping", "modern",
        ],
    ),
    ("Taste", &["food", "drink", "bar", "cafe", "seafood", "local"]),
    (
        "Experience",
        &[
            "nature", "beach", "park", "waterfall", "adventure", "scenic", "family", "event",
            "sport",
        ],
    ),
    ("Transport", &["transport"]),
];

/// Derives a category from a tag set, or an empty string when no rule matches.
///
/// # Examples
///
/// ```
/// use placesheet::catalog::category_from_tags;
///
/// let tags = vec!["Seafood".to_string(), "riverside".to_string()];
/// assert_eq!(category_from_tags(&tags), "Taste");
/// assert_eq!(category_from_tags(&[]), "");
/// ```
#[must_use]
pub fn category_from_tags(tags: &[String]) -> &'static str {
    let lowered: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    CATEGORY_RULES
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| lowered.contains(*k)))
        .map_or("", |(category, _)| *category)
}

/// Parses an `updatedAt` value: RFC 3339 first, then a bare `YYYY-MM-DD` date.
#[must_use]
pub fn parse_updated_at(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn tag_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Converts one raw feed entry into a domain record.
///
/// A missing or empty status reads as active; any status other than exactly
/// `active` makes the record inactive.
#[must_use]
pub fn normalize_place(raw: RawPlace) -> PlaceRecord {
    let tags: Vec<String> = raw.tag_ids.iter().filter_map(tag_text).collect();

    let category = raw
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| category_from_tags(&tags).to_string());

    let cover = raw
        .images
        .first()
        .filter(|src| !src.is_empty())
        .cloned()
        .or(raw.cover)
        .unwrap_or_default();

    let coordinates = raw.location.and_then(|loc| {
        Some(Coordinates::new(finite_number(&loc.lat)?, finite_number(&loc.lng)?))
    });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let price_level = finite_number(&raw.price_level).map(|p| p.round().clamp(0.0, 3.0) as u8);

    let status = match raw.status.as_deref() {
        None | Some("" | "active") => PlaceStatus::Active,
        Some(_) => PlaceStatus::Inactive,
    };

    let socials = raw.socials.unwrap_or_default();

    PlaceRecord {
        id: raw.id,
        name: raw.name.unwrap_or_default(),
        city_id: raw.city_id.unwrap_or_default(),
        category,
        tags,
        address: raw.address.unwrap_or_default(),
        coordinates,
        cover,
        hours: raw.open_hours.or(raw.hours).unwrap_or_default(),
        rating: finite_number(&raw.rating).map(|r| r.clamp(0.0, 5.0)),
        price_level,
        contacts: Contacts {
            phone: raw.phone.unwrap_or_default(),
            whatsapp: raw.whatsapp.unwrap_or_default(),
            website: raw.website.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            socials: Socials {
                instagram: socials.instagram.unwrap_or_default(),
                facebook: socials.facebook.unwrap_or_default(),
            },
        },
        status,
        featured: raw.featured.unwrap_or(false),
        updated_at: raw.updated_at.as_deref().and_then(parse_updated_at),
    }
}

/// The loaded, active-only place catalog.
///
/// Inactive records are dropped on construction, so nothing downstream can ever
/// render them. Catalog order is feed order and is the tiebreaker for every sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    places: Vec<PlaceRecord>,
}

impl Catalog {
    /// Builds a catalog from already-normalized records.
    ///
    /// Drops inactive records and later duplicates of an id.
    #[must_use]
    pub fn from_records(records: Vec<PlaceRecord>) -> Self {
        let total = records.len();
        let mut seen = HashSet::new();
        let places: Vec<PlaceRecord> = records
            .into_iter()
            .filter(PlaceRecord::is_active)
            .filter(|p| {
                let fresh = seen.insert(p.id.clone());
                if !fresh {
                    tracing::warn!(place_id = %p.id, "duplicate place id dropped");
                }
                fresh
            })
            .collect();

        tracing::debug!(total, active = places.len(), "catalog built");
        Self { places }
    }

    /// Normalizes raw feed entries and builds a catalog from them.
    #[must_use]
    pub fn from_raw(raw: Vec<RawPlace>) -> Self {
        Self::from_records(raw.into_iter().map(normalize_place).collect())
    }

    /// Decodes a JSON feed (bare array or `{ "items": [...] }`).
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Catalog`] if the payload is not a valid feed.
    pub fn from_json(json: &str) -> Result<Self> {
        let feed: RawFeed = serde_json::from_str(json)
            .map_err(|e| DiscoveryError::Catalog(format!("failed to parse feed: {e}")))?;
        Ok(Self::from_raw(feed.into_places()))
    }

    #[must_use]
    pub fn places(&self) -> &[PlaceRecord] {
        &self.places
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PlaceRecord> {
        self.places.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
