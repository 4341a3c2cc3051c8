//! Filter, sort and selection state.
//!
//! [`FilterState`] is the single snapshot that the list pipeline, the query string
//! and the detail sheet all derive from. Empty strings mean "all" for the city and
//! category fields.

use super::error::{DiscoveryError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Geographic scope of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// No scope chosen; a city filter (if any) stands alone.
    #[default]
    None,
    /// Region-wide listing across every city, optionally narrowed to one city.
    Region,
}

/// Ordering applied to the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Featured first, then rating, then recency.
    #[default]
    Hot,
    /// Most recently updated first.
    New,
    /// Highest rated first.
    Top,
    /// Closest to the device first; needs a geolocation fix.
    Near,
}

impl SortMode {
    /// Every mode, in toolbar order.
    pub const ALL: [Self; 4] = [Self::Hot, Self::New, Self::Top, Self::Near];

    /// Query-string token for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Near => "near",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hot" => Ok(Self::Hot),
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            "near" => Ok(Self::Near),
            other => Err(DiscoveryError::InvalidState(format!(
                "unknown sort mode: {other:?}"
            ))),
        }
    }
}

/// Current filter, sort and selection snapshot.
///
/// Construct through [`FilterState::normalized`] or the validated setters on
/// [`crate::app::DiscoveryState`] so the region-default rule always holds: a
/// category without a scope implies region scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub scope: Scope,
    pub city_id: String,
    pub category: String,
    pub query: String,
    pub sort: SortMode,
    pub selected_id: Option<String>,
}

impl FilterState {
    /// Applies the region-default rule and returns the state.
    ///
    /// # Examples
    ///
    /// ```
    /// use placesheet::domain::{FilterState, Scope};
    ///
    /// let state = FilterState {
    ///     category: "Taste".to_string(),
    ///     ..FilterState::default()
    /// }
    /// .normalized();
    /// assert_eq!(state.scope, Scope::Region);
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.scope == Scope::None && !self.category.is_empty() {
            self.scope = Scope::Region;
        }
        self
    }

    /// True when listing across cities with no single city picked.
    #[must_use]
    pub fn is_cross_city(&self) -> bool {
        self.scope == Scope::Region && self.city_id.is_empty()
    }
}
