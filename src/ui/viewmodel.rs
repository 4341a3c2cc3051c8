//! View model types representing renderable listing and sheet state.
//!
//! View models are computed from [`crate::app::DiscoveryState`] and handed to the
//! host's [`crate::runtime::Renderer`] and [`crate::runtime::SheetView`]. They
//! contain no business logic, only display-ready data: formatted ratings, price
//! marks, ready-made links and highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use placesheet::ui::viewmodel::{HeaderInfo, EmptyState};
//!
//! let header = HeaderInfo {
//!     title: "Sarawak · Taste".to_string(),
//!     subtitle: "Cross-city results · pick a city above to narrow down".to_string(),
//! };
//! let empty = EmptyState {
//!     message: "No places found".to_string(),
//!     subtitle: "Try another category or clear the search".to_string(),
//! };
//! assert!(header.title.ends_with("Taste"));
//! assert!(!empty.message.is_empty());
//! ```

use crate::app::SheetPhase;
use crate::domain::SortMode;
use serde::Serialize;

/// Complete listing view model.
///
/// Serializable so hosts that template on the JavaScript side can take it as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListViewModel {
    pub header: HeaderInfo,

    /// City chips, only present for region-wide listings.
    ///
    /// The first chip is "All" (empty slug), followed by the directory's cities in
    /// chip order.
    pub city_chips: Vec<CityChip>,

    /// Active sort, for toolbar highlighting.
    pub sort: SortMode,

    /// Active category, empty for all.
    pub category: String,

    /// Current search text, echoed back into the search box.
    pub query: String,

    /// Cards in display order.
    pub cards: Vec<CardViewModel>,

    /// Shown instead of cards when nothing matched.
    pub empty_state: Option<EmptyState>,

    /// Set when a detail request named an id the catalog does not have.
    pub not_found: Option<String>,

    /// True while a `near` sort waits for a position fix; cards are in `hot` order meanwhile.
    pub locating: bool,

    /// The open sheet, if any.
    pub sheet: Option<SheetViewModel>,
}

/// Page title and subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

/// One city chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityChip {
    /// Empty for the "All" chip.
    pub slug: String,
    pub label: String,
    pub active: bool,
}

/// Display information for one place card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardViewModel {
    pub id: String,
    pub name: String,

    /// City name badge, shown only on region-wide listings without a city.
    pub city_badge: Option<String>,

    /// `category · address`, skipping whichever is empty.
    pub meta: String,

    /// Up to three tags.
    pub tags: Vec<String>,

    /// `⭐ 4.5`, or empty when unrated.
    pub rating: String,

    /// `฿` repeated by price level, or empty.
    pub price: String,

    pub cover: String,

    /// Link to the dedicated detail page.
    pub detail_href: String,

    pub links: Vec<ContactLink>,

    pub favorite: bool,

    /// Character ranges of `name` matching the query, `(start, end)` with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Contact channel kinds, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    WhatsApp,
    Website,
    Email,
    Instagram,
    Facebook,
}

/// A ready-to-use contact link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub kind: ContactKind,
    pub href: String,
    /// Whether the link should open in a new tab.
    pub external: bool,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Content of the detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetViewModel {
    pub id: String,
    #[serde(skip)]
    pub phase: SheetPhase,
    pub cover: String,
    pub title: String,
    /// `⭐ 4.5`, or empty when unrated.
    pub rating: String,
    /// Up to two tags.
    pub tags: Vec<String>,
    /// `tel:` link, `None` without a phone number.
    pub call_href: Option<String>,
    /// Map link, `None` (button disabled) without coordinates.
    pub map_href: Option<String>,
    pub share: SharePayload,
    pub favorite: bool,
}

/// Data handed to the platform share dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}
