//! Display formatting shared by cards and the detail sheet.
//!
//! # Features
//!
//! - **Ratings and prices**: `⭐ 4.5`, `฿฿`
//! - **Links**: `tel:`, WhatsApp, `mailto:`, social profiles and map links
//! - **Query highlighting**: fuzzy match ranges over a name, split into segments
//!   on UTF-8 character indices, never byte indices

use super::viewmodel::{ContactKind, ContactLink};
use crate::domain::{Contacts, Coordinates};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Highest price level that gets its own mark.
const MAX_PRICE_MARKS: u8 = 3;

/// Rating as shown on cards and in the sheet, empty when unrated.
///
/// # Examples
///
/// ```
/// use placesheet::ui::helpers::rating_text;
///
/// assert_eq!(rating_text(Some(4.46)), "⭐ 4.5");
/// assert_eq!(rating_text(None), "");
/// ```
#[must_use]
pub fn rating_text(rating: Option<f64>) -> String {
    rating.map_or_else(String::new, |r| format!("⭐ {r:.1}"))
}

/// Sheet variant of [`rating_text`]: a zero rating is treated as unrated.
///
/// # Examples
///
/// ```
/// use placesheet::ui::helpers::sheet_rating_text;
///
/// assert_eq!(sheet_rating_text(Some(4.46)), "⭐ 4.5");
/// assert_eq!(sheet_rating_text(Some(0.0)), "");
/// ```
#[must_use]
pub fn sheet_rating_text(rating: Option<f64>) -> String {
    rating_text(rating.filter(|r| *r != 0.0))
}

/// One `฿` per price level, capped at three. Empty for unknown or free.
///
/// # Examples
///
/// ```
/// use placesheet::ui::helpers::price_marks;
///
/// assert_eq!(price_marks(Some(2)), "฿฿");
/// assert_eq!(price_marks(Some(0)), "");
/// ```
#[must_use]
pub fn price_marks(level: Option<u8>) -> String {
    match level {
        None | Some(0) => String::new(),
        Some(n) => "฿".repeat(usize::from(n.min(MAX_PRICE_MARKS))),
    }
}

/// `category · address`, leaving out whichever part is empty.
#[must_use]
pub fn meta_line(category: &str, address: &str) -> String {
    match (category.is_empty(), address.is_empty()) {
        (false, false) => format!("{category} · {address}"),
        (false, true) => category.to_string(),
        (true, false) => address.to_string(),
        (true, true) => String::new(),
    }
}

/// `tel:` link with whitespace stripped, `None` without a number.
#[must_use]
pub fn call_href(phone: &str) -> Option<String> {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let encoded: String = form_urlencoded::byte_serialize(compact.as_bytes()).collect();
    Some(format!("tel:{encoded}"))
}

/// Google Maps link for a location, `None` without one.
///
/// # Examples
///
/// ```
/// use placesheet::domain::Coordinates;
/// use placesheet::ui::helpers::map_href;
///
/// assert_eq!(
///     map_href(Some(Coordinates::new(1.5, 110.25))).as_deref(),
///     Some("https://www.google.com/maps?q=1.5,110.25")
/// );
/// ```
#[must_use]
pub fn map_href(coordinates: Option<Coordinates>) -> Option<String> {
    coordinates.map(|c| format!("https://www.google.com/maps?q={},{}", c.lat, c.lng))
}

/// Contact links in display order, skipping empty channels.
///
/// WhatsApp numbers keep only their digits; a number with no digits is dropped.
#[must_use]
pub fn contact_links(contacts: &Contacts) -> Vec<ContactLink> {
    let mut links = Vec::new();

    if let Some(href) = call_href(&contacts.phone) {
        links.push(ContactLink { kind: ContactKind::Phone, href, external: false });
    }

    let digits: String = contacts.whatsapp.chars().filter(char::is_ascii_digit).collect();
    if !digits.is_empty() {
        links.push(ContactLink {
            kind: ContactKind::WhatsApp,
            href: format!("https://wa.me/{digits}"),
            external: true,
        });
    }

    if !contacts.website.is_empty() {
        links.push(ContactLink {
            kind: ContactKind::Website,
            href: contacts.website.clone(),
            external: true,
        });
    }

    if !contacts.email.is_empty() {
        links.push(ContactLink {
            kind: ContactKind::Email,
            href: format!("mailto:{}", contacts.email),
            external: false,
        });
    }

    for (kind, url) in [
        (ContactKind::Instagram, &contacts.socials.instagram),
        (ContactKind::Facebook, &contacts.socials.facebook),
    ] {
        if !url.is_empty() {
            links.push(ContactLink { kind, href: url.clone(), external: true });
        }
    }

    links
}

/// Character index ranges of `text` matched by `query`, coalesced into runs.
///
/// Uses the Skim fuzzy matcher, so a substring match highlights as one range.
/// Returns no ranges for a blank query or no match.
///
/// # Examples
///
/// ```
/// use placesheet::ui::helpers::highlight_ranges;
///
/// assert_eq!(highlight_ranges("Cat Museum", "muse"), vec![(4, 8)]);
/// assert!(highlight_ranges("Cat Museum", "").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let matcher = SkimMatcherV2::default();
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Splits `text` into `(segment, highlighted)` pieces following `ranges`.
///
/// Ranges are character indices with exclusive ends, sorted and non-overlapping,
/// as produced by [`highlight_ranges`]. Out-of-range ends are clamped.
///
/// # Examples
///
/// ```
/// use placesheet::ui::helpers::highlight_segments;
///
/// let parts = highlight_segments("Café Sia", &[(0, 4)]);
/// assert_eq!(parts, vec![("Café".to_string(), true), (" Sia".to_string(), false)]);
/// ```
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(pos);
        let end = end.min(chars.len());
        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
            pos = end;
        }
    }

    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Socials;

    #[test]
    fn only_the_sheet_hides_a_zero_rating() {
        assert_eq!(rating_text(Some(0.0)), "⭐ 0.0");
        assert_eq!(sheet_rating_text(Some(0.0)), "");
        assert_eq!(sheet_rating_text(None), "");
        assert_eq!(sheet_rating_text(Some(0.04)), "⭐ 0.0");
    }

    #[test]
    fn price_is_capped_at_three_marks() {
        assert_eq!(price_marks(Some(7)), "฿฿฿");
        assert_eq!(price_marks(None), "");
    }

    #[test]
    fn meta_line_skips_empty_parts() {
        assert_eq!(meta_line("Taste", "Jalan Padungan"), "Taste · Jalan Padungan");
        assert_eq!(meta_line("", "Jalan Padungan"), "Jalan Padungan");
        assert_eq!(meta_line("", ""), "");
    }

    #[test]
    fn contact_links_follow_display_order() {
        let contacts = Contacts {
            phone: "+60 82 123 456".into(),
            whatsapp: "+60 (12) 345-6789".into(),
            website: "https://example.my".into(),
            email: "hello@example.my".into(),
            socials: Socials {
                instagram: "https://instagram.com/x".into(),
                facebook: String::new(),
            },
        };
        let links = contact_links(&contacts);
        let kinds: Vec<ContactKind> = links.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            [ContactKind::Phone, ContactKind::WhatsApp, ContactKind::Website, ContactKind::Email, ContactKind::Instagram]
        );
        assert_eq!(links[0].href, "tel:%2B6082123456");
        assert_eq!(links[1].href, "https://wa.me/60123456789");
        assert_eq!(links[3].href, "mailto:hello@example.my");
    }

    #[test]
    fn whatsapp_without_digits_is_dropped() {
        let contacts = Contacts { whatsapp: "n/a".into(), ..Contacts::default() };
        assert!(contact_links(&contacts).is_empty());
        assert_eq!(call_href("   "), None);
    }

    #[test]
    fn segments_cover_the_whole_text() {
        let parts = highlight_segments("Kuching Waterfront", &[(0, 1), (8, 13)]);
        let joined: String = parts.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(joined, "Kuching Waterfront");
        assert_eq!(parts[0], ("K".to_string(), true));
        assert_eq!(parts[2], ("Water".to_string(), true));
    }
}
