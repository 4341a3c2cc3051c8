//! Host capabilities the runtime drives.
//!
//! The page, the address bar and the device are all owned by the host. These traits
//! are the whole surface the core needs from them; a browser host implements them
//! over `history`, `matchMedia`, the sheet's DOM nodes and the renderer, and tests
//! implement them with recording fakes.
//!
//! Geolocation and favorites are re-exported from the layers that define them.

use crate::app::{Location, SheetPhase};
use crate::ui::{ListViewModel, SheetViewModel};

pub use crate::catalog::Favorites;
pub use crate::pipeline::Geolocation;

/// Address bar and history access.
///
/// There is no `push`: listing state only ever replaces the current entry.
pub trait UrlHistory {
    /// Current path and query string.
    fn location(&self) -> Location;

    /// Replaces the current history entry's URL.
    fn replace(&self, url: &str);

    /// Leaves the page for `href`.
    fn navigate(&self, href: &str);
}

/// Viewport measurement, read fresh on every call.
pub trait Viewport {
    /// Current layout width in CSS pixels.
    fn width(&self) -> f64;
}

/// The detail sheet's DOM, as an effect sink.
pub trait SheetView {
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
    fn show_backdrop(&mut self);
    fn hide_backdrop(&mut self);
    fn populate(&mut self, content: &SheetViewModel);
    /// Renders the committed phase and drops any inline drag offset.
    fn apply_phase(&mut self, phase: SheetPhase);
    /// Positions the sheet top at `fraction` of the viewport height.
    fn set_offset(&mut self, fraction: f64);
    fn save_focus(&mut self);
    fn restore_focus(&mut self);
    fn focus_first(&mut self);
    fn attach_drag_listeners(&mut self);
    fn detach_drag_listeners(&mut self);
}

/// Paints the listing.
pub trait Renderer {
    fn render(&mut self, view: &ListViewModel);
}
