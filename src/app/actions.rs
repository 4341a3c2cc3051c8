//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never touches the page, the address bar or the device. It
//! mutates [`crate::app::DiscoveryState`] and returns a `Vec<Action>` describing
//! what the host has to do; [`crate::runtime::DiscoveryController`] executes them
//! in order.
//!
//! # Example
//!
//! ```rust
//! use placesheet::app::{Action, SheetPhase};
//!
//! let actions = vec![
//!     Action::LockScroll,
//!     Action::ShowBackdrop,
//!     Action::ApplySheetPhase(SheetPhase::Half),
//! ];
//! assert_eq!(actions.len(), 3);
//! ```

use super::modes::SheetPhase;
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replaces the current history entry's query string. Never pushes.
    ///
    /// An empty `query` means the bare path.
    ReplaceUrl {
        query: String,
    },

    /// Full-page navigation to a detail page.
    Navigate {
        href: String,
    },

    /// Disables background scrolling. Emitted at most once per open sheet.
    LockScroll,
    /// Re-enables background scrolling. Emitted only after a matching lock.
    UnlockScroll,

    ShowBackdrop,
    HideBackdrop,

    /// Fills the sheet with content for the given record.
    ///
    /// The runtime builds the content itself because it owns the favorites store
    /// and knows the current location for the share payload.
    PopulateSheet {
        id: String,
    },

    /// Renders the sheet at its committed phase, discarding any drag offset.
    ApplySheetPhase(SheetPhase),

    /// Moves the sheet top edge to a fraction of the viewport height while dragging.
    SetSheetOffset(f64),

    /// Remembers which element had focus before the sheet opened.
    SaveFocus,
    /// Returns focus to the element saved by [`Action::SaveFocus`].
    RestoreFocus,
    /// Moves focus to the first focusable element inside the sheet.
    FocusFirstInSheet,

    /// Registers pointer move/up listeners for one drag gesture.
    AttachDragListeners,
    /// Removes the listeners registered by [`Action::AttachDragListeners`].
    DetachDragListeners,

    /// Asks the device for a position fix.
    ///
    /// The answer comes back as [`crate::app::Event::LocationResolved`] carrying the
    /// same `generation`, so stale answers can be told apart.
    RequestLocation {
        generation: u64,
        timeout: Duration,
    },

    /// Flips the favorite flag of a place in the external store.
    ToggleFavorite {
        id: String,
    },
}
