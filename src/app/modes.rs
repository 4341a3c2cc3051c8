//! Detail sheet phase types.
//!
//! These enums describe the committed state of the bottom sheet. Rendering reads
//! only the committed phase; the live drag offset is a separate, transient value
//! held by [`crate::app::sheet::SheetMachine`].
//!
//! # State Machine
//!
//! ```text
//!            open                 zoom
//! Closed ──────────▶ Half ─────────────────▶ Open
//!   ▲                 │  ▲                    │ ▲
//!   │      dragStart  ▼  │ dragEnd/Cancel     │ │
//!   │            Dragging { origin } ◀────────┘ │
//!   │                 │                         │
//!   └─── close / dragEnd > 75% ◀────────────────┘
//! ```

/// A resting position the sheet can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snap {
    /// Half-height, the position every open starts from.
    Half,
    /// Full-height.
    Open,
}

/// Committed sheet phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetPhase {
    /// No sheet shown. Initial and terminal.
    #[default]
    Closed,
    Half,
    Open,
    /// A drag gesture is live; `origin` is where an aborted drag returns to.
    Dragging {
        origin: Snap,
    },
}

impl SheetPhase {
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<Snap> for SheetPhase {
    fn from(snap: Snap) -> Self {
        match snap {
            Snap::Half => Self::Half,
            Snap::Open => Self::Open,
        }
    }
}

/// What asked the sheet to close. Only used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Backdrop,
    Escape,
    CloseButton,
}
