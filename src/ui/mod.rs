//! Presentation layer: view models and display formatting.
//!
//! Painting is the host's job. This layer turns state into display-ready data:
//!
//! ```text
//! DiscoveryState → compute_viewmodel → ListViewModel → Renderer (host)
//!                → compute_sheet     → SheetViewModel → SheetView (host)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types for the listing, cards and the detail sheet
//! - [`helpers`]: Rating, price, link and highlight formatting

pub mod helpers;
pub mod viewmodel;

pub use viewmodel::{
    CardViewModel, CityChip, ContactKind, ContactLink, EmptyState, HeaderInfo, ListViewModel,
    SharePayload, SheetViewModel,
};
