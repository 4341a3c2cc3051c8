//! Runtime layer: executes actions against host capabilities.
//!
//! # Modules
//!
//! - `capabilities`: Traits the host implements (history, viewport, sheet DOM, renderer)
//! - `url_sync`: Queued, replace-only address bar writes
//! - `controller`: The per-page controller tying state, handler and capabilities together

pub mod capabilities;
pub mod controller;
pub mod url_sync;

pub use capabilities::{Favorites, Geolocation, Renderer, SheetView, UrlHistory, Viewport};
pub use controller::{Capabilities, DiscoveryController, LocationRequest};
pub use url_sync::UrlSync;
