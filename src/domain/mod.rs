//! Domain layer for the place discovery core.
//!
//! Core types shared by every other layer, free of browser or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`place`]: Place record model and sentinel accessors
//! - [`filter`]: Filter/sort/selection state and its enums

pub mod error;
pub mod filter;
pub mod place;

pub use error::{DiscoveryError, Result};
pub use filter::{FilterState, Scope, SortMode};
pub use place::{Contacts, Coordinates, PlaceRecord, PlaceStatus, Socials};
