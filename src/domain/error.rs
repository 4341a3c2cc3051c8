//! Error types for the place discovery core.
//!
//! This module defines the centralized error type [`DiscoveryError`] and a type alias
//! [`Result`] used throughout the crate. Absent data (missing ratings, coordinates,
//! unknown selections) is never an error; only structurally invalid state values and
//! collaborator failures surface here.

use thiserror::Error;

/// The main error type for discovery operations.
///
/// # Examples
///
/// ```
/// use placesheet::domain::DiscoveryError;
///
/// fn pick_sort(name: &str) -> Result<(), DiscoveryError> {
///     Err(DiscoveryError::InvalidState(format!("unknown sort mode: {name}")))
/// }
/// ```
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A state value outside its declared domain was supplied.
    ///
    /// Raised by validated setters (e.g. an unknown sort mode name) and by
    /// sheet gestures given a non-finite or non-positive viewport height.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The raw catalog payload could not be decoded.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A city directory could not be parsed or loaded.
    #[error("City directory error: {0}")]
    CityDirectory(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
