//! City directory: display names and chip order for city slugs.
//!
//! Directories are TOML documents, either built into the crate or loaded from a
//! file supplied through configuration.
//!
//! # TOML Format
//!
//! ```toml
//! name = "sarawak"
//! region_label = "Sarawak"
//!
//! [[cities]]
//! slug = "kuching"
//! name = "Kuching"
//! ```

use crate::domain::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One city entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct City {
    pub slug: String,
    pub name: String,
}

/// Ordered set of cities making up a region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CityDirectory {
    /// Directory identifier (also the built-in lookup name).
    pub name: String,
    /// Label shown for region-wide listings.
    pub region_label: String,
    /// Cities in chip order.
    pub cities: Vec<City>,
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::from_toml(include_str!("../../cities/sarawak.toml")).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in city directory is malformed");
            Self {
                name: "sarawak".to_string(),
                region_label: "Sarawak".to_string(),
                cities: Vec::new(),
            }
        })
    }
}

impl CityDirectory {
    /// Loads a built-in directory by name. Only `sarawak` ships with the crate.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sarawak" => Some(Self::default()),
            _ => None,
        }
    }

    /// Parses a directory from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::CityDirectory`] if the TOML is invalid or a field is missing.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| DiscoveryError::CityDirectory(format!("failed to parse TOML: {e}")))
    }

    /// Loads a directory from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Display name for a slug, falling back to the slug itself.
    #[must_use]
    pub fn display_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.cities
            .iter()
            .find(|c| c.slug == slug)
            .map_or(slug, |c| c.name.as_str())
    }
}
