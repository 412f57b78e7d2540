//! Venue sources: where the ranker's input comes from.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use vibemap_core::{distance_meters, Coordinate, Venue};

/// Errors raised while querying a venue source.
#[derive(Debug, Error)]
pub enum VenueSourceError {
    /// The venues file could not be read.
    #[error("failed to read venues file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The venues file is not a valid venue array.
    #[error("failed to parse venues file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A queryable source of venues around an origin.
///
/// Abstracts over whatever backend supplies venues; the ranker only ever
/// sees the returned venue list, never the backend.
pub trait VenueSource {
    /// Venues with a coordinate within `radius_m` of `origin`, optionally
    /// restricted to an exact case-insensitive category, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`VenueSourceError`] when the source cannot be read or
    /// parsed; callers report it upward as an opaque search failure.
    fn search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: Option<&str>,
    ) -> Result<Vec<Venue>, VenueSourceError>;
}

/// A [`VenueSource`] backed by a JSON file holding an array of venues.
#[derive(Debug)]
pub struct FileVenueSource {
    path: PathBuf,
}

impl FileVenueSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<Venue>, VenueSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| VenueSourceError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl VenueSource for FileVenueSource {
    fn search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: Option<&str>,
    ) -> Result<Vec<Venue>, VenueSourceError> {
        let venues = self.load()?;
        let total = venues.len();

        let matches: Vec<Venue> = venues
            .into_iter()
            .filter(|venue| category.is_none_or(|filter| venue.matches_category(filter)))
            .filter(|venue| {
                venue
                    .coordinate
                    .is_some_and(|c| distance_meters(origin, c) <= radius_m)
            })
            .collect();

        debug!(total, matched = matches.len(), radius_m, "venue search");
        Ok(matches)
    }
}
