//! Core domain logic for vibemap: nearby-venue ranking and the grid notebook.
//!
//! Everything here is pure and synchronous. Collaborators that touch the
//! outside world (venue sources, persistence) live in `vibemap-store`
//! behind narrow traits; this crate only knows how to measure distances,
//! partition venues into near/far buckets, and mutate or serialize grid
//! state.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod geo;
pub mod grid;
pub mod palette;
pub mod ranker;
pub mod share;
pub mod venue;

pub use app_config::{AppConfig, Environment};
pub use geo::{distance_meters, Coordinate, EARTH_RADIUS_M};
pub use grid::{Cell, GridDimensions, GridError, GridSnapshot, GridState, NumericLabel};
pub use palette::{load_palette, Palette, PaletteEntry};
pub use ranker::{lucky_pick, rank, RankOptions, RankedVenues, DEFAULT_NEAR_RADIUS_M};
pub use share::{parse_share_token, share_token, share_url};
pub use venue::{canonical_category, RankedVenue, Venue};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but failed to parse or validate.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// The palette file could not be read.
    #[error("failed to read palette file {path}: {source}")]
    PaletteFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The palette file is not valid YAML.
    #[error("failed to parse palette file: {0}")]
    PaletteFileParse(#[from] serde_yaml::Error),

    /// The palette file parsed but violates a structural rule.
    #[error("palette validation failed: {0}")]
    Validation(String),
}
