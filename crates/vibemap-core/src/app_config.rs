//! Application configuration.

use std::path::PathBuf;

use crate::grid::GridDimensions;

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration, loaded from `VIBEMAP_`-prefixed environment
/// variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Near/far partition threshold handed to the ranker.
    pub near_radius_m: u32,
    /// Radius handed to the venue source. Wider than `near_radius_m`, so
    /// the far bucket has something to show.
    pub search_radius_m: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    /// JSON file the venue source reads.
    pub venues_path: PathBuf,
    /// JSON file the grid session persists into.
    pub grid_state_path: PathBuf,
    /// Optional palette file; `None` uses the built-in palette.
    pub palette_path: Option<PathBuf>,
    /// Base URL that share links are built against.
    pub share_base_url: String,
}

impl AppConfig {
    #[must_use]
    pub fn grid_dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.grid_width, self.grid_height)
    }
}
