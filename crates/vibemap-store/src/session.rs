//! A single painter session: grid state plus write-through persistence.

use thiserror::Error;
use tracing::warn;

use vibemap_core::share::{parse_share_token, share_token, share_url};
use vibemap_core::{Cell, GridDimensions, GridError, GridSnapshot, GridState, Palette};

use crate::kv::{KvStore, StoreError};

/// Fixed storage key the grid state persists under.
pub const GRID_STATE_KEY: &str = "gridState";

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One grid-painting session: owns the state and persists the full snapshot
/// after every successful mutation. Last write wins; there is never more
/// than one writer per session.
#[derive(Debug)]
pub struct GridSession<S: KvStore> {
    grid: GridState,
    store: S,
}

impl<S: KvStore> GridSession<S> {
    /// Open a session, restoring persisted state when present.
    ///
    /// A corrupt or shape-mismatched persisted value is logged and replaced
    /// with the default empty grid; a session never refuses to start over
    /// bad saved state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] only when the store itself cannot be
    /// read.
    pub fn open(
        dimensions: GridDimensions,
        palette: Palette,
        store: S,
    ) -> Result<Self, SessionError> {
        let grid = match store.get(GRID_STATE_KEY)? {
            Some(raw) => match restore_from_raw(dimensions, palette.clone(), &raw) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!(error = %e, "persisted grid state unusable, starting empty");
                    GridState::new(dimensions, palette)
                }
            },
            None => GridState::new(dimensions, palette),
        };
        Ok(Self { grid, store })
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Paint a cell and persist the new state.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from the paint and [`StoreError`] from the
    /// write. A failed paint leaves both grid and store untouched.
    pub fn paint(&mut self, index: usize, cell: Cell) -> Result<(), SessionError> {
        self.grid.paint(index, cell)?;
        self.persist()
    }

    /// Clear a cell and persist the new state.
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from the clear and [`StoreError`] from the
    /// write.
    pub fn clear(&mut self, index: usize) -> Result<(), SessionError> {
        self.grid.clear(index)?;
        self.persist()
    }

    /// Empty the whole grid and persist.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the write.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.grid.reset();
        self.persist()
    }

    /// Replace the whole grid from a snapshot (the load-from-file path).
    ///
    /// # Errors
    ///
    /// Propagates [`GridError`] from validation; an invalid snapshot leaves
    /// the current grid in place.
    pub fn import_snapshot(&mut self, snapshot: &GridSnapshot) -> Result<(), SessionError> {
        self.grid = GridState::restore(
            self.grid.dimensions(),
            self.grid.palette().clone(),
            snapshot,
        )?;
        self.persist()
    }

    /// Replace the whole grid from a share token.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CorruptToken`] (wrapped) for an undecodable
    /// token; validation errors as in [`Self::import_snapshot`].
    pub fn import_share_token(&mut self, token: &str) -> Result<(), SessionError> {
        let snapshot = parse_share_token(token)?;
        self.import_snapshot(&snapshot)
    }

    /// Current state as a share token.
    #[must_use]
    pub fn share_token(&self) -> String {
        share_token(&self.grid.snapshot())
    }

    /// Current state as a full share URL.
    #[must_use]
    pub fn share_url(&self, base_url: &str) -> String {
        share_url(base_url, &self.share_token())
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        let json = serde_json::to_string(&self.grid.snapshot()).map_err(StoreError::Parse)?;
        self.store.set(GRID_STATE_KEY, &json)?;
        Ok(())
    }
}

fn restore_from_raw(
    dimensions: GridDimensions,
    palette: Palette,
    raw: &str,
) -> Result<GridState, SessionError> {
    let snapshot: GridSnapshot = serde_json::from_str(raw).map_err(StoreError::Parse)?;
    Ok(GridState::restore(dimensions, palette, &snapshot)?)
}
