//! Grid state: a fixed-size sequence of palette cells with full-state
//! snapshots.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::Palette;

static NUMERIC_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d$").expect("valid regex"));

/// Errors raised by grid operations.
///
/// All of these are local, recoverable conditions: callers fall back to the
/// unchanged cell or the default empty grid rather than abort.
#[derive(Debug, Error)]
pub enum GridError {
    /// Cell index outside `[0, width * height)`.
    #[error("cell index {index} out of range for a {width}x{height} grid")]
    IndexOutOfRange {
        index: usize,
        width: usize,
        height: usize,
    },

    /// Numeric label does not match the `DDD.D` format.
    #[error("numeric label {0:?} does not match the DDD.D format")]
    InvalidLabelFormat(String),

    /// Snapshot length disagrees with the configured grid dimensions.
    #[error("snapshot holds {actual} cells, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Share token failed to base64-decode or JSON-parse.
    #[error("corrupt share token: {reason}")]
    CorruptToken { reason: String },

    /// Palette index with no palette entry behind it.
    #[error("palette index {0} has no palette entry")]
    UnknownPaletteIndex(usize),

    /// Numeric cell painted against a palette without a numeric entry.
    #[error("palette has no numeric entry")]
    NoNumericEntry,
}

/// A validated `DDD.D` numeric cell label, e.g. `"123.4"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericLabel(String);

impl NumericLabel {
    /// # Errors
    ///
    /// Returns [`GridError::InvalidLabelFormat`] unless the label is exactly
    /// three digits, a dot, and one digit.
    pub fn new(label: impl Into<String>) -> Result<Self, GridError> {
        let label = label.into();
        if NUMERIC_LABEL_RE.is_match(&label) {
            Ok(Self(label))
        } else {
            Err(GridError::InvalidLabelFormat(label))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NumericLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grid width and height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: usize,
    pub height: usize,
}

impl GridDimensions {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Unpainted.
    #[default]
    Empty,
    /// A palette symbol, by palette index (never 0).
    Symbol(usize),
    /// The numeric entry with its validated label.
    Numeric(NumericLabel),
}

/// A full-state serialization of a grid.
///
/// Serializes to one of two wire shapes: a bare array of palette indices,
/// or `{ "grid": [...], "tooltips": [...] }` when the palette carries a
/// numeric entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSnapshot {
    Labeled {
        grid: Vec<usize>,
        tooltips: Vec<Option<String>>,
    },
    Simple(Vec<usize>),
}

impl GridSnapshot {
    /// Number of cells the snapshot describes.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        match self {
            GridSnapshot::Labeled { grid, .. } | GridSnapshot::Simple(grid) => grid.len(),
        }
    }
}

/// The grid painter state machine.
///
/// Owns the palette it validates against. Mutations are synchronous and
/// bounds-checked; persistence is the caller's concern, and `vibemap-store`
/// writes a full snapshot after every successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    dimensions: GridDimensions,
    palette: Palette,
    cells: Vec<Cell>,
}

impl GridState {
    /// An all-empty grid.
    #[must_use]
    pub fn new(dimensions: GridDimensions, palette: Palette) -> Self {
        let cells = vec![Cell::Empty; dimensions.cell_count()];
        Self {
            dimensions,
            palette,
            cells,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] when `index` is not within
    /// `[0, width * height)`.
    pub fn cell(&self, index: usize) -> Result<&Cell, GridError> {
        self.check_index(index)?;
        Ok(&self.cells[index])
    }

    /// Set the cell at `index`.
    ///
    /// A failed paint leaves the grid untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] for an out-of-bounds index,
    /// [`GridError::UnknownPaletteIndex`] for a symbol index the palette
    /// does not carry, and [`GridError::NoNumericEntry`] when a numeric cell
    /// is painted against a palette without a numeric entry.
    pub fn paint(&mut self, index: usize, cell: Cell) -> Result<(), GridError> {
        self.check_index(index)?;
        self.check_cell(&cell)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Reset the cell at `index` to empty.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::IndexOutOfRange`] for an out-of-bounds index.
    pub fn clear(&mut self, index: usize) -> Result<(), GridError> {
        self.paint(index, Cell::Empty)
    }

    /// Reset every cell to empty.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Count of painted cells per palette index, in palette order.
    ///
    /// Empty cells are skipped; numeric cells count under the numeric
    /// palette entry.
    #[must_use]
    pub fn symbol_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for cell in &self.cells {
            let index = match cell {
                Cell::Empty => continue,
                Cell::Symbol(index) => *index,
                Cell::Numeric(_) => {
                    let Some(index) = self.palette.numeric_index() else {
                        continue;
                    };
                    index
                }
            };
            *counts.entry(index).or_insert(0) += 1;
        }
        counts
    }

    /// Produce a full-state snapshot.
    ///
    /// Palettes with a numeric entry produce the labeled shape even when no
    /// numeric cell is painted, so the wire shape stays stable across
    /// mutations.
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        let grid: Vec<usize> = self
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Empty => 0,
                Cell::Symbol(index) => *index,
                Cell::Numeric(_) => self.palette.numeric_index().unwrap_or(0),
            })
            .collect();

        if self.palette.numeric_index().is_some() {
            let tooltips = self
                .cells
                .iter()
                .map(|cell| match cell {
                    Cell::Numeric(label) => Some(label.as_str().to_string()),
                    _ => None,
                })
                .collect();
            GridSnapshot::Labeled { grid, tooltips }
        } else {
            GridSnapshot::Simple(grid)
        }
    }

    /// Rebuild a grid from a snapshot.
    ///
    /// A numeric palette index arriving without a label restores as a plain
    /// symbol cell: saves in the ints-only shape predate label persistence,
    /// so there is nothing to restore the label from.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] when the snapshot length (grid
    /// or tooltips) disagrees with `dimensions`,
    /// [`GridError::UnknownPaletteIndex`] for indices the palette does not
    /// carry, and [`GridError::InvalidLabelFormat`] for malformed labels.
    pub fn restore(
        dimensions: GridDimensions,
        palette: Palette,
        snapshot: &GridSnapshot,
    ) -> Result<Self, GridError> {
        let expected = dimensions.cell_count();
        if snapshot.cell_count() != expected {
            return Err(GridError::ShapeMismatch {
                expected,
                actual: snapshot.cell_count(),
            });
        }

        let (grid, tooltips) = match snapshot {
            GridSnapshot::Simple(grid) => (grid.as_slice(), None),
            GridSnapshot::Labeled { grid, tooltips } => {
                if tooltips.len() != expected {
                    return Err(GridError::ShapeMismatch {
                        expected,
                        actual: tooltips.len(),
                    });
                }
                (grid.as_slice(), Some(tooltips.as_slice()))
            }
        };

        let mut state = GridState::new(dimensions, palette);
        for (index, &palette_index) in grid.iter().enumerate() {
            if palette_index == 0 {
                continue;
            }
            if state.palette.get(palette_index).is_none() {
                return Err(GridError::UnknownPaletteIndex(palette_index));
            }

            let label = tooltips.and_then(|t| t[index].clone());
            state.cells[index] = match (state.palette.numeric_index(), label) {
                (Some(numeric), Some(label)) if numeric == palette_index => {
                    Cell::Numeric(NumericLabel::new(label)?)
                }
                _ => Cell::Symbol(palette_index),
            };
        }
        Ok(state)
    }

    fn check_index(&self, index: usize) -> Result<(), GridError> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(GridError::IndexOutOfRange {
                index,
                width: self.dimensions.width,
                height: self.dimensions.height,
            })
        }
    }

    fn check_cell(&self, cell: &Cell) -> Result<(), GridError> {
        match cell {
            Cell::Empty => Ok(()),
            Cell::Symbol(index) => {
                if *index == 0 || self.palette.get(*index).is_none() {
                    return Err(GridError::UnknownPaletteIndex(*index));
                }
                Ok(())
            }
            Cell::Numeric(_) => {
                if self.palette.numeric_index().is_none() {
                    return Err(GridError::NoNumericEntry);
                }
                Ok(())
            }
        }
    }
}
