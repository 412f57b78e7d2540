//! Paint palette configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One palette slot: a renderable symbol and a short label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Rendered glyph; the empty string for the reserved empty slot.
    pub symbol: String,
    pub label: String,
}

/// The fixed set of symbols a grid cell may hold.
///
/// Index 0 is always the empty entry. At most one entry may be designated
/// numeric: cells painted with it carry a validated `DDD.D` label instead of
/// a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    numeric_index: Option<usize>,
}

impl Palette {
    /// Build a palette from ordered entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when entry 0 is not the empty
    /// entry, labels are blank or duplicated (case-insensitively), fewer
    /// than two entries are given, or `numeric_index` does not point at a
    /// non-empty entry.
    pub fn new(
        entries: Vec<PaletteEntry>,
        numeric_index: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if entries.len() < 2 {
            return Err(ConfigError::Validation(
                "palette needs the empty entry plus at least one brush".to_string(),
            ));
        }
        if !entries[0].symbol.is_empty() {
            return Err(ConfigError::Validation(format!(
                "palette entry 0 is reserved for the empty cell, found symbol {:?}",
                entries[0].symbol
            )));
        }

        let mut seen_labels = HashSet::new();
        for entry in &entries {
            if entry.label.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "palette labels must be non-empty".to_string(),
                ));
            }
            if !seen_labels.insert(entry.label.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate palette label: {:?}",
                    entry.label
                )));
            }
        }

        if let Some(index) = numeric_index {
            if index == 0 || index >= entries.len() {
                return Err(ConfigError::Validation(format!(
                    "numeric entry index {index} does not point at a brush entry"
                )));
            }
        }

        Ok(Self {
            entries,
            numeric_index,
        })
    }

    /// The entry at `index`, if the palette has one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// All entries in palette order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries, the empty entry included.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Index of the numeric entry, if the palette carries one.
    #[must_use]
    pub fn numeric_index(&self) -> Option<usize> {
        self.numeric_index
    }

    /// Find an entry index by its label (case-insensitive).
    #[must_use]
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.label.eq_ignore_ascii_case(label))
    }
}

impl Default for Palette {
    /// The built-in eight-entry paint palette.
    fn default() -> Self {
        let entries = [
            ("", "empty"),
            ("💩", "poop"),
            ("🌳", "tree"),
            ("🍎", "apple"),
            ("🏢", "building"),
            ("🚧", "construction"),
            ("🙏", "prayer"),
            ("📊", "numeric"),
        ]
        .into_iter()
        .map(|(symbol, label)| PaletteEntry {
            symbol: symbol.to_string(),
            label: label.to_string(),
        })
        .collect();
        Self::new(entries, Some(7)).expect("default palette is valid")
    }
}

#[derive(Debug, Deserialize)]
struct PaletteFile {
    entries: Vec<PaletteFileEntry>,
}

#[derive(Debug, Deserialize)]
struct PaletteFileEntry {
    #[serde(default)]
    symbol: String,
    label: String,
    #[serde(default)]
    numeric: bool,
}

/// Load and validate a palette from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (including more than one entry flagged `numeric`).
pub fn load_palette(path: &Path) -> Result<Palette, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PaletteFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: PaletteFile = serde_yaml::from_str(&content).map_err(ConfigError::PaletteFileParse)?;

    if file.entries.iter().filter(|e| e.numeric).count() > 1 {
        return Err(ConfigError::Validation(
            "at most one palette entry may be numeric".to_string(),
        ));
    }
    let numeric_index = file.entries.iter().position(|e| e.numeric);

    let entries = file
        .entries
        .into_iter()
        .map(|e| PaletteEntry {
            symbol: e.symbol,
            label: e.label,
        })
        .collect();

    Palette::new(entries, numeric_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_entries(labels: &[(&str, &str)]) -> Vec<PaletteEntry> {
        labels
            .iter()
            .map(|(symbol, label)| PaletteEntry {
                symbol: (*symbol).to_string(),
                label: (*label).to_string(),
            })
            .collect()
    }

    #[test]
    fn default_palette_matches_the_painter() {
        let palette = Palette::default();
        assert_eq!(palette.entry_count(), 8);
        assert_eq!(palette.get(0).map(|e| e.symbol.as_str()), Some(""));
        assert_eq!(palette.get(2).map(|e| e.symbol.as_str()), Some("🌳"));
        assert_eq!(palette.numeric_index(), Some(7));
    }

    #[test]
    fn entry_zero_must_be_empty() {
        let entries = plain_entries(&[("x", "not-empty"), ("🌳", "tree")]);
        let err = Palette::new(entries, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn duplicate_labels_rejected_case_insensitively() {
        let entries = plain_entries(&[("", "empty"), ("🌳", "Tree"), ("🍎", "tree")]);
        let err = Palette::new(entries, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn numeric_index_cannot_be_the_empty_entry() {
        let entries = plain_entries(&[("", "empty"), ("📊", "numeric")]);
        assert!(Palette::new(entries.clone(), Some(0)).is_err());
        assert!(Palette::new(entries.clone(), Some(2)).is_err());
        assert!(Palette::new(entries, Some(1)).is_ok());
    }

    #[test]
    fn index_of_label_is_case_insensitive() {
        let palette = Palette::default();
        assert_eq!(palette.index_of_label("TREE"), Some(2));
        assert_eq!(palette.index_of_label("missing"), None);
    }

    #[test]
    fn load_palette_parses_yaml() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("palette.yaml");
        std::fs::write(
            &path,
            concat!(
                "entries:\n",
                "  - label: empty\n",
                "  - symbol: \"🌊\"\n",
                "    label: wave\n",
                "  - symbol: \"📊\"\n",
                "    label: numeric\n",
                "    numeric: true\n",
            ),
        )
        .expect("write palette");

        let palette = load_palette(&path).expect("palette should load");
        assert_eq!(palette.entry_count(), 3);
        assert_eq!(palette.numeric_index(), Some(2));
        assert_eq!(palette.get(1).map(|e| e.symbol.as_str()), Some("🌊"));
    }

    #[test]
    fn load_palette_missing_file_is_io_error() {
        let err = load_palette(Path::new("/nonexistent/palette.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::PaletteFileIo { .. }));
    }
}
