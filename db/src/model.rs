//! The static suggestion table.

use std::collections::HashMap;
use std::path::Path;

use cli_recovery_core::SuggestionTemplate;

use crate::error::{DataError, Result};

const DEFAULT_MODEL: &str = include_str!("../data/model.json");

type TableType = HashMap<String, HashMap<String, Vec<SuggestionTemplate>>>;

/// Nested static mapping: fault category → normalized command → templates.
///
/// Loaded read-only from JSON; templates are validated lazily, per item, by
/// the lookup layer so one malformed entry never poisons the table.
///
/// # Examples
///
/// ```
/// use cli_recovery_db::SuggestionTable;
///
/// let table = SuggestionTable::load_default().unwrap();
/// let templates = table
///     .templates_for("UnrecognizedArguments", "storage account create")
///     .unwrap();
/// assert!(!templates.is_empty());
/// ```
#[derive(Debug)]
pub struct SuggestionTable {
    table: TableType,
}

impl SuggestionTable {
    /// Builds a table from an already-parsed mapping.
    pub fn new(table: TableType) -> Self {
        Self { table }
    }

    /// Loads the table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] when the file is missing and
    /// [`DataError::Json`] on malformed content.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    /// Loads the embedded default table.
    pub fn load_default() -> Result<Self> {
        Ok(Self::new(serde_json::from_str(DEFAULT_MODEL)?))
    }

    /// Raw templates registered for a (category, command) pair.
    pub fn templates_for(&self, category: &str, command: &str) -> Option<&[SuggestionTemplate]> {
        self.table
            .get(category)?
            .get(command)
            .map(Vec::as_slice)
    }

    /// Command keys registered under a category, for reduce-style fallback.
    pub fn category_commands(&self, category: &str) -> Vec<&str> {
        self.table
            .get(category)
            .map(|by_command| by_command.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
