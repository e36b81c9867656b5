use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::lowering::LoweringError;

/// Selection deduplication settings for a lowering pass.
///
/// - `deduplicate_selection_items` turns on flat deduplication for the
///   top-level query block. When off, entity attributes are still
///   deduplicated per fetch root.
/// - `deduplicate_subquery_selections` does the same for nested query blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoweringConfig {
    pub deduplicate_selection_items: bool,
    pub deduplicate_subquery_selections: bool,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self { deduplicate_selection_items: true, deduplicate_subquery_selections: true }
    }
}

impl LoweringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flat() -> Self {
        Self::default()
    }

    /// Flat deduplication off everywhere; only fetch roots collapse repeats.
    pub fn fetch_scoped() -> Self {
        Self { deduplicate_selection_items: false, deduplicate_subquery_selections: false }
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoweringError> {
        serde_json::from_str(text).map_err(|e| LoweringError::Config(e.to_string()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoweringError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| LoweringError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&content)
    }
}
