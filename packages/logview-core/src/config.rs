//! Cache and line-format configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LogViewError;

/// Number of items materialized by a single page fetch.
pub const PAGE_SIZE: usize = 100;

/// Maximum number of pages resident in a page cache.
pub const MAX_CACHE_SIZE: usize = 10;

/// Page cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Items per page (>= 1)
    pub page_size: usize,
    /// Resident page limit (>= 1)
    pub max_cache_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_cache_size: MAX_CACHE_SIZE,
        }
    }
}

impl CacheConfig {
    /// Upper bound on resident items regardless of the source length.
    pub fn max_resident_items(&self) -> usize {
        self.page_size * self.max_cache_size
    }

    /// Validates that both bounds are non-zero.
    pub fn validate(&self) -> Result<(), LogViewError> {
        if self.page_size == 0 {
            return Err(LogViewError::Config("page_size must be > 0".to_string()));
        }
        if self.max_cache_size == 0 {
            return Err(LogViewError::Config(
                "max_cache_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Schema of a log line format.
///
/// The number of fields is the component count shared by every record
/// encoded for this format. It is never inferred from a record buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFormat {
    /// Human-readable format name
    pub name: String,
    /// Ordered field (component) names
    pub fields: Vec<String>,
    /// Field separator used by delimiter-based parsers
    #[serde(default)]
    pub delimiter: Option<char>,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            name: "plain".to_string(),
            fields: vec!["message".to_string()],
            delimiter: None,
        }
    }
}

impl LineFormat {
    /// Number of components per line.
    pub fn component_count(&self) -> usize {
        self.fields.len()
    }

    /// Position of a named field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Parses and validates a format from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LogViewError> {
        let format: LineFormat =
            serde_json::from_str(json).map_err(|e| LogViewError::Config(e.to_string()))?;
        format.validate()?;
        Ok(format)
    }

    /// Reads a format description from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LogViewError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects empty field lists and duplicate field names.
    pub fn validate(&self) -> Result<(), LogViewError> {
        if self.fields.is_empty() {
            return Err(LogViewError::Config(format!(
                "format '{}' declares no fields",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.as_str()) {
                return Err(LogViewError::Config(format!(
                    "format '{}' declares field '{}' twice",
                    self.name, field
                )));
            }
        }
        Ok(())
    }
}
