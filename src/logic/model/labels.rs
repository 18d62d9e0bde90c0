//! Label Table
//!
//! Maps numeric class indices produced by the model to readable names.
//! The file format is one label per line, line N naming class N.

use std::path::Path;

use super::types::ModelError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Read `labels.txt`
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let labels = content
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();

        Ok(Self { labels })
    }

    /// Resolve a raw model label.
    ///
    /// An in-range index maps to its table entry. Text labels, negative
    /// numbers and out-of-range indices come back unchanged.
    pub fn resolve(&self, raw: &str) -> String {
        raw.trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| self.labels.get(index))
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<String>> for LabelTable {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}
