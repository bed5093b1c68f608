//! API id to integration id lookup, loaded from a two-column CSV.
//!
//! The first line of the source is always discarded as a header. A
//! headerless file therefore loses its first mapping; this matches how the
//! existing CI workflows write the file (`api-id,integration-id` first).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::ports::filesystem::FileSystem;

/// Default location of the mapping source, relative to the working directory.
pub const DEFAULT_MAPPING_PATH: &str = "integration-ids.csv";

/// Maps API ids to the integration ids passed to the lint tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationMapping {
    entries: BTreeMap<String, String>,
}

impl IntegrationMapping {
    /// Parse CSV text. Rows must have exactly two non-empty columns; other
    /// rows are skipped. Later rows overwrite earlier ones for the same id.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();

        for (index, line) in text.trim().lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let columns: Vec<&str> = line.split(',').map(str::trim).collect();
            match columns.as_slice() {
                [api_id, integration_id] if !api_id.is_empty() && !integration_id.is_empty() => {
                    entries.insert((*api_id).to_string(), (*integration_id).to_string());
                }
                _ => debug!(line = index + 1, "ignoring malformed mapping row"),
            }
        }

        Self { entries }
    }

    /// Load the mapping from `path`.
    ///
    /// A missing or unreadable source yields an empty mapping.
    #[must_use]
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Self {
        if !fs.exists(path) {
            info!(path = %path.display(), "integration id mapping not found");
            return Self::default();
        }

        match fs.read_to_string(path) {
            Ok(text) => {
                let mapping = Self::parse(&text);
                info!(count = mapping.len(), "loaded integration id mappings");
                mapping
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to read integration id mapping: {e}");
                Self::default()
            }
        }
    }

    /// Integration id for `api_id`, if one is mapped.
    #[must_use]
    pub fn get(&self, api_id: &str) -> Option<&str> {
        self.entries.get(api_id).map(String::as_str)
    }

    /// Number of mapped ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IntegrationMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
