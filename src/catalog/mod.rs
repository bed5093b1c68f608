//! API catalog: the per-API definition records under `.postman/`.
//!
//! Each `api_*` file declares one API: its identifier, the repository files
//! that make up its definition, and which of those are root (entry-point)
//! files. The aggregate `api` manifest in the same directory is ignored.

pub mod decode;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::ports::filesystem::FileSystem;

pub use decode::{decode, DecodeError};

/// Default directory holding the definition files.
pub const DEFAULT_POSTMAN_DIR: &str = ".postman";

/// Filename prefix marking an individual API definition file.
pub const DEFINITION_PREFIX: &str = "api_";

/// One declared API specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
    /// Postman API identifier.
    pub api_id: String,
    /// Repository paths belonging to this API, in declaration order.
    pub declared_paths: Vec<String>,
    /// Entry-point files, usually a subset of `declared_paths`.
    pub root_paths: Vec<String>,
    /// Definition file this record was read from.
    pub source: PathBuf,
}

/// A raw entry from a record's `files` list.
///
/// Postman writes these either as JSON text (`{"path": "...", "metaData": {}}`)
/// or as plain paths; a decoder may also hand us an already-structured map.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEntry {
    /// A string, possibly JSON-encoded.
    Text(String),
    /// A structured map that may carry a `path` field.
    Object(serde_json::Map<String, Value>),
    /// Anything else the decoder produced.
    Other(Value),
}

impl From<&Value> for FileEntry {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(map) => Self::Object(map.clone()),
            other => Self::Other(other.clone()),
        }
    }
}

impl FileEntry {
    /// Normalize the entry to a single path, if it names one.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        let path = match self {
            Self::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => path_field(&map),
                _ => Some(text.clone()),
            },
            Self::Object(map) => path_field(map),
            Self::Other(_) => None,
        };
        path.filter(|p| !p.is_empty())
    }
}

fn path_field(map: &serde_json::Map<String, Value>) -> Option<String> {
    map.get("path").and_then(Value::as_str).map(str::to_string)
}

/// Reasons a definition file is left out of the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying filesystem error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The INI text did not decode.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// File that failed.
        path: PathBuf,
        /// Decoder error.
        source: DecodeError,
    },

    /// The decoded structure has the wrong shape.
    #[error("unexpected structure in {path}: {reason}")]
    Shape {
        /// File that failed.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },
}

/// Build an [`ApiRecord`] from one decoded definition file.
///
/// Returns `Ok(None)` when `config.id` or `config.relations.apiDefinition`
/// is missing; such files are simply not part of the catalog.
///
/// # Errors
///
/// Returns [`CatalogError::Shape`] when `files` is present but not a list.
pub fn parse_record(tree: &Value, source: &Path) -> Result<Option<ApiRecord>, CatalogError> {
    let api_id = tree.pointer("/config/id").and_then(Value::as_str).filter(|id| !id.is_empty());
    let definition = tree.pointer("/config/relations/apiDefinition").filter(|d| d.is_object());

    let (Some(api_id), Some(definition)) = (api_id, definition) else {
        return Ok(None);
    };

    let declared_paths = match definition.get("files") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => {
            entries.iter().filter_map(|e| FileEntry::from(e).path()).collect()
        }
        Some(other) => {
            return Err(CatalogError::Shape {
                path: source.to_path_buf(),
                reason: format!("`files` must be a list, found {}", kind(other)),
            });
        }
    };

    let root_paths = definition
        .pointer("/metaData/rootFiles")
        .and_then(Value::as_array)
        .map(|roots| roots.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(Some(ApiRecord {
        api_id: api_id.to_string(),
        declared_paths,
        root_paths,
        source: source.to_path_buf(),
    }))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

/// Read and parse a single definition file.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the file cannot be read, decoded, or has
/// the wrong shape.
pub fn load_record(fs: &dyn FileSystem, path: &Path) -> Result<Option<ApiRecord>, CatalogError> {
    let text = fs
        .read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
    let tree =
        decode(&text).map_err(|source| CatalogError::Decode { path: path.to_path_buf(), source })?;
    parse_record(&tree, path)
}

/// List the definition files in `dir`: regular files named `api_*`, by name.
///
/// A missing directory yields an empty list.
#[must_use]
pub fn definition_files(fs: &dyn FileSystem, dir: &Path) -> Vec<PathBuf> {
    if !fs.exists(dir) {
        info!(dir = %dir.display(), "no API definition directory found");
        return Vec::new();
    }

    let names = match fs.list_dir(dir) {
        Ok(names) => names,
        Err(e) => {
            error!(dir = %dir.display(), "failed to list API definition directory: {e}");
            return Vec::new();
        }
    };

    names
        .into_iter()
        .filter(|name| name.starts_with(DEFINITION_PREFIX))
        .map(|name| dir.join(name))
        .filter(|path| fs.is_file(path))
        .collect()
}

/// Load every valid API record from `dir`, in filename order.
///
/// Unreadable or malformed files are logged and skipped; they never fail
/// the whole load.
#[must_use]
pub fn load_catalog(fs: &dyn FileSystem, dir: &Path) -> Vec<ApiRecord> {
    let mut records = Vec::new();
    for path in definition_files(fs, dir) {
        match load_record(fs, &path) {
            Ok(Some(record)) => {
                debug!(
                    api_id = %record.api_id,
                    files = record.declared_paths.len(),
                    "loaded API definition"
                );
                records.push(record);
            }
            Ok(None) => info!(path = %path.display(), "skipping: missing required sections"),
            Err(e) => error!("{e}"),
        }
    }
    records
}
