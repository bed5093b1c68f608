//! Filesystem port: the definition directory, the mapping CSV and the CI
//! output file.

use std::path::Path;

/// Read access to repository files plus append-only access to the CI
/// output file. Nothing in a run rewrites or deletes files.
pub trait FileSystem: Send + Sync {
    /// Read a definition or mapping file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Append to the file, creating it first if absent. Actions may already
    /// have written other steps' outputs there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file (directories named `api_*` are not
    /// definitions).
    fn is_file(&self, path: &Path) -> bool;

    /// Entry names directly under `path`, sorted so catalog order is stable.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be listed.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
