//! Git repository port for version-control queries.

/// Provides read access to a git repository.
///
/// Abstracting git access allows deterministic replay and testing
/// without requiring a real repository.
pub trait GitRepo: Send + Sync {
    /// Lists the paths that differ between `base` and `HEAD`, or between
    /// `HEAD` and the working tree when `base` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed (unknown ref,
    /// shallow clone without history, not a repository).
    fn changed_paths(
        &self,
        base: Option<&str>,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
