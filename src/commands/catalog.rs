//! `apiwatch catalog` command.

use std::path::Path;

use crate::catalog::load_catalog;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::report::ReportError;

/// Print the catalog loaded from `postman_dir` as a JSON array.
///
/// # Errors
///
/// Returns an error if the catalog cannot be serialized.
pub fn run(ctx: &ServiceContext, postman_dir: &Path) -> Result<(), Error> {
    let catalog = load_catalog(ctx.fs.as_ref(), postman_dir);
    let json = serde_json::to_string_pretty(&catalog)
        .map_err(|source| ReportError::Serialize { name: "catalog", source })?;
    println!("{json}");
    Ok(())
}
