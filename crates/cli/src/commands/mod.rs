pub mod generate;
pub mod operations;

use anyhow::{Context, Result};
use graphql_schema_model::loader::{load_schema_dir, load_schema_file};
use graphql_schema_model::SchemaModel;
use std::path::Path;

/// Loads a schema from either a source directory (introspection JSON
/// preferred over SDL) or a single schema file.
pub fn load_schema(path: &Path) -> Result<SchemaModel> {
    let model = if path.is_dir() {
        load_schema_dir(path)
    } else {
        load_schema_file(path)
    };
    model.with_context(|| format!("failed to load schema from {}", path.display()))
}
