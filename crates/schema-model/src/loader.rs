//! File-based schema loading.
//!
//! A source folder is expected to contain either `schema.introspection.json`
//! or `schema.graphql`. JSON is preferred when both exist: it carries
//! everything needed and sidesteps unknown-directive problems in vendor SDL.

use crate::error::{Result, SchemaError};
use crate::introspection::parse_introspection;
use crate::model::SchemaModel;
use crate::sdl::parse_sdl;
use std::fs;
use std::path::Path;

/// File name of the SDL schema source inside a source folder.
pub const SDL_FILE: &str = "schema.graphql";

/// File name of the introspection schema source inside a source folder.
pub const INTROSPECTION_FILE: &str = "schema.introspection.json";

/// Loads a schema from a source folder, preferring introspection JSON.
#[tracing::instrument(fields(dir = %dir.display()))]
pub fn load_schema_dir(dir: &Path) -> Result<SchemaModel> {
    let sdl_path = dir.join(SDL_FILE);
    let json_path = dir.join(INTROSPECTION_FILE);

    if json_path.is_file() {
        tracing::debug!("loading schema from introspection JSON");
        return parse_introspection(&read(&json_path)?);
    }
    if sdl_path.is_file() {
        tracing::debug!("loading schema from SDL");
        return parse_sdl(&read(&sdl_path)?);
    }

    Err(SchemaError::MissingSource {
        sdl: sdl_path,
        introspection: json_path,
    })
}

/// Loads a schema from a single file, dispatching on the extension
/// (`.json` is treated as introspection output, anything else as SDL).
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_schema_file(path: &Path) -> Result<SchemaModel> {
    let contents = read(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        parse_introspection(&contents)
    } else {
        parse_sdl(&contents)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSource { .. }));
    }

    #[test]
    fn loads_sdl_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SDL_FILE), "type Query { ping: String }").unwrap();
        let model = load_schema_dir(dir.path()).unwrap();
        assert!(model.query_root().is_some());
    }

    #[test]
    fn prefers_introspection_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SDL_FILE), "type Query { fromSdl: String }").unwrap();
        fs::write(
            dir.path().join(INTROSPECTION_FILE),
            r#"{ "__schema": { "queryType": null, "mutationType": null, "subscriptionType": null, "types": [] } }"#,
        )
        .unwrap();
        let model = load_schema_dir(dir.path()).unwrap();
        assert!(model.is_empty(), "JSON source should win over SDL");
    }
}
