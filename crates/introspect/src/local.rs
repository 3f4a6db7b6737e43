//! Loading a previously saved schema from disk.

use crate::{IntrospectionError, Result, SchemaDescriptor};
use std::path::Path;

/// Extensions that mark a schema file as SDL regardless of its contents.
const SDL_EXTENSIONS: &[&str] = &["graphql", "graphqls", "gql"];

/// Reads and normalizes a saved schema file.
///
/// Introspection JSON may hold the full response (`{"data": {"__schema": ...}}`)
/// or just the data object (`{"__schema": ...}`). A file with a `.graphql`,
/// `.graphqls` or `.gql` extension, or whose contents do not start with `{`,
/// is parsed as SDL instead.
///
/// # Errors
///
/// - [`IntrospectionError::NotFound`] when the file is absent or unreadable
/// - [`IntrospectionError::Protocol`] when it is neither introspection JSON
///   nor valid SDL
#[tracing::instrument]
pub async fn load_local_schema(path: &Path) -> Result<SchemaDescriptor> {
    let contents =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IntrospectionError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;

    let protocol = |e: IntrospectionError| match e {
        IntrospectionError::Protocol(message) => {
            IntrospectionError::Protocol(format!("{}: {message}", path.display()))
        }
        other => other,
    };

    let schema = if is_sdl(path, &contents) {
        tracing::debug!("Parsing schema file as SDL");
        SchemaDescriptor::from_sdl(&contents).map_err(protocol)?
    } else {
        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| IntrospectionError::Protocol(format!("{}: {e}", path.display())))?;
        SchemaDescriptor::from_json(value).map_err(protocol)?
    };

    tracing::info!(types = schema.len(), "Loaded local schema");
    Ok(schema)
}

fn is_sdl(path: &Path, contents: &str) -> bool {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SDL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    by_extension || !contents.trim_start().starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sdl() {
        assert!(is_sdl(Path::new("schema.graphql"), "{}"));
        assert!(is_sdl(Path::new("schema.GQL"), ""));
        assert!(is_sdl(Path::new("schema.txt"), "type Query { a: Int }"));
        assert!(!is_sdl(Path::new("schema.json"), "  {\"__schema\": {}}"));
        assert!(!is_sdl(Path::new("schema"), "{\"data\": null}"));
    }
}
