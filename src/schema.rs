//! Introspection schema types and loader.
//!
//! The input is a saved response to the standard `__schema` introspection
//! query: `{"data": {"__schema": {"types": [...]}}}`. Only the parts needed to
//! build queries are decoded; everything else in the document is ignored.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a schema file.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse introspection JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One introspected GraphQL type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Type {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// `null` for scalars, enums, unions and input objects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
}

/// A field declared on a [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<Arg>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub ty: FieldType,
}

/// An argument accepted by a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Arg {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub ty: FieldType,
}

/// A type reference, possibly wrapped in `LIST` / `NON_NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldType {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Wrapper kinds carry a `null` name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "ofType", default)]
    pub of_type: Option<Box<FieldType>>,
}

#[derive(Deserialize)]
struct IntrospectionResponse {
    data: IntrospectionData,
}

#[derive(Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: SchemaDocument,
}

#[derive(Deserialize)]
struct SchemaDocument {
    types: Vec<Type>,
}

/// Decode `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse introspection JSON held in memory.
pub fn parse_schema(json: &str) -> Result<Vec<Type>, serde_json::Error> {
    let response: IntrospectionResponse = serde_json::from_str(json)?;
    Ok(response.data.schema.types)
}

/// Read and parse an introspection dump from disk.
pub fn load_schema(path: &Path) -> Result<Vec<Type>, SchemaError> {
    let json = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let types = parse_schema(&json).map_err(|source| SchemaError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} types from {}", types.len(), path.display());
    Ok(types)
}
