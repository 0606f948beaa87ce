//! # Policy and schema decoding
//!
//! Reads policies and schemas from JSON or YAML sources. The format is
//! sniffed from the content: a document whose first non-whitespace byte is
//! `{` is parsed as JSON, anything else as YAML.
//!
//! YAML sources must contain a single document. A leading `---` separator is
//! accepted but a second document is rejected rather than silently dropped.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use verdict_proto::policy::v1::Policy;
use verdict_proto::schema::v1::Schema;

/// Maximum size of a single policy or schema source.
pub const MAX_SOURCE_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read from source: {0}")]
    Read(#[source] io::Error),
    #[error("Source exceeds the 4MiB size limit")]
    SourceTooLarge,
    #[error("More than one YAML document detected")]
    MultipleDocuments,
    #[error("Failed to convert YAML to JSON: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[source] serde_json::Error),
}

/// Reads a policy from a JSON or YAML source.
pub fn read_policy<R: Read>(source: R) -> Result<Policy, DecodeError> {
    read_json_or_yaml(source)
}

/// Reads a policy from the file at `path`.
pub fn read_policy_from_file(path: impl AsRef<Path>) -> Result<Policy, DecodeError> {
    read_policy(open(path.as_ref())?)
}

/// Reads a schema from a source.
///
/// Schema definitions are kept verbatim; the server interprets them. The
/// given id identifies the schema in the store.
pub fn read_schema<R: Read>(source: R, id: impl Into<String>) -> Result<Schema, DecodeError> {
    let definition = read_capped(source)?;
    Ok(Schema {
        id: id.into(),
        definition,
    })
}

/// Reads a schema from the file at `path`, using the path as the schema id.
pub fn read_schema_from_file(path: impl AsRef<Path>) -> Result<Schema, DecodeError> {
    let path = path.as_ref();
    read_schema(open(path)?, path.display().to_string())
}

/// Deserializes a JSON or YAML source into `T`.
pub fn read_json_or_yaml<T, R>(source: R) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
    R: Read,
{
    let data = read_capped(source)?;
    if looks_like_json(&data) {
        serde_json::from_slice(&data).map_err(DecodeError::Json)
    } else {
        decode_yaml(&data)
    }
}

fn open(path: &Path) -> Result<File, DecodeError> {
    File::open(path).map_err(|source| DecodeError::Open {
        path: path.display().to_string(),
        source,
    })
}

fn read_capped<R: Read>(source: R) -> Result<Vec<u8>, DecodeError> {
    let mut data = Vec::new();
    source
        .take(MAX_SOURCE_SIZE as u64 + 1)
        .read_to_end(&mut data)
        .map_err(DecodeError::Read)?;

    if data.len() > MAX_SOURCE_SIZE {
        return Err(DecodeError::SourceTooLarge);
    }

    Ok(data)
}

fn looks_like_json(data: &[u8]) -> bool {
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{')
}

// Scans the document line by line before handing it to the YAML parser:
// comments are dropped, leading blank lines are dropped and a second
// document separator is an error.
fn decode_yaml<T: DeserializeOwned>(data: &[u8]) -> Result<T, DecodeError> {
    let mut document = Vec::with_capacity(data.len());
    let mut separators = 0u32;
    let mut seen_content = false;

    for line in data.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let trimmed = line.trim_ascii();

        if trimmed.first() == Some(&b'#') {
            continue;
        }

        if !seen_content && trimmed.is_empty() {
            continue;
        }
        seen_content = true;

        if line.starts_with(b"---") {
            separators += 1;
            if separators > 1 || !document.is_empty() {
                return Err(DecodeError::MultipleDocuments);
            }
        }

        document.extend_from_slice(line);
        document.push(b'\n');
    }

    let value: serde_json::Value = serde_yaml::from_slice(&document).map_err(DecodeError::Yaml)?;
    serde_json::from_value(value).map_err(DecodeError::Json)
}
