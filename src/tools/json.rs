//! JSON file loading

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// JSON object with string keys
pub type JsonObject = Map<String, JsonValue>;

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    tracing::debug!(path = %absolute.display(), "reading JSON file");
    Ok(std::fs::read(absolute)?)
}

/// Read a JSON file whose top level is an object
pub fn load_json_file_to_map(path: impl AsRef<Path>) -> Result<JsonObject> {
    let bytes = read_file(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read a JSON file and descend through nested objects along `keys`
///
/// An empty key path returns the whole top-level object.
pub fn load_json_file_and_extract_sub_map<S: AsRef<str>>(
    path: impl AsRef<Path>,
    keys: &[S],
) -> Result<JsonObject> {
    let mut current = load_json_file_to_map(path)?;

    for key in keys {
        let key = key.as_ref();
        match current.remove(key) {
            Some(JsonValue::Object(inner)) => current = inner,
            Some(_) => {
                return Err(Error::NotAnObject {
                    key: key.to_string(),
                })
            }
            None => {
                return Err(Error::KeyNotFound {
                    key: key.to_string(),
                })
            }
        }
    }

    Ok(current)
}

/// Read a JSON file into any deserializable type
pub fn load_json_file_to_struct<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let bytes = read_file(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}
