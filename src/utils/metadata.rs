//! Model metadata file helpers.
//!
//! Reading and navigating the auxiliary JSON files that concrete models load
//! at construction time (label maps and similar).

use crate::core::{AmsError, AmsResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Reads and parses a model metadata file.
///
/// # Arguments
///
/// * `path` - Path to the metadata JSON file
///
/// # Errors
///
/// * `AmsError::MetadataNotFound` if the file does not exist
/// * `AmsError::MetadataRead` if it exists but cannot be read
/// * `AmsError::MetadataDecode` if the content is not valid JSON
///
/// # Example
///
/// ```rust,no_run
/// use ams_wrapper::utils::read_metadata_json;
/// use std::path::Path;
///
/// let metadata = read_metadata_json(Path::new("ams_models/vehicle_detection_adas_model.json"))?;
/// assert!(metadata.get("outputs").is_some());
/// # Ok::<(), ams_wrapper::core::AmsError>(())
/// ```
pub fn read_metadata_json(path: &Path) -> AmsResult<Value> {
    debug!("Reading model metadata from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| AmsError::metadata_io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AmsError::metadata_decode(path, e))
}

/// Resolves a JSON pointer inside a metadata document.
///
/// `key` is the human readable name of the location, used in the error when
/// the pointer does not resolve (e.g. `outputs[0].classes` for
/// `/outputs/0/classes`).
///
/// # Errors
///
/// Returns an `AmsError::MissingKey` if nothing exists at `pointer`.
pub fn require_key<'a>(
    document: &'a Value,
    pointer: &str,
    key: &str,
    path: &Path,
) -> AmsResult<&'a Value> {
    document
        .pointer(pointer)
        .filter(|value| !value.is_null())
        .ok_or_else(|| AmsError::missing_key(path, key))
}
