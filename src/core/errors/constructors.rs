//! Error constructor utilities.
//!
//! Helpers for building `AmsError` values with their path context attached,
//! so call sites can stay on a single `map_err` line.
//!
//! IO failures on model metadata are split by kind here: a missing file becomes
//! [`AmsError::MetadataNotFound`], anything else [`AmsError::MetadataRead`].
//!
//! ```rust
//! use ams_wrapper::core::AmsError;
//! use std::io;
//!
//! let error = AmsError::metadata_io(
//!     "missing.json",
//!     io::Error::new(io::ErrorKind::NotFound, "no such file"),
//! );
//! assert!(matches!(error, AmsError::MetadataNotFound { .. }));
//! ```

use super::types::AmsError;
use std::path::Path;

impl AmsError {
    /// Creates an error for an input config that could not be read.
    pub fn config_load(path: impl AsRef<Path>, error: std::io::Error) -> Self {
        Self::ConfigLoad {
            path: path.as_ref().to_path_buf(),
            source: error,
        }
    }

    /// Creates an error for an input config that is not valid JSON.
    pub fn config_parse(path: impl AsRef<Path>, error: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.as_ref().to_path_buf(),
            source: error,
        }
    }

    /// Classifies an IO failure on a model metadata file.
    ///
    /// # Arguments
    ///
    /// * `path` - The metadata file that was being read.
    /// * `error` - The IO error returned by the read.
    ///
    /// # Returns
    ///
    /// `MetadataNotFound` when the file does not exist, `MetadataRead` otherwise.
    pub fn metadata_io(path: impl AsRef<Path>, error: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::MetadataNotFound {
                path,
                source: error,
            }
        } else {
            Self::MetadataRead {
                path,
                source: error,
            }
        }
    }

    /// Creates an error for model metadata that is not valid JSON.
    pub fn metadata_decode(path: impl AsRef<Path>, error: serde_json::Error) -> Self {
        Self::MetadataDecode {
            path: path.as_ref().to_path_buf(),
            source: error,
        }
    }

    /// Creates an error for model metadata lacking a required key.
    ///
    /// # Arguments
    ///
    /// * `path` - The metadata file.
    /// * `key` - Location of the missing key, e.g. `outputs[0].classes`.
    pub fn missing_key(path: impl AsRef<Path>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            path: path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Creates an error for a model type name with no registered variant.
    pub fn unknown_model(name: impl Into<String>) -> Self {
        Self::UnknownModel { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SourceKind;
    use std::io;

    #[test]
    fn test_metadata_io_classifies_not_found() {
        let error = AmsError::metadata_io(
            "/missing/labels.json",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(error, AmsError::MetadataNotFound { .. }));
        assert!(error.is_load_error());
        assert_eq!(error.source_kind(), Some(SourceKind::ModelMetadata));
    }

    #[test]
    fn test_metadata_io_other_kinds_are_read_errors() {
        let error = AmsError::metadata_io(
            "/locked/labels.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(error, AmsError::MetadataRead { .. }));
        assert!(error.is_load_error());
    }

    #[test]
    fn test_config_load_is_not_validation() {
        let error = AmsError::config_load(
            "/not-existing-path",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(error.is_load_error());
        assert!(!error.is_validation_error());
        assert_eq!(error.source_kind(), Some(SourceKind::InputConfig));
        assert!(error.to_string().contains("/not-existing-path"));
    }

    #[test]
    fn test_missing_key_message() {
        let error = AmsError::missing_key("labels.json", "outputs[0].classes");
        assert!(error.is_missing_key());
        assert_eq!(
            error.to_string(),
            "model metadata 'labels.json' is missing required key 'outputs[0].classes'"
        );
    }

    #[test]
    fn test_unknown_model_has_no_source_kind() {
        let error = AmsError::unknown_model("face_detection");
        assert_eq!(error.source_kind(), None);
        assert!(error.to_string().contains("face_detection"));
    }
}
