//! Error types for configuration and model loading.
//!
//! This module defines the error kinds that can surface while loading a model
//! input/output configuration or constructing a model from its metadata file.
//! Every kind maps to exactly one failure cause so callers can tell a missing
//! file apart from a malformed document or an invalid field.

use crate::core::config::errors::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Which file an error refers to.
///
/// The input/output configuration and the model metadata are distinct files,
/// and the same underlying failure (e.g. not found) is classified differently
/// depending on which one was being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The model input/output configuration file.
    InputConfig,
    /// A model's own metadata file (e.g. a label mapping).
    ModelMetadata,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::InputConfig => write!(f, "input config"),
            SourceKind::ModelMetadata => write!(f, "model metadata"),
        }
    }
}

/// Enum representing every error the configuration layer can return.
#[derive(Error, Debug)]
pub enum AmsError {
    /// The input config file does not exist or could not be read.
    #[error("non-existing or unreadable input config '{path}'")]
    ConfigLoad {
        /// Path that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input config file exists but is not valid JSON.
    #[error("input config '{path}' is not valid JSON")]
    ConfigParse {
        /// Path of the offending document.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The input config parsed but violates one or more field or structural rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A model metadata file does not exist.
    #[error("model metadata file not found: '{path}'")]
    MetadataNotFound {
        /// Path that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A model metadata file exists but could not be read.
    #[error("failed to read model metadata '{path}'")]
    MetadataRead {
        /// Path that was requested.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A model metadata file exists but is not valid JSON.
    #[error("model metadata '{path}' could not be decoded")]
    MetadataDecode {
        /// Path of the offending document.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Parsed model metadata lacks a key the model variant requires.
    #[error("model metadata '{path}' is missing required key '{key}'")]
    MissingKey {
        /// Path of the offending document.
        path: PathBuf,
        /// Location of the missing or malformed key, e.g. `outputs[0].classes`.
        key: String,
    },

    /// No model variant is registered under the requested name.
    #[error("unknown model type '{name}'")]
    UnknownModel {
        /// The requested registry name.
        name: String,
    },
}

impl AmsError {
    /// Returns true for "source missing or unreadable" failures.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            AmsError::ConfigLoad { .. }
                | AmsError::MetadataNotFound { .. }
                | AmsError::MetadataRead { .. }
        )
    }

    /// Returns true for "source exists but is not well-formed JSON" failures.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AmsError::ConfigParse { .. } | AmsError::MetadataDecode { .. }
        )
    }

    /// Returns true when the input config parsed but failed validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, AmsError::Validation(_))
    }

    /// Returns true when model metadata lacked a required key.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, AmsError::MissingKey { .. })
    }

    /// Returns the file kind this error refers to, if any.
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            AmsError::ConfigLoad { .. }
            | AmsError::ConfigParse { .. }
            | AmsError::Validation(_) => Some(SourceKind::InputConfig),
            AmsError::MetadataNotFound { .. }
            | AmsError::MetadataRead { .. }
            | AmsError::MetadataDecode { .. }
            | AmsError::MissingKey { .. } => Some(SourceKind::ModelMetadata),
            AmsError::UnknownModel { .. } => None,
        }
    }

    /// Returns the validation report if this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            AmsError::Validation(report) => Some(report),
            _ => None,
        }
    }
}
