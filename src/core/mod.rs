//! The core module of the configuration layer.
//!
//! This module contains:
//! - Configuration types, field validators and the config loader
//! - Error handling
//! - The model registry entry point
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod config;
pub mod errors;
pub mod registry;

pub use config::{
    FieldError, FieldErrorKind, ModelInputConfig, ValidationError, load_input_configs,
};
pub use errors::{AmsError, AmsResult, SourceKind};
pub use registry::{ModelKind, load_model};
