//! Model input/output configuration.
//!
//! This module provides the validated configuration types, the per-field
//! validators, and the loader that assembles a config from a JSON file.

pub mod errors;
pub mod loader;
pub mod model_input;
pub mod validators;

// Re-export commonly used types
pub use errors::{FieldError, FieldErrorKind, ValidationError};
pub use loader::load_input_configs;
pub use model_input::{
    ClassIndex, ClassMap, ColorFormat, InputFormat, InputSpec, ModelInputConfig, OutputSpec,
    TargetSize,
};
