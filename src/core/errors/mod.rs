//! Error types for configuration loading and model construction.
//!
//! # Usage
//!
//! ```rust
//! use ams_wrapper::core::errors::AmsError;
//!
//! let error = AmsError::missing_key("labels.json", "outputs[0].classes");
//! assert!(error.is_missing_key());
//! ```

pub mod constructors;
pub mod types;

pub use types::{AmsError, SourceKind};

/// Convenient result alias for configuration and model loading operations.
pub type AmsResult<T> = Result<T, AmsError>;
