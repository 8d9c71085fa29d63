//! Validation failure types for model input/output configs.
//!
//! A single [`FieldError`] describes one rejected attribute. The config loader
//! collects every `FieldError` it finds across all inputs and outputs and
//! reports them together as one [`ValidationError`].

use serde_json::Value;
use thiserror::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// A required field is absent.
    Missing,
    /// The value has the wrong JSON type.
    WrongType {
        /// Human readable description of what was expected.
        expected: &'static str,
    },
    /// A numeric value is zero or negative.
    NotPositive,
    /// A string value is not one of the allowed members.
    NotAllowed {
        /// The allowed members.
        allowed: &'static [&'static str],
    },
    /// Only one of a field pair is present.
    Unpaired {
        /// The field that must accompany this one.
        counterpart: &'static str,
    },
    /// A name is the empty string.
    Empty,
    /// A name is used by more than one entry.
    Duplicate,
    /// A `classes` key is not a number.
    InvalidClassKey {
        /// The offending key.
        key: String,
    },
    /// A `classes` value is not a string.
    InvalidClassLabel {
        /// Key of the offending entry.
        key: String,
    },
    /// A `classes` key names the same index as an earlier key, e.g. `"1"` and `"1.0"`.
    DuplicateClassKey {
        /// The repeated key.
        key: String,
    },
}

impl std::fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "required field is missing"),
            FieldErrorKind::WrongType { expected } => write!(f, "expected {}", expected),
            FieldErrorKind::NotPositive => write!(f, "must be greater than 0"),
            FieldErrorKind::NotAllowed { allowed } => {
                write!(f, "must be one of {}", allowed.join(", "))
            }
            FieldErrorKind::Unpaired { counterpart } => {
                write!(f, "must be set together with '{}'", counterpart)
            }
            FieldErrorKind::Empty => write!(f, "must not be empty"),
            FieldErrorKind::Duplicate => write!(f, "name is already used by another entry"),
            FieldErrorKind::InvalidClassKey { key } => {
                write!(f, "class key '{}' is not a number", key)
            }
            FieldErrorKind::InvalidClassLabel { key } => {
                write!(f, "label for class '{}' is not a string", key)
            }
            FieldErrorKind::DuplicateClassKey { key } => {
                write!(f, "class key '{}' repeats an earlier class index", key)
            }
        }
    }
}

/// One rejected attribute of an input config document.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {kind}{}", self.path(), self.describe_value())]
pub struct FieldError {
    /// Where the field lives, e.g. `inputs[0]`. Empty for top-level fields.
    pub location: String,
    /// The attribute name, e.g. `target_width`.
    pub field: String,
    /// The raw value that was rejected, `None` when the field is absent.
    pub value: Option<Value>,
    /// The failure classification.
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Creates a failure for a field that was present with a bad value.
    pub fn invalid(field: impl Into<String>, value: &Value, kind: FieldErrorKind) -> Self {
        Self {
            location: String::new(),
            field: field.into(),
            value: Some(value.clone()),
            kind,
        }
    }

    /// Creates a failure for a required field that is absent.
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            location: String::new(),
            field: field.into(),
            value: None,
            kind: FieldErrorKind::Missing,
        }
    }

    /// Creates a failure for a field whose counterpart is absent.
    pub fn unpaired(field: impl Into<String>, value: &Value, counterpart: &'static str) -> Self {
        Self::invalid(field, value, FieldErrorKind::Unpaired { counterpart })
    }

    /// Attaches the entry location this field belongs to.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Returns the dotted path of the field, e.g. `inputs[0].channels`.
    pub fn path(&self) -> String {
        if self.location.is_empty() {
            self.field.clone()
        } else {
            format!("{}.{}", self.location, self.field)
        }
    }

    fn describe_value(&self) -> String {
        match &self.value {
            Some(value) => format!(" (got {})", value),
            None => String::new(),
        }
    }
}

/// Aggregated validation failure carrying every rejected field.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid input config: {}", self.summary())]
pub struct ValidationError {
    failures: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error from a non-empty set of field failures.
    pub(crate) fn new(failures: Vec<FieldError>) -> Self {
        debug_assert!(!failures.is_empty());
        Self { failures }
    }

    /// Returns every field failure, in document order.
    pub fn failures(&self) -> &[FieldError] {
        &self.failures
    }

    /// Returns the number of field failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if any failure concerns the named field.
    pub fn has_field(&self, field: &str) -> bool {
        self.failures.iter().any(|failure| failure.field == field)
    }

    /// Returns the failures recorded for the named field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.failures
            .iter()
            .filter(move |failure| failure.field == field)
    }

    fn summary(&self) -> String {
        let details = self
            .failures
            .iter()
            .map(|failure| failure.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        format!("{} problem(s): {}", self.failures.len(), details)
    }
}

impl IntoIterator for ValidationError {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_error_path() {
        let error = FieldError::missing("input_name").at("inputs[2]");
        assert_eq!(error.path(), "inputs[2].input_name");

        let root = FieldError::missing("model_name");
        assert_eq!(root.path(), "model_name");
    }

    #[test]
    fn test_field_error_display() {
        let error = FieldError::invalid("scale", &json!(0), FieldErrorKind::NotPositive)
            .at("inputs[0]");
        assert_eq!(
            error.to_string(),
            "inputs[0].scale: must be greater than 0 (got 0)"
        );

        let error = FieldError::unpaired("target_height", &json!(256), "target_width");
        assert_eq!(
            error.to_string(),
            "target_height: must be set together with 'target_width' (got 256)"
        );
    }

    #[test]
    fn test_validation_error_reports_every_failure() {
        let report = ValidationError::new(vec![
            FieldError::missing("input_name").at("inputs[0]"),
            FieldError::invalid(
                "color_format",
                &json!("RGR"),
                FieldErrorKind::NotAllowed {
                    allowed: &["RGB", "BGR"],
                },
            )
            .at("inputs[0]"),
        ]);

        assert_eq!(report.len(), 2);
        assert!(report.has_field("input_name"));
        assert!(report.has_field("color_format"));
        assert!(!report.has_field("scale"));

        let message = report.to_string();
        assert!(message.starts_with("invalid input config: 2 problem(s)"));
        assert!(message.contains("inputs[0].input_name: required field is missing"));
        assert!(message.contains("must be one of RGB, BGR (got \"RGR\")"));
    }

    #[test]
    fn test_validation_error_field_lookup() {
        let report = ValidationError::new(vec![
            FieldError::missing("input_name").at("inputs[0]"),
            FieldError::invalid("scale", &json!(-1), FieldErrorKind::NotPositive).at("inputs[0]"),
            FieldError::missing("input_name").at("inputs[1]"),
        ]);

        let locations: Vec<&str> = report
            .for_field("input_name")
            .map(|failure| failure.location.as_str())
            .collect();
        assert_eq!(locations, vec!["inputs[0]", "inputs[1]"]);
        assert_eq!(report.for_field("channels").count(), 0);

        let fields: Vec<String> = report.into_iter().map(|failure| failure.field).collect();
        assert_eq!(fields, vec!["input_name", "scale", "input_name"]);
    }
}
