//! Per-field validators for model input/output configs.
//!
//! Each validator is a pure function from the raw JSON value of one attribute
//! to either its typed value or a [`FieldError`] naming the attribute and the
//! offending value. Absent attributes never reach a validator; the loader
//! skips them.

use super::errors::{FieldError, FieldErrorKind};
use super::model_input::{ClassIndex, ClassMap, ColorFormat, InputFormat, TargetSize};
use serde_json::Value;

/// Top-level model name.
pub const MODEL_NAME: &str = "model_name";
/// Top-level list of input entries.
pub const INPUTS: &str = "inputs";
/// Top-level list of output entries.
pub const OUTPUTS: &str = "outputs";

pub const INPUT_NAME: &str = "input_name";
pub const CHANNELS: &str = "channels";
pub const TARGET_HEIGHT: &str = "target_height";
pub const TARGET_WIDTH: &str = "target_width";
pub const INPUT_FORMAT: &str = "input_format";
pub const SCALE: &str = "scale";
pub const STANDARDIZATION: &str = "standardization";
pub const COLOR_FORMAT: &str = "color_format";

pub const OUTPUT_NAME: &str = "output_name";
pub const CLASSES: &str = "classes";

/// Every attribute an input entry may declare.
pub const INPUT_FIELDS: &[&str] = &[
    INPUT_NAME,
    CHANNELS,
    TARGET_HEIGHT,
    TARGET_WIDTH,
    INPUT_FORMAT,
    SCALE,
    STANDARDIZATION,
    COLOR_FORMAT,
];

/// Every attribute an output entry may declare.
pub const OUTPUT_FIELDS: &[&str] = &[OUTPUT_NAME, CLASSES];

/// Validates a required name (`model_name`, `input_name`, `output_name`).
pub fn validate_name(field: &'static str, value: &Value) -> Result<String, FieldError> {
    match value.as_str() {
        Some("") => Err(FieldError::invalid(field, value, FieldErrorKind::Empty)),
        Some(name) => Ok(name.to_string()),
        None => Err(FieldError::invalid(
            field,
            value,
            FieldErrorKind::WrongType {
                expected: "a string",
            },
        )),
    }
}

/// Validates `channels`: an integer >= 1.
pub fn validate_channels(value: &Value) -> Result<u32, FieldError> {
    positive_integer(CHANNELS, value)
}

/// Validates one of `target_height` / `target_width` on its own.
pub fn validate_dimension(field: &'static str, value: &Value) -> Result<u32, FieldError> {
    positive_integer(field, value)
}

/// Validates the `target_height` / `target_width` pair.
///
/// Each present value is type-checked first; the pairing rule is only applied
/// once every present value is a well-formed integer, so a bad value is never
/// additionally reported as unpaired.
///
/// # Returns
///
/// * `Ok(None)` when both are absent
/// * `Ok(Some(size))` when both are present and valid
/// * `Err(failures)` otherwise, with one entry per problem
pub fn validate_target_size(
    height: Option<&Value>,
    width: Option<&Value>,
) -> Result<Option<TargetSize>, Vec<FieldError>> {
    let checked_height = height.map(|value| validate_dimension(TARGET_HEIGHT, value));
    let checked_width = width.map(|value| validate_dimension(TARGET_WIDTH, value));

    match (checked_height, checked_width) {
        (None, None) => Ok(None),
        (Some(Ok(height)), Some(Ok(width))) => Ok(Some(TargetSize::new(height, width))),
        (Some(Ok(_)), None) => Err(vec![FieldError::unpaired(
            TARGET_HEIGHT,
            height.unwrap_or(&Value::Null),
            TARGET_WIDTH,
        )]),
        (None, Some(Ok(_))) => Err(vec![FieldError::unpaired(
            TARGET_WIDTH,
            width.unwrap_or(&Value::Null),
            TARGET_HEIGHT,
        )]),
        (height, width) => Err(height
            .into_iter()
            .chain(width)
            .filter_map(Result::err)
            .collect()),
    }
}

/// Validates `input_format`: exactly `NCHW` or `NHWC`.
pub fn validate_input_format(value: &Value) -> Result<InputFormat, FieldError> {
    value
        .as_str()
        .and_then(InputFormat::parse)
        .ok_or_else(|| {
            FieldError::invalid(
                INPUT_FORMAT,
                value,
                FieldErrorKind::NotAllowed {
                    allowed: InputFormat::ALLOWED,
                },
            )
        })
}

/// Validates `scale`: a JSON number strictly greater than zero.
pub fn validate_scale(value: &Value) -> Result<f64, FieldError> {
    match value.as_f64() {
        Some(scale) if scale > 0.0 && scale.is_finite() => Ok(scale),
        Some(_) => Err(FieldError::invalid(
            SCALE,
            value,
            FieldErrorKind::NotPositive,
        )),
        None => Err(FieldError::invalid(
            SCALE,
            value,
            FieldErrorKind::WrongType {
                expected: "a positive number",
            },
        )),
    }
}

/// Validates `standardization`: a JSON boolean.
pub fn validate_standardization(value: &Value) -> Result<bool, FieldError> {
    value.as_bool().ok_or_else(|| {
        FieldError::invalid(
            STANDARDIZATION,
            value,
            FieldErrorKind::WrongType {
                expected: "a boolean",
            },
        )
    })
}

/// Validates `color_format`: exactly `RGB` or `BGR`.
pub fn validate_color_format(value: &Value) -> Result<ColorFormat, FieldError> {
    value
        .as_str()
        .and_then(ColorFormat::parse)
        .ok_or_else(|| {
            FieldError::invalid(
                COLOR_FORMAT,
                value,
                FieldErrorKind::NotAllowed {
                    allowed: ColorFormat::ALLOWED,
                },
            )
        })
}

/// Validates `classes`: an object of numeric string keys to string labels.
///
/// Every bad entry is reported, not just the first.
pub fn validate_classes(value: &Value) -> Result<ClassMap, Vec<FieldError>> {
    let Some(entries) = value.as_object() else {
        return Err(vec![FieldError::invalid(
            CLASSES,
            value,
            FieldErrorKind::WrongType {
                expected: "an object of class index to label",
            },
        )]);
    };

    let mut classes = ClassMap::new();
    let mut failures = Vec::new();
    for (key, label) in entries {
        let Some(index) = ClassIndex::parse(key) else {
            failures.push(FieldError::invalid(
                CLASSES,
                value,
                FieldErrorKind::InvalidClassKey { key: key.clone() },
            ));
            continue;
        };
        match label.as_str() {
            Some(label) => {
                if classes.insert(index, label.to_string()).is_some() {
                    failures.push(FieldError::invalid(
                        CLASSES,
                        value,
                        FieldErrorKind::DuplicateClassKey { key: key.clone() },
                    ));
                }
            }
            None => failures.push(FieldError::invalid(
                CLASSES,
                value,
                FieldErrorKind::InvalidClassLabel { key: key.clone() },
            )),
        }
    }

    if failures.is_empty() {
        Ok(classes)
    } else {
        Err(failures)
    }
}

fn positive_integer(field: &'static str, value: &Value) -> Result<u32, FieldError> {
    if let Some(number) = value.as_u64() {
        if number == 0 {
            return Err(FieldError::invalid(field, value, FieldErrorKind::NotPositive));
        }
        return u32::try_from(number).map_err(|_| {
            FieldError::invalid(
                field,
                value,
                FieldErrorKind::WrongType {
                    expected: "an integer that fits in 32 bits",
                },
            )
        });
    }
    if value.as_i64().is_some() {
        return Err(FieldError::invalid(field, value, FieldErrorKind::NotPositive));
    }
    Err(FieldError::invalid(
        field,
        value,
        FieldErrorKind::WrongType {
            expected: "a positive integer",
        },
    ))
}
