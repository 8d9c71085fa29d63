//! Loading and validation of model input/output config files.
//!
//! [`load_input_configs`] reads a JSON document, runs every field validator
//! over every declared input and output, and either returns a complete
//! [`ModelInputConfig`] or one [`ValidationError`] listing every problem found.
//! It never stops at the first bad field.

use super::errors::{FieldError, FieldErrorKind, ValidationError};
use super::model_input::{InputSpec, ModelInputConfig, OutputSpec};
use super::validators::{self as v};
use crate::core::errors::{AmsError, AmsResult};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads and validates a model input/output config file.
///
/// # Arguments
///
/// * `path` - Path to the JSON config document.
///
/// # Errors
///
/// * [`AmsError::ConfigLoad`] if the file does not exist or cannot be read
/// * [`AmsError::ConfigParse`] if the file is not valid JSON
/// * [`AmsError::Validation`] carrying every rejected field otherwise
///
/// # Example
///
/// ```rust,no_run
/// use ams_wrapper::core::config::load_input_configs;
///
/// let config = load_input_configs("ams_models/vehicle_detection_adas_model.json")?;
/// assert_eq!(config.model_name(), "vehicle_detection_adas");
/// # Ok::<(), ams_wrapper::core::AmsError>(())
/// ```
pub fn load_input_configs(path: impl AsRef<Path>) -> AmsResult<ModelInputConfig> {
    let path = path.as_ref();
    debug!("Loading model input config from {}", path.display());

    let content =
        std::fs::read_to_string(path).map_err(|e| AmsError::config_load(path, e))?;
    let document: Value =
        serde_json::from_str(&content).map_err(|e| AmsError::config_parse(path, e))?;

    let config = ModelInputConfig::from_value(&document).inspect_err(|report| {
        warn!(
            "Input config {} rejected with {} problem(s)",
            path.display(),
            report.len()
        );
    })?;

    info!(
        "Loaded input config for model '{}': {} input(s), {} output(s)",
        config.model_name(),
        config.inputs().len(),
        config.outputs().len()
    );
    Ok(config)
}

impl ModelInputConfig {
    /// Validates an already parsed config document.
    ///
    /// This is the validation half of [`load_input_configs`], usable when the
    /// document did not come from a file.
    pub fn from_value(document: &Value) -> Result<Self, ValidationError> {
        let Some(root) = document.as_object() else {
            return Err(ValidationError::new(vec![FieldError::invalid(
                "document",
                document,
                FieldErrorKind::WrongType {
                    expected: "a JSON object",
                },
            )]));
        };

        let mut collector = FailureCollector::default();

        let model_name = collector.require(root, "", v::MODEL_NAME, |value| {
            v::validate_name(v::MODEL_NAME, value)
        });

        let inputs = collector
            .entries(root, v::INPUTS)
            .map(|entries| {
                let mut seen = HashSet::new();
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(index, entry)| {
                        collector.input(&format!("{}[{}]", v::INPUTS, index), entry, &mut seen)
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let outputs = collector
            .entries(root, v::OUTPUTS)
            .map(|entries| {
                let mut seen = HashSet::new();
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(index, entry)| {
                        collector.output(&format!("{}[{}]", v::OUTPUTS, index), entry, &mut seen)
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        match model_name {
            Some(model_name) if collector.failures.is_empty() => {
                Ok(ModelInputConfig::from_parts(model_name, inputs, outputs))
            }
            _ => Err(ValidationError::new(collector.failures)),
        }
    }
}

/// Accumulates field failures across a whole document.
#[derive(Default)]
struct FailureCollector {
    failures: Vec<FieldError>,
}

impl FailureCollector {
    /// Runs `validator` on an optional field. Absent and `null` fields are skipped.
    fn optional<T>(
        &mut self,
        entry: &Map<String, Value>,
        location: &str,
        field: &'static str,
        validator: impl FnOnce(&Value) -> Result<T, FieldError>,
    ) -> Option<T> {
        let value = present(entry, field)?;
        match validator(value) {
            Ok(valid) => Some(valid),
            Err(failure) => {
                self.failures.push(failure.at(location));
                None
            }
        }
    }

    /// Runs `validator` on a required field, recording a failure if it is absent.
    fn require<T>(
        &mut self,
        entry: &Map<String, Value>,
        location: &str,
        field: &'static str,
        validator: impl FnOnce(&Value) -> Result<T, FieldError>,
    ) -> Option<T> {
        if present(entry, field).is_none() {
            self.failures.push(FieldError::missing(field).at(location));
            return None;
        }
        self.optional(entry, location, field, validator)
    }

    fn extend(&mut self, location: &str, failures: Vec<FieldError>) {
        self.failures
            .extend(failures.into_iter().map(|failure| failure.at(location)));
    }

    /// Returns the top-level array `field`, recording a failure if it is absent or not an array.
    fn entries<'a>(
        &mut self,
        root: &'a Map<String, Value>,
        field: &'static str,
    ) -> Option<&'a Vec<Value>> {
        match present(root, field) {
            None => {
                self.failures.push(FieldError::missing(field));
                None
            }
            Some(Value::Array(entries)) => Some(entries),
            Some(other) => {
                self.failures.push(FieldError::invalid(
                    field,
                    other,
                    FieldErrorKind::WrongType {
                        expected: "an array",
                    },
                ));
                None
            }
        }
    }

    /// Returns the entry as an object, recording a failure otherwise.
    fn object<'a>(&mut self, location: &str, entry: &'a Value) -> Option<&'a Map<String, Value>> {
        let object = entry.as_object();
        if object.is_none() {
            self.failures.push(FieldError::invalid(
                location,
                entry,
                FieldErrorKind::WrongType {
                    expected: "an object",
                },
            ));
        }
        object
    }

    fn unique_name(
        &mut self,
        location: &str,
        field: &'static str,
        name: Option<String>,
        seen: &mut HashSet<String>,
    ) -> Option<String> {
        let name = name?;
        if seen.insert(name.clone()) {
            Some(name)
        } else {
            self.failures.push(
                FieldError::invalid(field, &Value::String(name), FieldErrorKind::Duplicate)
                    .at(location),
            );
            None
        }
    }

    fn input(
        &mut self,
        location: &str,
        entry: &Value,
        seen: &mut HashSet<String>,
    ) -> Option<InputSpec> {
        let entry = self.object(location, entry)?;
        let before = self.failures.len();
        log_unknown_keys(location, entry, v::INPUT_FIELDS);

        let name = self.require(entry, location, v::INPUT_NAME, |value| {
            v::validate_name(v::INPUT_NAME, value)
        });
        let input_name = self.unique_name(location, v::INPUT_NAME, name, seen);
        let channels = self.optional(entry, location, v::CHANNELS, v::validate_channels);
        let target_size = match v::validate_target_size(
            present(entry, v::TARGET_HEIGHT),
            present(entry, v::TARGET_WIDTH),
        ) {
            Ok(size) => size,
            Err(failures) => {
                self.extend(location, failures);
                None
            }
        };
        let input_format =
            self.optional(entry, location, v::INPUT_FORMAT, v::validate_input_format);
        let scale = self.optional(entry, location, v::SCALE, v::validate_scale);
        let standardization = self.optional(
            entry,
            location,
            v::STANDARDIZATION,
            v::validate_standardization,
        );
        let color_format =
            self.optional(entry, location, v::COLOR_FORMAT, v::validate_color_format);

        if self.failures.len() != before {
            return None;
        }
        Some(InputSpec {
            input_name: input_name?,
            channels,
            target_size,
            input_format,
            scale,
            standardization,
            color_format,
        })
    }

    fn output(
        &mut self,
        location: &str,
        entry: &Value,
        seen: &mut HashSet<String>,
    ) -> Option<OutputSpec> {
        let entry = self.object(location, entry)?;
        let before = self.failures.len();
        log_unknown_keys(location, entry, v::OUTPUT_FIELDS);

        let name = self.require(entry, location, v::OUTPUT_NAME, |value| {
            v::validate_name(v::OUTPUT_NAME, value)
        });
        let output_name = self.unique_name(location, v::OUTPUT_NAME, name, seen);
        let classes = match present(entry, v::CLASSES).map(v::validate_classes) {
            None => None,
            Some(Ok(classes)) => Some(classes),
            Some(Err(failures)) => {
                self.extend(location, failures);
                None
            }
        };

        if self.failures.len() != before {
            return None;
        }
        Some(OutputSpec {
            output_name: output_name?,
            classes,
        })
    }
}

/// Looks up a field, treating an explicit `null` as absent.
fn present<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    entry.get(field).filter(|value| !value.is_null())
}

fn log_unknown_keys(location: &str, entry: &Map<String, Value>, known: &[&str]) {
    for key in entry.keys().filter(|key| !known.contains(&key.as_str())) {
        debug!("Ignoring unknown key '{}' in {}", key, location);
    }
}
