//! Vehicle detection (ADAS) model.
//!
//! The metadata file uses the same layout as a model input config. Labels are
//! taken from the first output's `classes` object, whose keys are numeric
//! class ids (`"1.0"`) and whose values are label strings:
//!
//! ```json
//! {
//!     "outputs": [
//!         {"output_name": "detection_out", "classes": {"0.0": "background", "1.0": "vehicle"}}
//!     ]
//! }
//! ```

use super::model::{ClassLabels, LoadModel, Model};
use crate::core::config::model_input::ClassIndex;
use crate::core::registry::ModelKind;
use crate::core::{AmsError, AmsResult};
use crate::utils::{read_metadata_json, require_key};
use serde_json::Value;
use std::path::Path;
use tracing::info;

const CLASSES_POINTER: &str = "/outputs/0/classes";
const CLASSES_KEY: &str = "outputs[0].classes";

/// Vehicle detection model for ADAS scenes.
#[derive(Debug, Clone)]
pub struct VehicleDetectionAdas<C> {
    model_name: String,
    ovms_connector: C,
    labels: ClassLabels,
}

impl<C> VehicleDetectionAdas<C> {
    /// Parses the label map out of a metadata document.
    ///
    /// Every class id must be a non-negative integral number and every label a
    /// string; an empty map is treated as missing.
    fn parse_labels(document: &Value, path: &Path) -> AmsResult<ClassLabels> {
        let classes = require_key(document, CLASSES_POINTER, CLASSES_KEY, path)?
            .as_object()
            .filter(|classes| !classes.is_empty())
            .ok_or_else(|| AmsError::missing_key(path, CLASSES_KEY))?;

        let mut labels = ClassLabels::new();
        for (key, label) in classes {
            let class_id = ClassIndex::parse(key).and_then(|index| index.as_class_id());
            let inserted = match (class_id, label.as_str()) {
                (Some(class_id), Some(label)) => labels.insert(class_id, label).is_none(),
                _ => false,
            };
            if !inserted {
                return Err(AmsError::missing_key(
                    path,
                    format!("{}.{}", CLASSES_KEY, key),
                ));
            }
        }
        Ok(labels)
    }
}

impl<C> Model<C> for VehicleDetectionAdas<C>
where
    C: std::fmt::Debug + Send + Sync,
{
    fn kind(&self) -> ModelKind {
        ModelKind::VehicleDetectionAdas
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn ovms_connector(&self) -> &C {
        &self.ovms_connector
    }

    fn labels(&self) -> &ClassLabels {
        &self.labels
    }
}

impl<C> LoadModel<C> for VehicleDetectionAdas<C>
where
    C: std::fmt::Debug + Send + Sync,
{
    fn load(
        model_name: impl Into<String>,
        ovms_connector: C,
        metadata_path: impl AsRef<Path>,
    ) -> AmsResult<Self> {
        let path = metadata_path.as_ref();
        let document = read_metadata_json(path)?;
        let labels = Self::parse_labels(&document, path)?;
        let model_name = model_name.into();

        info!(
            "Loaded {} label(s) for model '{}' from {}",
            labels.len(),
            model_name,
            path.display()
        );
        Ok(Self {
            model_name,
            ovms_connector,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn adas_json_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("ams_models")
            .join("vehicle_detection_adas_model.json")
    }

    fn metadata_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_model_object() {
        let model =
            VehicleDetectionAdas::load("test-model", "ovms-connector", adas_json_path()).unwrap();

        assert_eq!(model.model_name(), "test-model");
        assert_eq!(*model.ovms_connector(), "ovms-connector");
        assert_eq!(model.kind(), ModelKind::VehicleDetectionAdas);
        assert_eq!(model.labels().get(0), Some("background"));
        assert_eq!(model.labels().get(1), Some("vehicle"));
    }

    #[test]
    fn test_connector_is_passed_through() {
        let connector = Arc::new(String::from("localhost:9000"));
        let model =
            VehicleDetectionAdas::load("vehicle", Arc::clone(&connector), adas_json_path())
                .unwrap();

        assert!(Arc::ptr_eq(model.ovms_connector(), &connector));
    }

    #[test]
    fn test_bad_json_loading() {
        let file = metadata_file("{\"outputs\": [");
        let error = VehicleDetectionAdas::load("test-model", "ovms-connector", file.path())
            .unwrap_err();
        assert!(matches!(error, AmsError::MetadataDecode { .. }));
    }

    #[test]
    fn test_bad_path_loading() {
        let error = VehicleDetectionAdas::load(
            "test-model",
            "ovms-connector",
            "/nonexistent/labels_files/bad_path.json",
        )
        .unwrap_err();
        assert!(matches!(error, AmsError::MetadataNotFound { .. }));
    }

    #[test]
    fn test_bad_format_loading() {
        let file = metadata_file(
            r#"{"model_name": "vehicle", "outputs": [{"output_name": "detection_out", "labels": {"1.0": "vehicle"}}]}"#,
        );
        let error = VehicleDetectionAdas::load("test-model", "ovms-connector", file.path())
            .unwrap_err();
        match error {
            AmsError::MissingKey { key, .. } => assert_eq!(key, "outputs[0].classes"),
            other => panic!("expected missing key, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_outputs_is_missing_key() {
        let file = metadata_file(r#"{"model_name": "vehicle"}"#);
        let error = VehicleDetectionAdas::load("test-model", "ovms-connector", file.path())
            .unwrap_err();
        assert!(error.is_missing_key());
    }

    #[test]
    fn test_malformed_classes_are_missing_key() {
        for content in [
            r#"{"outputs": [{"classes": ["background", "vehicle"]}]}"#,
            r#"{"outputs": [{"classes": {}}]}"#,
            r#"{"outputs": [{"classes": {"vehicle": "1.0"}}]}"#,
            r#"{"outputs": [{"classes": {"0.5": "half"}}]}"#,
            r#"{"outputs": [{"classes": {"1": 1}}]}"#,
            r#"{"outputs": [{"classes": {"1": "car", "1.0": "truck"}}]}"#,
        ] {
            let file = metadata_file(content);
            let error = VehicleDetectionAdas::load("test-model", "ovms-connector", file.path())
                .unwrap_err();
            assert!(error.is_missing_key(), "{content}: {error}");
        }
    }

    #[test]
    fn test_repeated_class_id_names_the_later_key() {
        let file = metadata_file(r#"{"outputs": [{"classes": {"0": "background", "0.0": "road"}}]}"#);
        let error = VehicleDetectionAdas::load("test-model", "ovms-connector", file.path())
            .unwrap_err();
        match error {
            AmsError::MissingKey { key, .. } => assert_eq!(key, "outputs[0].classes.0.0"),
            other => panic!("expected missing key, got {other:?}"),
        }
    }
}
