//! Model registry entry point.
//!
//! Maps registry names to concrete model variants so the serving process can
//! build models from configuration without naming their types. Each call
//! builds one independent model; the registry keeps no state.

use crate::core::{AmsError, AmsResult};
use crate::models::{LoadModel, Model, VehicleDetectionAdas};
use std::path::Path;
use std::str::FromStr;

/// Known model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Vehicle detection for ADAS scenes
    VehicleDetectionAdas,
}

impl ModelKind {
    /// Every registered variant.
    pub const ALL: &'static [ModelKind] = &[ModelKind::VehicleDetectionAdas];

    /// Returns the registry name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::VehicleDetectionAdas => "vehicle_detection_adas",
        }
    }

    /// Builds a model of this kind.
    ///
    /// # Arguments
    ///
    /// * `model_name` - Name the model is served under.
    /// * `ovms_connector` - Connector handle, passed through unchanged.
    /// * `metadata_path` - The variant's metadata file.
    ///
    /// # Returns
    ///
    /// The loaded model behind the common [`Model`] interface.
    pub fn load<C>(
        &self,
        model_name: impl Into<String>,
        ovms_connector: C,
        metadata_path: impl AsRef<Path>,
    ) -> AmsResult<Box<dyn Model<C>>>
    where
        C: std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            ModelKind::VehicleDetectionAdas => Ok(Box::new(VehicleDetectionAdas::load(
                model_name,
                ovms_connector,
                metadata_path,
            )?)),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = AmsError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| AmsError::unknown_model(name))
    }
}

/// Builds a model from its registry name.
///
/// # Errors
///
/// Returns `AmsError::UnknownModel` if no variant is registered under
/// `model_type`, or the variant's construction error otherwise.
pub fn load_model<C>(
    model_type: &str,
    model_name: impl Into<String>,
    ovms_connector: C,
    metadata_path: impl AsRef<Path>,
) -> AmsResult<Box<dyn Model<C>>>
where
    C: std::fmt::Debug + Send + Sync + 'static,
{
    model_type
        .parse::<ModelKind>()?
        .load(model_name, ovms_connector, metadata_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn adas_json_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("ams_models")
            .join("vehicle_detection_adas_model.json")
    }

    #[test]
    fn test_model_kind_names_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.name().parse::<ModelKind>().unwrap(), *kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_model_type() {
        let error = "face_detection".parse::<ModelKind>().unwrap_err();
        assert!(matches!(error, AmsError::UnknownModel { ref name } if name == "face_detection"));
    }

    #[test]
    fn test_load_model_by_name() {
        let model = load_model(
            "vehicle_detection_adas",
            "vehicle",
            "ovms-connector",
            adas_json_path(),
        )
        .unwrap();

        assert_eq!(model.kind(), ModelKind::VehicleDetectionAdas);
        assert_eq!(model.model_name(), "vehicle");
        assert_eq!(*model.ovms_connector(), "ovms-connector");
        assert_eq!(model.labels().len(), 2);
    }

    #[test]
    fn test_load_model_propagates_metadata_errors() {
        let error = load_model(
            "vehicle_detection_adas",
            "vehicle",
            "ovms-connector",
            "/nonexistent/vehicle.json",
        )
        .unwrap_err();
        assert!(matches!(error, AmsError::MetadataNotFound { .. }));
    }

    #[test]
    fn test_independent_loads_in_parallel() {
        let handles: Vec<_> = (0..4usize)
            .map(|index| {
                std::thread::spawn(move || {
                    ModelKind::VehicleDetectionAdas
                        .load(format!("vehicle-{index}"), index, adas_json_path())
                        .map(|model| (model.model_name().to_string(), *model.ovms_connector()))
                })
            })
            .collect();

        for (index, handle) in handles.into_iter().enumerate() {
            let (name, connector) = handle.join().unwrap().unwrap();
            assert_eq!(name, format!("vehicle-{index}"));
            assert_eq!(connector, index);
        }
    }
}
