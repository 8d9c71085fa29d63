//! Served model variants.
//!
//! [`Model`] is the common interface; each variant implements [`LoadModel`]
//! to build itself from a name, a connector handle and its metadata file.

pub mod model;
pub mod vehicle_detection_adas;

pub use model::{ClassLabels, LoadModel, Model};
pub use vehicle_detection_adas::VehicleDetectionAdas;
