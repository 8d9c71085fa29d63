//! # AMS Wrapper
//!
//! The configuration layer of a model-serving wrapper. It turns a JSON
//! description of a model's inputs and outputs into a validated, strongly
//! typed [`ModelInputConfig`](core::config::ModelInputConfig), and turns a
//! model's metadata file (e.g. a class label map) into a loaded model ready to
//! be attached to an inference connector.
//!
//! ## Modules
//!
//! * [`core`] - Config types, field validators, the config loader, errors and the model registry
//! * [`models`] - The [`Model`](models::Model) interface and concrete model variants
//! * [`utils`] - Metadata file helpers and logging setup
//!
//! ## Loading an input config
//!
//! Every field of every input and output is checked before the loader gives
//! up, so one failed load reports every problem in the file.
//!
//! ```rust,no_run
//! use ams_wrapper::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! match load_input_configs("model_config.json") {
//!     Ok(config) => println!("{} has {} input(s)", config.model_name(), config.inputs().len()),
//!     Err(AmsError::Validation(report)) => {
//!         for failure in report.failures() {
//!             eprintln!("{failure}");
//!         }
//!     }
//!     Err(other) => return Err(other.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Constructing a model
//!
//! ```rust,no_run
//! use ams_wrapper::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = VehicleDetectionAdas::load(
//!     "vehicle_detection_adas",
//!     "localhost:9000",
//!     "ams_models/vehicle_detection_adas_model.json",
//! )?;
//! assert_eq!(model.labels().get(1), Some("vehicle"));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod models;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use ams_wrapper::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{
        ColorFormat, InputFormat, InputSpec, ModelInputConfig, OutputSpec, TargetSize,
        ValidationError, load_input_configs,
    };
    pub use crate::core::{AmsError, AmsResult, ModelKind, load_model};
    pub use crate::models::{ClassLabels, LoadModel, Model, VehicleDetectionAdas};
}
