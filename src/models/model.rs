//! Common model abstraction.
//!
//! A model pairs a name and an inference connector handle with metadata it
//! loads from its own JSON file. The connector is opaque: it is stored as
//! given and handed back unchanged, never inspected.

use crate::core::AmsResult;
use crate::core::registry::ModelKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from integer class id to label, loaded from model metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassLabels(BTreeMap<u32, String>);

impl ClassLabels {
    /// Creates an empty label map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label, returning the previous label of that id if any.
    pub fn insert(&mut self, class_id: u32, label: impl Into<String>) -> Option<String> {
        self.0.insert(class_id, label.into())
    }

    /// Returns the label for a class id.
    pub fn get(&self, class_id: u32) -> Option<&str> {
        self.0.get(&class_id).map(String::as_str)
    }

    /// Returns the first class id carrying `label`.
    pub fn class_id(&self, label: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(_, candidate)| candidate.as_str() == label)
            .map(|(class_id, _)| *class_id)
    }

    /// Number of labelled classes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no classes are labelled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(class_id, label)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(class_id, label)| (*class_id, label.as_str()))
    }
}

impl FromIterator<(u32, String)> for ClassLabels {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Behaviour shared by every served model variant.
///
/// `C` is the inference connector handle type. It is owned by the caller's
/// choice of handle (typically a cheap clone such as an `Arc`), held by the
/// model, and never mutated or closed by it.
pub trait Model<C>: std::fmt::Debug + Send + Sync {
    /// Returns the registry kind of this model.
    fn kind(&self) -> ModelKind;

    /// Returns the name the model was constructed with.
    fn model_name(&self) -> &str;

    /// Returns the connector handle the model was constructed with.
    fn ovms_connector(&self) -> &C;

    /// Returns the class labels loaded from metadata.
    fn labels(&self) -> &ClassLabels;
}

/// Construction contract for model variants.
///
/// Construction reads the variant's metadata file exactly once and either
/// yields a fully loaded model or exactly one classified error. There are no
/// retries and no defaults for missing metadata.
pub trait LoadModel<C>: Model<C> + Sized {
    /// Builds the model from its name, connector handle and metadata file.
    ///
    /// # Errors
    ///
    /// * `AmsError::MetadataNotFound` if `metadata_path` does not exist
    /// * `AmsError::MetadataRead` if it cannot be read
    /// * `AmsError::MetadataDecode` if it is not valid JSON
    /// * `AmsError::MissingKey` if it lacks the keys this variant requires
    fn load(
        model_name: impl Into<String>,
        ovms_connector: C,
        metadata_path: impl AsRef<Path>,
    ) -> AmsResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_labels_lookup() {
        let labels: ClassLabels = [(0, "background".to_string()), (1, "vehicle".to_string())]
            .into_iter()
            .collect();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get(1), Some("vehicle"));
        assert_eq!(labels.get(2), None);
        assert_eq!(labels.class_id("background"), Some(0));
        assert_eq!(labels.class_id("person"), None);
        assert_eq!(
            labels.iter().collect::<Vec<_>>(),
            vec![(0, "background"), (1, "vehicle")]
        );
    }

    #[test]
    fn test_class_labels_insert_replaces() {
        let mut labels = ClassLabels::new();
        assert!(labels.is_empty());
        assert_eq!(labels.insert(3, "car"), None);
        assert_eq!(labels.insert(3, "truck"), Some("car".to_string()));
        assert_eq!(labels.get(3), Some("truck"));
    }
}
