//! Validated model input/output configuration.
//!
//! These types are the output of [`load_input_configs`](super::load_input_configs).
//! A [`ModelInputConfig`] can only be obtained from the loader, so holding one
//! means every field in it already passed validation.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Memory layout of the input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputFormat {
    /// Batch, channels, height, width.
    NCHW,
    /// Batch, height, width, channels.
    NHWC,
}

impl InputFormat {
    /// Accepted spellings, in declaration order.
    pub const ALLOWED: &'static [&'static str] = &["NCHW", "NHWC"];

    /// Parses an exact, case-sensitive layout name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NCHW" => Some(InputFormat::NCHW),
            "NHWC" => Some(InputFormat::NHWC),
            _ => None,
        }
    }

    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::NCHW => "NCHW",
            InputFormat::NHWC => "NHWC",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color channel order for image input.
///
/// Specifies whether the model expects RGB or BGR channel ordering.
/// Most image libraries use RGB, while OpenCV-trained models typically
/// expect BGR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorFormat {
    /// Red, Green, Blue order
    RGB,
    /// Blue, Green, Red order
    BGR,
}

impl ColorFormat {
    /// Accepted spellings, in declaration order.
    pub const ALLOWED: &'static [&'static str] = &["RGB", "BGR"];

    /// Parses an exact, case-sensitive color order name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "RGB" => Some(ColorFormat::RGB),
            "BGR" => Some(ColorFormat::BGR),
            _ => None,
        }
    }

    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::RGB => "RGB",
            ColorFormat::BGR => "BGR",
        }
    }
}

impl std::fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spatial size the input image is resized to before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSize {
    /// Target height in pixels (>= 1)
    pub height: u32,
    /// Target width in pixels (>= 1)
    pub width: u32,
}

impl TargetSize {
    /// Creates a new target size.
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Numeric class index parsed from a `classes` key such as `"1.0"`.
///
/// Ordered with [`f64::total_cmp`] so it can key a `BTreeMap`. Keys are
/// always finite; the loader rejects `NaN` and infinities.
#[derive(Debug, Clone, Copy)]
pub struct ClassIndex(f64);

impl ClassIndex {
    /// Parses a class key. Returns `None` for non-numeric or non-finite keys.
    ///
    /// `-0.0` is folded into `0.0`.
    pub fn parse(key: &str) -> Option<Self> {
        key.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| ClassIndex(if value == 0.0 { 0.0 } else { value }))
    }

    /// Returns the raw numeric value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the index as an integer class id when it is integral and non-negative.
    pub fn as_class_id(&self) -> Option<u32> {
        let value = self.0;
        if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
            Some(value as u32)
        } else {
            None
        }
    }
}

impl From<u32> for ClassIndex {
    fn from(value: u32) -> Self {
        ClassIndex(value as f64)
    }
}

impl PartialEq for ClassIndex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ClassIndex {}

impl PartialOrd for ClassIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as a string so it stays usable as a JSON object key.
impl Serialize for ClassIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mapping from class index to human readable label.
pub type ClassMap = BTreeMap<ClassIndex, String>;

/// One configured model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    /// Name of the model input, unique within a config
    pub input_name: String,
    /// Number of channels; `None` means inferred elsewhere
    pub channels: Option<u32>,
    /// Resize target; height and width are always set together
    pub target_size: Option<TargetSize>,
    /// Tensor layout
    pub input_format: Option<InputFormat>,
    /// Scale factor applied to pixel values (> 0)
    pub scale: Option<f64>,
    /// Whether to standardize the input
    pub standardization: Option<bool>,
    /// Expected color channel order
    pub color_format: Option<ColorFormat>,
}

impl InputSpec {
    /// Creates an input spec with every optional attribute unset.
    pub fn new(input_name: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            channels: None,
            target_size: None,
            input_format: None,
            scale: None,
            standardization: None,
            color_format: None,
        }
    }

    /// Sets the channel count.
    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Sets the resize target.
    pub fn with_target_size(mut self, height: u32, width: u32) -> Self {
        self.target_size = Some(TargetSize::new(height, width));
        self
    }

    /// Sets the tensor layout.
    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = Some(input_format);
        self
    }

    /// Sets the pixel scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets whether the input is standardized.
    pub fn with_standardization(mut self, standardization: bool) -> Self {
        self.standardization = Some(standardization);
        self
    }

    /// Sets the color channel order.
    pub fn with_color_format(mut self, color_format: ColorFormat) -> Self {
        self.color_format = Some(color_format);
        self
    }
}

/// One configured model output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpec {
    /// Name of the model output, unique within a config
    pub output_name: String,
    /// Optional class index to label mapping
    pub classes: Option<ClassMap>,
}

impl OutputSpec {
    /// Creates an output spec without class labels.
    pub fn new(output_name: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            classes: None,
        }
    }

    /// Attaches a class mapping.
    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.classes = Some(classes);
        self
    }

    /// Looks up the label of a class index.
    pub fn label(&self, index: impl Into<ClassIndex>) -> Option<&str> {
        let index = index.into();
        self.classes
            .as_ref()
            .and_then(|classes| classes.get(&index))
            .map(String::as_str)
    }
}

/// Complete, validated input/output configuration of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInputConfig {
    model_name: String,
    inputs: Vec<InputSpec>,
    outputs: Vec<OutputSpec>,
}

impl ModelInputConfig {
    /// Assembles a config from parts that have already been validated.
    pub(crate) fn from_parts(
        model_name: String,
        inputs: Vec<InputSpec>,
        outputs: Vec<OutputSpec>,
    ) -> Self {
        Self {
            model_name,
            inputs,
            outputs,
        }
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the inputs in document order.
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    /// Returns the outputs in document order.
    pub fn outputs(&self) -> &[OutputSpec] {
        &self.outputs
    }

    /// Finds an input by name.
    pub fn input(&self, input_name: &str) -> Option<&InputSpec> {
        self.inputs
            .iter()
            .find(|input| input.input_name == input_name)
    }

    /// Finds an output by name.
    pub fn output(&self, output_name: &str) -> Option<&OutputSpec> {
        self.outputs
            .iter()
            .find(|output| output.output_name == output_name)
    }

    /// Returns the class mapping of the named output, if it has one.
    pub fn labels(&self, output_name: &str) -> Option<&ClassMap> {
        self.output(output_name)
            .and_then(|output| output.classes.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing_is_exact() {
        assert_eq!(InputFormat::parse("NCHW"), Some(InputFormat::NCHW));
        assert_eq!(InputFormat::parse("NHWC"), Some(InputFormat::NHWC));
        assert_eq!(InputFormat::parse("CHWN"), None);
        assert_eq!(InputFormat::parse("nchw"), None);

        assert_eq!(ColorFormat::parse("RGB"), Some(ColorFormat::RGB));
        assert_eq!(ColorFormat::parse("BGR"), Some(ColorFormat::BGR));
        assert_eq!(ColorFormat::parse("RGR"), None);
    }

    #[test]
    fn test_class_index_parse() {
        assert_eq!(ClassIndex::parse("0.0"), Some(ClassIndex::from(0)));
        assert_eq!(ClassIndex::parse("1"), Some(ClassIndex::from(1)));
        assert!(ClassIndex::parse("background").is_none());
        assert!(ClassIndex::parse("NaN").is_none());
        assert!(ClassIndex::parse("inf").is_none());
        assert_eq!(ClassIndex::parse(" 2.5 ").map(|index| index.value()), Some(2.5));
    }

    #[test]
    fn test_negative_zero_class_key() {
        let zero = ClassIndex::parse("-0.0").unwrap();
        assert_eq!(zero, ClassIndex::from(0));
        assert!(zero.value().is_sign_positive());

        let mut classes = ClassMap::new();
        classes.insert(zero, "background".to_string());
        let output = OutputSpec::new("prob").with_classes(classes);
        assert_eq!(output.label(0u32), Some("background"));
    }

    #[test]
    fn test_class_index_as_class_id() {
        assert_eq!(ClassIndex::parse("2.0").unwrap().as_class_id(), Some(2));
        assert_eq!(ClassIndex::parse("0.5").unwrap().as_class_id(), None);
        assert_eq!(ClassIndex::parse("-1").unwrap().as_class_id(), None);
    }

    #[test]
    fn test_class_index_ordering() {
        let mut classes = ClassMap::new();
        classes.insert(ClassIndex::parse("10").unwrap(), "ten".to_string());
        classes.insert(ClassIndex::parse("2.0").unwrap(), "two".to_string());
        classes.insert(ClassIndex::parse("0.5").unwrap(), "half".to_string());

        let labels: Vec<&str> = classes.values().map(String::as_str).collect();
        assert_eq!(labels, vec!["half", "two", "ten"]);
    }

    #[test]
    fn test_output_label_lookup() {
        let mut classes = ClassMap::new();
        classes.insert(ClassIndex::from(0), "female".to_string());
        classes.insert(ClassIndex::from(1), "male".to_string());
        let output = OutputSpec::new("prob").with_classes(classes);

        assert_eq!(output.label(1), Some("male"));
        assert_eq!(output.label(7), None);
        assert_eq!(OutputSpec::new("age_conv3").label(0), None);
    }

    #[test]
    fn test_config_lookups() {
        let config = ModelInputConfig::from_parts(
            "demo".to_string(),
            vec![InputSpec::new("data").with_target_size(384, 672)],
            vec![OutputSpec::new("detection_out")],
        );

        assert_eq!(config.model_name(), "demo");
        assert_eq!(
            config.input("data").and_then(|input| input.target_size),
            Some(TargetSize::new(384, 672))
        );
        assert!(config.input("missing").is_none());
        assert!(config.output("detection_out").is_some());
        assert!(config.labels("detection_out").is_none());
    }

    #[test]
    fn test_serialize_class_keys_as_strings() {
        let mut classes = ClassMap::new();
        classes.insert(ClassIndex::from(1), "vehicle".to_string());
        let output = OutputSpec::new("detection_out").with_classes(classes);

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["classes"]["1"], "vehicle");
    }
}
