use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    #[serde(rename = "Just Resize")]
    JustResize,
    #[default]
    #[serde(rename = "Crop and Resize")]
    CropAndResize,
    #[serde(rename = "Resize and Fill")]
    ResizeAndFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    #[default]
    Balanced,
    #[serde(rename = "My prompt is more important")]
    PromptFirst,
    #[serde(rename = "ControlNet is more important")]
    ControlFirst,
}

/// One guidance input as the ControlNet extension describes it.
///
/// Keys this crate does not know about are carried through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlUnit {
    pub enabled: bool,
    pub module: String,
    pub model: String,
    pub weight: f64,
    pub image: Option<Value>,
    pub resize_mode: ResizeMode,
    pub low_vram: bool,
    pub processor_res: i64,
    pub threshold_a: f64,
    pub threshold_b: f64,
    pub guidance_start: f64,
    pub guidance_end: f64,
    pub pixel_perfect: bool,
    pub control_mode: ControlMode,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ControlUnit {
    fn default() -> Self {
        Self {
            enabled: true,
            module: "none".to_string(),
            model: "None".to_string(),
            weight: 1.0,
            image: None,
            resize_mode: ResizeMode::default(),
            low_vram: false,
            processor_res: -1,
            threshold_a: -1.0,
            threshold_b: -1.0,
            guidance_start: 0.0,
            guidance_end: 1.0,
            pixel_perfect: false,
            control_mode: ControlMode::default(),
            extra: Map::new(),
        }
    }
}

impl ControlUnit {
    pub fn new(module: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            model: model.into(),
            ..Self::default()
        }
    }
}
