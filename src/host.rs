//! File-backed stand-in for the image-generation host.
//!
//! A request is a JSON document on disk; its `controlnet_units` array plays
//! the role of the extension's live in-memory settings.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{Context, Result};
use crate::extension::{ControlUnit, ExtensionHandle, UnitExtension};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub controlnet_units: Vec<ControlUnit>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationRequest {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        let request = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse request file {}", path.display()))?;
        Ok(request)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write request file {}", path.display()))?;
        Ok(())
    }
}

/// Extension implementation that reads and writes `GenerationRequest::controlnet_units`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestFileUnits;

impl UnitExtension for RequestFileUnits {
    type Request = GenerationRequest;

    fn extract_current(&self, request: &GenerationRequest) -> Result<Vec<ControlUnit>> {
        Ok(request.controlnet_units.clone())
    }

    fn apply(&self, request: &mut GenerationRequest, units: Vec<ControlUnit>) -> Result<()> {
        request.controlnet_units = units;
        Ok(())
    }
}

/// Decide once, at startup, whether the settings extension is usable.
pub fn resolve_extension(config: &Config) -> ExtensionHandle<RequestFileUnits> {
    match &config.extension_dir {
        Some(dir) if !dir.is_dir() => {
            ExtensionHandle::absent(format!("extension directory {} is missing", dir.display()))
        }
        Some(dir) => {
            info!("ControlNet extension loaded from {}", dir.display());
            ExtensionHandle::Present(RequestFileUnits)
        }
        None => ExtensionHandle::Present(RequestFileUnits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_file_preserves_unknown_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("request.json");
        fs::write(
            &path,
            json!({
                "prompt": "a lighthouse at dusk",
                "sampler_name": "Euler a",
                "controlnet_units": [{"module": "canny", "model": "control_canny"}]
            })
            .to_string(),
        )
        .unwrap();

        let request = GenerationRequest::load(&path).expect("load");
        assert_eq!(request.controlnet_units.len(), 1);
        assert_eq!(request.extra.get("sampler_name"), Some(&json!("Euler a")));

        request.save(&path).expect("save");
        let reread = GenerationRequest::load(&path).expect("reload");
        assert_eq!(reread, request);
    }

    #[test]
    fn apply_replaces_units() {
        let mut request = serde_json::from_value::<GenerationRequest>(json!({"prompt": "test"})).unwrap();
        let units = vec![ControlUnit::new("depth", "control_depth")];
        RequestFileUnits.apply(&mut request, units.clone()).unwrap();
        assert_eq!(RequestFileUnits.extract_current(&request).unwrap(), units);
    }

    #[test]
    fn missing_extension_dir_resolves_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::builtin().with_extension_dir(dir.path().join("sd-webui-controlnet"));
        match resolve_extension(&config) {
            ExtensionHandle::Absent { reason } => assert!(reason.contains("sd-webui-controlnet")),
            ExtensionHandle::Present(_) => panic!("missing directory resolved as present"),
        }

        let config = Config::builtin().with_extension_dir(dir.path());
        assert!(matches!(
            resolve_extension(&config),
            ExtensionHandle::Present(_)
        ));
        assert!(matches!(
            resolve_extension(&Config::builtin()),
            ExtensionHandle::Present(_)
        ));
    }
}
