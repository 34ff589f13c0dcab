use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::traits::ModelAuthority;
use super::types::LengthUnit;
use crate::error::{ReplayError, Result};

/// Model descriptor file format
///
/// ```json
/// { "name": "gait2392", "length_units": "meters", "markers": ["R.ASIS", "L.ASIS"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default)]
    pub length_units: LengthUnit,
    pub markers: Vec<String>,
}

impl ModelDescriptor {
    /// Load and validate a descriptor from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            ReplayError::ModelLoad(format!("Failed to read model from {:?}: {}", path, e))
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: ModelDescriptor = serde_json::from_str(json)
            .map_err(|e| ReplayError::ModelLoad(format!("Failed to parse model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReplayError::ModelLoad(format!("Failed to serialize model: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if let Some(pos) = self.markers.iter().position(|m| m.trim().is_empty()) {
            return Err(ReplayError::ModelLoad(format!(
                "Model '{}' has an empty marker name at position {}",
                self.name, pos
            )));
        }
        Ok(())
    }
}

impl ModelAuthority for ModelDescriptor {
    fn marker_names(&self) -> Vec<String> {
        self.markers.clone()
    }

    fn length_units(&self) -> LengthUnit {
        self.length_units
    }
}

/// In-memory model, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct StaticModel {
    pub markers: Vec<String>,
    pub length_units: LengthUnit,
}

impl StaticModel {
    pub fn new<S: Into<String>>(markers: impl IntoIterator<Item = S>, length_units: LengthUnit) -> Self {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            length_units,
        }
    }
}

impl ModelAuthority for StaticModel {
    fn marker_names(&self) -> Vec<String> {
        self.markers.clone()
    }

    fn length_units(&self) -> LengthUnit {
        self.length_units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_descriptor_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        let model = ModelDescriptor {
            name: "lower-limb".to_string(),
            length_units: LengthUnit::Meters,
            markers: vec!["RASI".to_string(), "LASI".to_string()],
        };
        model.save(&path).unwrap();

        let loaded = ModelDescriptor::load(&path).unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.marker_names(), vec!["RASI", "LASI"]);
    }

    #[test]
    fn test_units_default_to_meters() {
        let model = ModelDescriptor::from_json(r#"{"name": "m", "markers": ["A"]}"#).unwrap();
        assert_eq!(model.length_units(), LengthUnit::Meters);
    }

    #[test]
    fn test_missing_file_is_model_load_error() {
        let err = ModelDescriptor::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ReplayError::ModelLoad(_)));
    }

    #[test]
    fn test_blank_marker_name_rejected() {
        let err = ModelDescriptor::from_json(r#"{"name": "m", "markers": ["A", " "]}"#).unwrap_err();
        assert!(matches!(err, ReplayError::ModelLoad(_)));
    }
}
