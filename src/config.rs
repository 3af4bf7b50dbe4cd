use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Naming and ordering knobs for resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Prepended to an annexure number to form its label ("Annexure A" + "2").
    pub annexure_prefix: String,
    /// Labels that head the outline, in this order, ahead of the annexures.
    pub leading: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            annexure_prefix: "Annexure A".to_string(),
            leading: vec![
                "Index".to_string(),
                "Original Application (OA)".to_string(),
            ],
        }
    }
}

impl LabelConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
