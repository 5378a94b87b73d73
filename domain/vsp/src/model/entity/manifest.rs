use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::FileData;
use crate::exception::{VspException, VspResult};

/// `MANIFEST.json` of an onboarded package.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ManifestContent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub data: Vec<FileData>,
}

impl ManifestContent {
    pub fn from_slice(content: &[u8]) -> VspResult<Self> {
        serde_json::from_slice(content).map_err(|e| VspException::InvalidManifest {
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> VspResult<String> {
        Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?)
    }
}
