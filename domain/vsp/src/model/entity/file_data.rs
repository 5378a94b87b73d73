use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role of a file in the onboarded package.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileDataType {
    Heat,
    HeatEnv,
    HeatNet,
    HeatVol,
    Chef,
    Puppet,
    Shell,
    Yang,
    YangXml,
    VesEvents,
    LifecycleOperations,
    Other,
    Helm,
    PmDictionary,
    CloudTechnologySpecificArtifact,
    ControllerBlueprintArchive,
}

impl FileDataType {
    /// Everything but heat templates, their env files and their volumes.
    pub fn is_artifact(file_type: Option<Self>) -> bool {
        !matches!(file_type, Some(Self::Heat | Self::HeatEnv | Self::HeatVol))
    }
}

/// One manifest entry with the entries that depend on it.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileDataType>,
    #[serde(default, alias = "base", skip_serializing_if = "Option::is_none")]
    pub is_base: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<FileData>>,
}

impl FileData {
    pub fn new(file: &str, file_type: FileDataType) -> Self {
        Self {
            file: file.to_owned(),
            file_type: Some(file_type),
            ..Default::default()
        }
    }

    pub fn add_file_data(&mut self, child: FileData) {
        self.data.get_or_insert_with(Vec::new).push(child);
    }

    pub fn children(&self) -> &[FileData] {
        self.data.as_deref().unwrap_or_default()
    }
}
