use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::vo::{ErrorMessage, FileContentHandler, HeatStructureTree};

/// Stored upload of an orchestration template that is not yet processed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationTemplateCandidateData {
    #[serde(default)]
    pub content_data: Vec<u8>,
    /// JSON of the [`FilesDataStructure`](super::FilesDataStructure).
    pub files_data_structure: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_suffix: Option<String>,
    #[serde(default)]
    pub validation_data: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStructureList {
    #[serde(default)]
    pub import_structure: Option<HeatStructureTree>,
}

/// Everything known about an upload when its candidate entity is built.
#[derive(Debug, Clone, Default)]
pub struct CandidateDataEntityTo {
    pub uploaded_file_data: Vec<u8>,
    pub content_map: FileContentHandler,
    pub tree: Option<HeatStructureTree>,
    pub errors: BTreeMap<String, Vec<ErrorMessage>>,
}
