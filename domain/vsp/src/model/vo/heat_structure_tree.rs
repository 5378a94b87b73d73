use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub file_name: String,
}

/// Heat files of an upload as related by the heat analysis: templates with their
/// env, volumes, nested templates and referenced artifacts.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatStructureTree {
    #[serde(default)]
    pub file_name: String,
    #[serde(default, rename = "isBase")]
    pub base: Option<bool>,
    #[serde(default)]
    pub env: Option<Box<HeatStructureTree>>,
    #[serde(default)]
    pub heat: Vec<HeatStructureTree>,
    #[serde(default)]
    pub volume: Vec<HeatStructureTree>,
    #[serde(default)]
    pub nested: Vec<HeatStructureTree>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub other: Vec<HeatStructureTree>,
}

impl HeatStructureTree {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_env(mut self, env: &str) -> Self {
        self.env = Some(Box::new(Self::new(env)));
        self
    }

    pub fn env_file_name(&self) -> Option<&str> {
        self.env.as_deref().map(|env| env.file_name.as_str())
    }
}
