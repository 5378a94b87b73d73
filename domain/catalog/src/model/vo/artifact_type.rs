use serde::{Deserialize, Serialize};

use super::component_type::ComponentType;

/// Artifact types the CSAR import structure refers to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactTypeEnum {
    Heat,
    HeatVol,
    HeatNet,
    HeatNested,
    HeatArtifact,
    HeatEnv,
    Helm,
    Other,
}

impl ArtifactTypeEnum {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Heat => "HEAT",
            Self::HeatVol => "HEAT_VOL",
            Self::HeatNet => "HEAT_NET",
            Self::HeatNested => "HEAT_NESTED",
            Self::HeatArtifact => "HEAT_ARTIFACT",
            Self::HeatEnv => "HEAT_ENV",
            Self::Helm => "HELM",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactGroupType {
    Deployment,
    Informational,
    Lifecycle,
    ToscaArtifact,
    ServiceApi,
    Other,
}

/// One configured artifact type and where it may be used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtifactConfiguration {
    #[serde(rename = "type")]
    pub artifact_type: String,
    #[serde(default)]
    pub categories: Vec<ArtifactGroupType>,
    #[serde(default)]
    pub component_types: Vec<ComponentType>,
    #[serde(default)]
    pub accepted_types: Vec<String>,
}

impl ArtifactConfiguration {
    pub fn new(
        artifact_type: &str,
        categories: Vec<ArtifactGroupType>,
        component_types: Vec<ComponentType>,
    ) -> Self {
        Self {
            artifact_type: artifact_type.to_owned(),
            categories,
            component_types,
            accepted_types: vec![],
        }
    }
}

/// Deployment artifact types configured for a kind of component, in configuration order.
pub fn deployment_artifact_types(
    configurations: &[ArtifactConfiguration],
    component_type: ComponentType,
) -> Vec<&str> {
    configurations
        .iter()
        .filter(|c| c.categories.contains(&ArtifactGroupType::Deployment))
        .filter(|c| c.component_types.contains(&component_type))
        .map(|c| c.artifact_type.as_str())
        .collect()
}
