use domain_catalog::model::vo::artifact_type::ArtifactConfiguration;
use infrastructure_common::config::CommonConfig;
use serde::Deserialize;

#[derive(Default, Clone, Deserialize, Debug)]
pub struct CatalogInitConfig {
    #[serde(default, flatten)]
    pub common: CommonConfig,
    /// Artifact types available to components.
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfiguration>,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Default, Clone, Deserialize, Debug)]
pub struct ImportConfig {
    /// Category YAML files, imported in order.
    #[serde(default)]
    pub categories: Vec<String>,
    /// CSAR import structure JSON files checked against the artifact types.
    #[serde(default)]
    pub import_structures: Vec<String>,
}
