use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataKeyDefinition {
    pub name: String,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub valid_values: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupingDefinition {
    pub unique_id: Option<String>,
    pub name: String,
    pub normalized_name: String,
    #[serde(default)]
    pub metadata_keys: Vec<MetadataKeyDefinition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDefinition {
    pub unique_id: Option<String>,
    pub name: String,
    pub normalized_name: String,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub metadata_keys: Vec<MetadataKeyDefinition>,
    #[serde(default)]
    pub groupings: Vec<GroupingDefinition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub unique_id: Option<String>,
    pub name: String,
    pub normalized_name: String,
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub use_service_substitution_for_nested_services: bool,
    #[serde(default)]
    pub metadata_keys: Vec<MetadataKeyDefinition>,
    #[serde(default)]
    pub subcategories: Vec<SubCategoryDefinition>,
}
