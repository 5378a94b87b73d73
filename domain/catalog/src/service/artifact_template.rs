use serde_json::{Map, Value};

use crate::{exception::CatalogResult, model::entity::ArtifactTemplateInfo};

pub trait ArtifactTemplateService: Send + Sync {
    /// Builds one template and its nested templates from the import structure JSON.
    ///
    /// `created` holds the top-level templates parsed before this one.
    fn create_artifact_template_info(
        &self,
        raw_type: &str,
        json: &Map<String, Value>,
        created: &[ArtifactTemplateInfo],
        parent: Option<&ArtifactTemplateInfo>,
    ) -> CatalogResult<ArtifactTemplateInfo>;

    /// Parses every template of an import structure, base templates first.
    fn parse_import_structure(&self, import_structure: &Value)
        -> CatalogResult<Vec<ArtifactTemplateInfo>>;
}
