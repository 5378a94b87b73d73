use std::sync::Arc;

use domain_catalog::{
    exception::{CatalogException, CatalogResult},
    model::{
        entity::ArtifactTemplateInfo,
        vo::{
            artifact_type::{deployment_artifact_types, ArtifactConfiguration, ArtifactTypeEnum},
            component_type::ComponentType,
        },
    },
    service::ArtifactTemplateService,
};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

const TYPE: &str = "type";
const FILE_NAME: &str = "fileName";
const ENV: &str = "env";
const IS_BASE: &str = "isBase";
const DESCRIPTION: &str = "description";
const IMPORT_STRUCTURE: &str = "importStructure";

const CSAR_ARTIFACT: &str = "artifacts";
const CSAR_NESTED: &str = "nested";
const CSAR_VOLUME: &str = "volume";
const CSAR_NETWORK: &str = "network";

pub const MAX_ARTIFACT_NESTING_DEPTH: usize = 16;

#[derive(TypedBuilder)]
pub struct ArtifactTemplateServiceImpl {
    artifact_configurations: Arc<Vec<ArtifactConfiguration>>,
    #[builder(default = ComponentType::Resource)]
    component_type: ComponentType,
}

impl ArtifactTemplateServiceImpl {
    fn create_at_depth(
        &self,
        raw_type: &str,
        json: &Map<String, Value>,
        created: &[ArtifactTemplateInfo],
        parent: Option<&ArtifactTemplateInfo>,
        depth: usize,
    ) -> CatalogResult<ArtifactTemplateInfo> {
        let mut info = template_from_json(json);
        if depth > MAX_ARTIFACT_NESTING_DEPTH {
            return Err(CatalogException::ArtifactNestingTooDeep {
                file_name: info.file_name,
                max_depth: MAX_ARTIFACT_NESTING_DEPTH,
            });
        }
        let wanted = tag_type(raw_type, &info, parent.is_some());
        info.artifact_type = self.resolve_type(&wanted)?.to_owned();

        info.validate_env(created)?;
        info.validate_parent_type(parent)?;
        info.validate_is_already_exist(created, parent)?;

        for (key, value) in json {
            let Value::Array(items) = value else {
                continue;
            };
            for item in items {
                let Value::Object(child_json) = item else {
                    tracing::debug!("Skipping non-object entry under {key} of {}", info.file_name);
                    continue;
                };
                let child = self.create_at_depth(key, child_json, created, Some(&info), depth + 1)?;
                info.related_artifacts_info.push(child);
            }
        }
        Ok(info)
    }

    /// First configured deployment type containing `wanted`.
    fn resolve_type(&self, wanted: &str) -> CatalogResult<&str> {
        let types = deployment_artifact_types(&self.artifact_configurations, self.component_type);
        if types.is_empty() {
            tracing::error!(
                "No deployment artifact types configured for {}",
                self.component_type
            );
            return Err(CatalogException::FailedRetrieveArtifactsTypes);
        }
        types
            .into_iter()
            .find(|configured| !wanted.is_empty() && configured.contains(wanted))
            .ok_or_else(|| {
                tracing::debug!("Not supported artifact type = {wanted}");
                CatalogException::ArtifactTypeNotSupported {
                    artifact_type: wanted.to_owned(),
                }
            })
    }
}

impl ArtifactTemplateService for ArtifactTemplateServiceImpl {
    fn create_artifact_template_info(
        &self,
        raw_type: &str,
        json: &Map<String, Value>,
        created: &[ArtifactTemplateInfo],
        parent: Option<&ArtifactTemplateInfo>,
    ) -> CatalogResult<ArtifactTemplateInfo> {
        self.create_at_depth(raw_type, json, created, parent, 0)
    }

    fn parse_import_structure(
        &self,
        import_structure: &Value,
    ) -> CatalogResult<Vec<ArtifactTemplateInfo>> {
        let root = import_structure
            .get(IMPORT_STRUCTURE)
            .unwrap_or(import_structure);
        let Some(root) = root.as_object() else {
            return Err(anyhow::anyhow!("Import structure is not a JSON object").into());
        };
        let mut created: Vec<ArtifactTemplateInfo> = vec![];
        for (key, value) in root {
            let Some(items) = value.as_array() else {
                continue;
            };
            for item in items.iter().filter_map(Value::as_object) {
                let info = self.create_artifact_template_info(key, item, &created, None)?;
                created.push(info);
            }
        }
        created.sort_by(ArtifactTemplateInfo::compare_by_group_name);
        Ok(created)
    }
}

fn template_from_json(json: &Map<String, Value>) -> ArtifactTemplateInfo {
    let text = |key: &str| json.get(key).and_then(Value::as_str).map(str::to_owned);
    let file_name = text(FILE_NAME).unwrap_or_default();
    let env = json.get(ENV).map(|env| match env {
        Value::String(name) => name.to_owned(),
        Value::Object(env) => env
            .get(FILE_NAME)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
        _ => String::new(),
    });
    ArtifactTemplateInfo {
        artifact_type: text(TYPE).unwrap_or_default(),
        base: json.get(IS_BASE).and_then(Value::as_bool).unwrap_or_default(),
        env,
        description: text(DESCRIPTION).or_else(|| Some(file_name.to_owned())),
        file_name,
        ..Default::default()
    }
}

/// Artifact type implied by the tag the template was listed under.
fn tag_type(raw_type: &str, info: &ArtifactTemplateInfo, has_parent: bool) -> String {
    let tag = |name: &str| raw_type.eq_ignore_ascii_case(name);
    let artifact_type = if tag(CSAR_NESTED) {
        ArtifactTypeEnum::HeatNested
    } else if tag(CSAR_VOLUME) {
        ArtifactTypeEnum::HeatVol
    } else if tag(CSAR_NETWORK) {
        ArtifactTypeEnum::HeatNet
    } else if tag(CSAR_ARTIFACT) {
        if !has_parent {
            return info.artifact_type.to_owned();
        }
        ArtifactTypeEnum::HeatArtifact
    } else if tag(ArtifactTypeEnum::Heat.value()) {
        ArtifactTypeEnum::Heat
    } else if tag(ArtifactTypeEnum::Helm.value()) {
        ArtifactTypeEnum::Helm
    } else {
        ArtifactTypeEnum::Other
    };
    artifact_type.value().to_owned()
}

#[cfg(test)]
mod tests {
    use domain_catalog::model::vo::artifact_type::ArtifactGroupType;
    use serde_json::json;

    use super::*;

    fn service() -> ArtifactTemplateServiceImpl {
        let resource = |t: &str| {
            ArtifactConfiguration::new(
                t,
                vec![ArtifactGroupType::Deployment],
                vec![ComponentType::Resource],
            )
        };
        ArtifactTemplateServiceImpl::builder()
            .artifact_configurations(Arc::new(vec![
                resource("HEAT"),
                resource("HEAT_VOL"),
                resource("HEAT_NET"),
                resource("HEAT_NESTED"),
                resource("HEAT_ARTIFACT"),
                resource("HELM"),
                resource("OTHER"),
            ]))
            .build()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_import_structure_tree() {
        let structure = json!({
            "importStructure": {
                "HEAT": [
                    {
                        "fileName": "module_1.yaml",
                        "env": "module_1.env",
                        "isBase": false,
                        "volume": [{ "fileName": "vol_1.yaml", "env": { "fileName": "vol_1.env" } }],
                        "nested": [{
                            "fileName": "nested.yaml",
                            "artifacts": [{ "fileName": "script.sh" }]
                        }]
                    },
                    { "fileName": "base.yaml", "isBase": true, "description": "base module" }
                ]
            }
        });
        let templates = service().parse_import_structure(&structure).unwrap();
        assert_eq!(templates.len(), 2);
        let base = &templates[0];
        assert!(base.base);
        assert_eq!(base.file_name, "base.yaml");
        assert_eq!(base.description.as_deref(), Some("base module"));

        let module = &templates[1];
        assert_eq!(module.artifact_type, "HEAT");
        assert_eq!(module.related_artifacts_info.len(), 2);
        let child = |file_name: &str| {
            module
                .related_artifacts_info
                .iter()
                .find(|c| c.file_name == file_name)
                .unwrap()
        };
        let volume = child("vol_1.yaml");
        assert_eq!(volume.artifact_type, "HEAT_VOL");
        assert_eq!(volume.env.as_deref(), Some("vol_1.env"));
        assert_eq!(volume.description.as_deref(), Some("vol_1.yaml"));
        let nested = child("nested.yaml");
        assert_eq!(nested.artifact_type, "HEAT_NESTED");
        assert_eq!(nested.related_artifacts_info[0].artifact_type, "HEAT_ARTIFACT");
    }

    #[test]
    fn test_substring_match_follows_configuration_order() {
        let service = ArtifactTemplateServiceImpl::builder()
            .artifact_configurations(Arc::new(vec![ArtifactConfiguration::new(
                "HEAT_VOL",
                vec![ArtifactGroupType::Deployment],
                vec![ComponentType::Resource],
            )]))
            .build();
        let info = service
            .create_artifact_template_info("HEAT", &object(json!({"fileName": "a.yaml"})), &[], None)
            .unwrap();
        assert_eq!(info.artifact_type, "HEAT_VOL");
    }

    #[test]
    fn test_unsupported_and_unconfigured_types() {
        let service = ArtifactTemplateServiceImpl::builder()
            .artifact_configurations(Arc::new(vec![ArtifactConfiguration::new(
                "HEAT",
                vec![ArtifactGroupType::Deployment],
                vec![ComponentType::Resource],
            )]))
            .build();
        let err = service
            .create_artifact_template_info("HELM", &object(json!({"fileName": "c.tgz"})), &[], None)
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_TYPE_NOT_SUPPORTED");

        let service = ArtifactTemplateServiceImpl::builder()
            .artifact_configurations(Arc::new(vec![]))
            .component_type(ComponentType::Service)
            .build();
        let err = service
            .create_artifact_template_info("HEAT", &object(json!({"fileName": "a.yaml"})), &[], None)
            .unwrap_err();
        assert_eq!(err.action_status(), "FAILED_RETRIVE_ARTIFACTS_TYPES");
    }

    #[test]
    fn test_top_level_artifacts_keep_embedded_type() {
        let info = service()
            .create_artifact_template_info(
                "artifacts",
                &object(json!({"type": "HELM", "fileName": "chart.tgz"})),
                &[],
                None,
            )
            .unwrap();
        assert_eq!(info.artifact_type, "HELM");

        let err = service()
            .create_artifact_template_info("artifacts", &object(json!({"fileName": "x"})), &[], None)
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_TYPE_NOT_SUPPORTED");
    }

    #[test]
    fn test_validation_failures() {
        let structure = json!({
            "HEAT": [
                { "fileName": "base.yaml", "env": "base.env" },
                { "fileName": "base.yaml", "env": "other.env" }
            ]
        });
        let err = service().parse_import_structure(&structure).unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_NOT_VALID_ENV");

        let structure = json!({
            "HEAT": [{ "fileName": "base.yaml", "nested": [{ "fileName": "net.yaml", "network": [{ "fileName": "n.yaml" }] }] }]
        });
        let err = service().parse_import_structure(&structure).unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_NOT_VALID_IN_MASTER");

        let structure = json!({
            "HEAT": [{
                "fileName": "base.yaml",
                "artifacts": [{ "fileName": "run.sh" }, { "fileName": "RUN.sh" }]
            }]
        });
        let err = service().parse_import_structure(&structure).unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_ALRADY_EXIST_IN_MASTER_IN_CSAR");

        let structure = json!({
            "HEAT": [{ "fileName": "base.yaml" }],
            "HELM": [{ "fileName": "base.yaml", "type": "HEAT" }]
        });
        assert!(service().parse_import_structure(&structure).is_ok());
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let mut json = json!({ "fileName": "leaf.yaml" });
        for level in 0..=MAX_ARTIFACT_NESTING_DEPTH {
            json = json!({ "fileName": format!("nested_{level}.yaml"), "nested": [json] });
        }
        let err = service()
            .create_artifact_template_info("nested", &object(json), &[], None)
            .unwrap_err();
        assert!(matches!(err, CatalogException::ArtifactNestingTooDeep { .. }));
    }
}
