use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    exception::{CatalogException, CatalogResult},
    model::vo::artifact_type::ArtifactTypeEnum,
};

/// One artifact of a CSAR import structure and the artifacts nested under it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactTemplateInfo {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub file_name: String,
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub base: bool,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub related_artifacts_info: Vec<ArtifactTemplateInfo>,
}

impl ArtifactTemplateInfo {
    pub fn new(artifact_type: &str, file_name: &str) -> Self {
        Self {
            artifact_type: artifact_type.to_owned(),
            file_name: file_name.to_owned(),
            description: Some(file_name.to_owned()),
            ..Default::default()
        }
    }

    pub fn is_type(&self, artifact_type: ArtifactTypeEnum) -> bool {
        self.artifact_type.eq_ignore_ascii_case(artifact_type.value())
    }

    /// Env file name, absent when empty.
    pub fn env_name(&self) -> Option<&str> {
        self.env.as_deref().filter(|env| !env.is_empty())
    }

    /// The same file parsed twice must reference the same env file.
    ///
    /// Nested templates and heat artifacts are exempt.
    pub fn validate_env(&self, created: &[ArtifactTemplateInfo]) -> CatalogResult<()> {
        if created.is_empty()
            || self.is_type(ArtifactTypeEnum::HeatNested)
            || self.is_type(ArtifactTypeEnum::HeatArtifact)
        {
            return Ok(());
        }
        for existing in created {
            if self.file_name.eq_ignore_ascii_case(&existing.file_name) {
                let consistent = match (self.env_name(), existing.env_name()) {
                    (None, None) => true,
                    (Some(env), Some(existing_env)) => env.eq_ignore_ascii_case(existing_env),
                    _ => false,
                };
                if !consistent {
                    tracing::debug!(
                        "Artifact file {} of type {} already parsed with env {:?}",
                        self.file_name,
                        self.artifact_type,
                        existing.env_name()
                    );
                    return Err(CatalogException::ArtifactNotValidEnv {
                        file_name: self.file_name.to_owned(),
                        artifact_type: self.artifact_type.to_owned(),
                        env: self.env_name().unwrap_or_default().to_owned(),
                        existing_env: existing.env_name().unwrap_or_default().to_owned(),
                    });
                }
            }
            self.validate_env(&existing.related_artifacts_info)?;
        }
        Ok(())
    }

    /// Whether this template may be nested under `parent`.
    pub fn validate_parent_type(&self, parent: Option<&ArtifactTemplateInfo>) -> CatalogResult<()> {
        use ArtifactTypeEnum::*;

        let Some(parent) = parent else {
            return Ok(());
        };
        if self.is_type(HeatArtifact) {
            return Ok(());
        }
        let valid = if self.is_type(Heat) {
            false
        } else if (self.is_type(HeatNet) || self.is_type(HeatVol)) && !parent.is_type(Heat) {
            false
        } else if parent.is_type(HeatNested) {
            self.is_type(HeatNested)
        } else {
            true
        };
        if valid {
            Ok(())
        } else {
            Err(CatalogException::ArtifactNotValidInMaster {
                file_name: self.file_name.to_owned(),
                artifact_type: self.artifact_type.to_owned(),
                parent_file_name: parent.file_name.to_owned(),
                parent_type: parent.artifact_type.to_owned(),
            })
        }
    }

    /// Rejects a second template with the same type and file name, among the
    /// parent's children or, at top level, among the templates created so far.
    pub fn validate_is_already_exist(
        &self,
        created: &[ArtifactTemplateInfo],
        parent: Option<&ArtifactTemplateInfo>,
    ) -> CatalogResult<()> {
        let siblings = match parent {
            Some(parent) => parent.related_artifacts_info.as_slice(),
            None => created,
        };
        let duplicate = siblings.iter().find(|sibling| {
            sibling.artifact_type.eq_ignore_ascii_case(&self.artifact_type)
                && sibling.file_name.eq_ignore_ascii_case(&self.file_name)
        });
        match duplicate {
            None => Ok(()),
            Some(duplicate) => Err(CatalogException::ArtifactAlreadyExistInMasterInCsar {
                file_name: self.file_name.to_owned(),
                artifact_type: self.artifact_type.to_owned(),
                master: parent
                    .map(|p| p.file_name.to_owned())
                    .unwrap_or_else(|| duplicate.artifact_type.to_owned()),
            }),
        }
    }

    /// Base templates first.
    pub fn compare_by_group_name(a: &ArtifactTemplateInfo, b: &ArtifactTemplateInfo) -> Ordering {
        b.base.cmp(&a.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_env(artifact_type: &str, file_name: &str, env: &str) -> ArtifactTemplateInfo {
        ArtifactTemplateInfo {
            env: Some(env.to_owned()),
            ..ArtifactTemplateInfo::new(artifact_type, file_name)
        }
    }

    #[test]
    fn test_env_must_match_previous_parse() {
        let created = vec![with_env("HEAT", "base.yaml", "base.env")];
        assert!(with_env("HEAT", "BASE.yaml", "Base.ENV")
            .validate_env(&created)
            .is_ok());
        let err = with_env("HEAT", "base.yaml", "other.env")
            .validate_env(&created)
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_NOT_VALID_ENV");
        let err = ArtifactTemplateInfo::new("HEAT", "base.yaml")
            .validate_env(&created)
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_NOT_VALID_ENV");
        assert!(ArtifactTemplateInfo::new("HEAT_NESTED", "base.yaml")
            .validate_env(&created)
            .is_ok());
    }

    #[test]
    fn test_env_checked_against_nested_templates() {
        let mut master = ArtifactTemplateInfo::new("HEAT", "base.yaml");
        master
            .related_artifacts_info
            .push(with_env("HEAT_VOL", "vol.yaml", "vol.env"));
        let err = ArtifactTemplateInfo::new("HEAT_VOL", "vol.yaml")
            .validate_env(&[master])
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_NOT_VALID_ENV");
    }

    #[test]
    fn test_parent_type_rules() {
        let heat = ArtifactTemplateInfo::new("HEAT", "base.yaml");
        let nested = ArtifactTemplateInfo::new("HEAT_NESTED", "nested.yaml");
        let child = |t: &str| ArtifactTemplateInfo::new(t, "child.yaml");

        assert!(child("HEAT").validate_parent_type(None).is_ok());
        assert!(child("HEAT").validate_parent_type(Some(&heat)).is_err());
        assert!(child("HEAT_VOL").validate_parent_type(Some(&heat)).is_ok());
        assert!(child("HEAT_NET").validate_parent_type(Some(&nested)).is_err());
        assert!(child("HEAT_NESTED").validate_parent_type(Some(&nested)).is_ok());
        assert!(child("HEAT_ARTIFACT").validate_parent_type(Some(&nested)).is_ok());
        assert!(child("OTHER").validate_parent_type(Some(&nested)).is_err());
        assert!(child("OTHER").validate_parent_type(Some(&heat)).is_ok());
    }

    #[test]
    fn test_duplicate_sibling() {
        let mut master = ArtifactTemplateInfo::new("HEAT", "base.yaml");
        master
            .related_artifacts_info
            .push(ArtifactTemplateInfo::new("HEAT_ARTIFACT", "script.sh"));
        let err = ArtifactTemplateInfo::new("heat_artifact", "SCRIPT.sh")
            .validate_is_already_exist(&[], Some(&master))
            .unwrap_err();
        assert_eq!(err.action_status(), "ARTIFACT_ALRADY_EXIST_IN_MASTER_IN_CSAR");
        assert!(ArtifactTemplateInfo::new("HEAT_ARTIFACT", "script.sh")
            .validate_is_already_exist(&[master], None)
            .is_ok());
    }

    #[test]
    fn test_base_templates_sort_first() {
        let mut templates = vec![
            ArtifactTemplateInfo::new("HEAT", "module_1.yaml"),
            ArtifactTemplateInfo {
                base: true,
                ..ArtifactTemplateInfo::new("HEAT", "base.yaml")
            },
            ArtifactTemplateInfo::new("HEAT", "module_2.yaml"),
        ];
        templates.sort_by(ArtifactTemplateInfo::compare_by_group_name);
        let names = templates.iter().map(|t| t.file_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["base.yaml", "module_1.yaml", "module_2.yaml"]);
    }
}
