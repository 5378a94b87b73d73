use std::{
    collections::{BTreeMap, BTreeSet},
    io::{Cursor, Read, Write},
    sync::Arc,
};

use async_trait::async_trait;
use domain_vsp::{
    constant::{is_env_file, is_yaml_or_env_file, messages, MANIFEST_NAME, UPLOAD_FILE},
    exception::{VspException, VspResult},
    model::{
        entity::{
            CandidateDataEntityTo, FileData, FileDataType, FilesDataStructure, ManifestContent,
            Module, OrchestrationTemplateCandidateData, ValidationStructureList, Version,
            VspDetails,
        },
        vo::{
            add_structure_error, check_for_zip_slip, AnalyzedZipHeatFiles, ErrorMessage,
            FileContentHandler, HeatStructureTree, OnboardingType,
        },
    },
    repository::OrchestrationTemplateCandidateRepo,
    service::{CandidateService, ManifestCreator},
};
use typed_builder::TypedBuilder;
use uuid::Uuid;
use zip::{write::FileOptions, ZipArchive, ZipWriter};

use crate::validator;

#[derive(TypedBuilder)]
pub struct CandidateServiceImpl {
    manifest_creator: Arc<dyn ManifestCreator>,
    candidate_repository: Arc<dyn OrchestrationTemplateCandidateRepo>,
}

#[async_trait]
impl CandidateService for CandidateServiceImpl {
    fn validate_non_empty_file_to_upload(
        &self,
        file_to_upload: Option<&[u8]>,
        file_suffix: &str,
    ) -> Option<ErrorMessage> {
        match file_to_upload {
            Some(file) if !file.is_empty() => None,
            _ => Some(ErrorMessage::error(messages::no_file_uploaded(file_suffix))),
        }
    }

    fn validate_raw_zip_data(
        &self,
        file_suffix: &str,
        uploaded_file_data: Option<&[u8]>,
    ) -> Option<ErrorMessage> {
        uploaded_file_data
            .is_none()
            .then(|| ErrorMessage::error(messages::no_file_uploaded(file_suffix)))
    }

    fn structure(
        &self,
        candidate: &mut CandidateDataEntityTo,
        manifest: Option<&[u8]>,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> VspResult<FilesDataStructure> {
        let CandidateDataEntityTo {
            content_map,
            tree,
            errors,
            ..
        } = candidate;
        let mut structure = match manifest {
            Some(manifest) => {
                let mut structure = structure_from_manifest(manifest)?;
                balance_with_zip(&mut structure, content_map, analyzed);
                structure
            }
            None => {
                let mut builder = TreeStructureBuilder {
                    manifest_creator: self.manifest_creator.as_ref(),
                    structure: FilesDataStructure::default(),
                    used_env_files: BTreeSet::new(),
                    errors,
                };
                if let Some(tree) = tree.as_ref() {
                    builder.add_heats(tree, analyzed);
                    builder.add_other_resources(tree);
                }
                let mut structure = builder.structure;
                if let Some(zip_manifest) = content_map.file_content(MANIFEST_NAME) {
                    structure
                        .artifacts
                        .extend(structure_from_manifest(zip_manifest)?.artifacts);
                }
                if let Some(tree) = tree.as_ref() {
                    add_tree_artifacts(tree, &mut structure);
                }
                structure
            }
        };
        structure.reconcile(content_map.file_list());
        Ok(structure)
    }

    fn create_candidate_data_entity(
        &self,
        candidate: &mut CandidateDataEntityTo,
        manifest: Option<&[u8]>,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> VspResult<OrchestrationTemplateCandidateData> {
        let structure = self.structure(candidate, manifest, analyzed)?;
        Ok(OrchestrationTemplateCandidateData {
            content_data: candidate.uploaded_file_data.to_owned(),
            files_data_structure: serde_json::to_string(&structure).map_err(anyhow::Error::from)?,
            ..Default::default()
        })
    }

    async fn update_candidate_upload_data(
        &self,
        vsp_id: Uuid,
        version: Version,
        upload_data: &OrchestrationTemplateCandidateData,
    ) -> VspResult<()> {
        self.candidate_repository
            .update(vsp_id, version, upload_data)
            .await
    }

    async fn get_file_data_structure(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<FilesDataStructure>> {
        let structure = self
            .candidate_repository
            .get_structure(vsp_id, version)
            .await?;
        Ok(structure.and_then(|json| match serde_json::from_str(&json) {
            Ok(structure) => Some(structure),
            Err(e) => {
                tracing::debug!("Stored structure of vsp {vsp_id} {version} is not valid: {e}");
                None
            }
        }))
    }

    async fn update_file_data_structure(
        &self,
        vsp_id: Uuid,
        version: Version,
        structure: &FilesDataStructure,
    ) -> VspResult<()> {
        self.candidate_repository
            .update_structure(vsp_id, version, structure)
            .await
    }

    async fn get_candidate(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>> {
        self.candidate_repository.get(vsp_id, version).await
    }

    async fn get_candidate_info(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>> {
        self.candidate_repository.get_info(vsp_id, version).await
    }

    fn create_manifest(
        &self,
        vsp: &VspDetails,
        structure: &FilesDataStructure,
    ) -> VspResult<String> {
        self.manifest_creator
            .create_manifest(vsp, structure)
            .to_json()
            .map_err(|_| VspException::CreateManifestFromZip)
    }

    fn create_manifest_from_existing(
        &self,
        vsp: &VspDetails,
        structure: &FilesDataStructure,
        existing: &ManifestContent,
    ) -> VspResult<String> {
        self.manifest_creator
            .create_manifest_from_existing(vsp, structure, existing)
            .to_json()
            .map_err(|_| VspException::CreateManifestFromZip)
    }

    fn create_manifest_from_zip(
        &self,
        vsp: &VspDetails,
        files: &FileContentHandler,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> Option<ManifestContent> {
        self.manifest_creator
            .create_manifest_from_zip(vsp, files, analyzed)
    }

    fn fetch_zip_file(
        &self,
        candidate: &OrchestrationTemplateCandidateData,
        manifest: &str,
        onboarding_type: OnboardingType,
        errors: &mut BTreeMap<String, Vec<ErrorMessage>>,
    ) -> Option<Vec<u8>> {
        match self.replace_manifest_in_zip(&candidate.content_data, manifest, onboarding_type) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::error!("{}: {e}", messages::CANDIDATE_PROCESS_FAILED);
                add_structure_error(
                    errors,
                    UPLOAD_FILE,
                    ErrorMessage::error(messages::CANDIDATE_PROCESS_FAILED),
                );
                None
            }
        }
    }

    fn replace_manifest_in_zip(
        &self,
        content: &[u8],
        manifest: &str,
        onboarding_type: OnboardingType,
    ) -> VspResult<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut manifest_written = false;
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.name().eq_ignore_ascii_case(MANIFEST_NAME) {
                write_manifest(&mut zip, manifest, onboarding_type)?;
                manifest_written = true;
            } else {
                let name = entry.name().to_owned();
                copy_entry(&mut zip, &name, entry.is_dir(), &mut entry)?;
            }
        }
        if !manifest_written {
            write_manifest(&mut zip, manifest, onboarding_type)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    fn get_zip_data(&self, content: &[u8]) -> VspResult<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            check_for_zip_slip(entry.name(), entry.enclosed_name().is_some())?;
            let name = entry.name().to_owned();
            copy_entry(&mut zip, &name, entry.is_dir(), &mut entry)?;
        }
        Ok(zip.finish()?.into_inner())
    }

    fn validate_file_data_structure(
        &self,
        structure: &FilesDataStructure,
    ) -> Option<Vec<ErrorMessage>> {
        validator::validate_file_data_structure(structure)
    }

    async fn delete_candidate(&self, vsp_id: Uuid, version: Version) -> VspResult<()> {
        self.candidate_repository.delete(vsp_id, version).await
    }

    async fn update_validation_data(
        &self,
        vsp_id: Uuid,
        version: Version,
        validation_data: &ValidationStructureList,
    ) -> VspResult<()> {
        self.candidate_repository
            .update_validation_data(vsp_id, version, validation_data)
            .await
    }
}

/// Modules, unassigned files and artifacts as the manifest declares them.
fn structure_from_manifest(manifest: &[u8]) -> VspResult<FilesDataStructure> {
    let manifest = ManifestContent::from_slice(manifest)?;
    let mut structure = FilesDataStructure::default();
    for file_data in manifest.data {
        match file_data.file_type {
            Some(module_type @ (FileDataType::Heat | FileDataType::Helm)) => {
                let mut module = Module {
                    is_base: file_data.is_base,
                    module_type: Some(module_type),
                    ..Module::new(&file_data.file)
                };
                if module_type == FileDataType::Heat {
                    add_heat_dependencies(&mut module, file_data.children())?;
                }
                structure.modules.push(module);
            }
            file_type
                if is_yaml_or_env_file(&file_data.file)
                    && !FileDataType::is_artifact(file_type) =>
            {
                structure.unassigned.insert(file_data.file);
            }
            _ => {
                structure.artifacts.insert(file_data.file);
            }
        }
    }
    Ok(structure)
}

fn add_heat_dependencies(module: &mut Module, dependencies: &[FileData]) -> VspResult<()> {
    for dependency in dependencies {
        match dependency.file_type {
            Some(FileDataType::HeatEnv) => module.env = Some(dependency.file.to_owned()),
            Some(FileDataType::HeatVol) => {
                module.vol = Some(dependency.file.to_owned());
                if let Some(vol_env) = dependency.children().first() {
                    if vol_env.file_type != Some(FileDataType::HeatEnv) {
                        return Err(VspException::IllegalManifest {
                            file_name: dependency.file.to_owned(),
                        });
                    }
                    module.vol_env = Some(vol_env.file.to_owned());
                }
            }
            file_type => {
                return Err(VspException::FileTypeNotLegal {
                    file_name: dependency.file.to_owned(),
                    file_type: file_type
                        .map(|file_type| format!("{file_type:?}"))
                        .unwrap_or_default(),
                })
            }
        }
    }
    Ok(())
}

/// Aligns a manifest structure with the files that are really in the zip.
fn balance_with_zip(
    structure: &mut FilesDataStructure,
    files: &FileContentHandler,
    analyzed: &AnalyzedZipHeatFiles,
) {
    structure
        .nested
        .extend(analyzed.nested_files().iter().cloned());
    let modules = std::mem::take(&mut structure.modules);
    for mut module in modules {
        if !files.contains_file(&module.yaml) {
            tracing::debug!("Module {} is not in the zip", module.yaml);
            let satellites = module
                .satellites()
                .filter(|file| files.contains_file(file))
                .map(str::to_owned)
                .collect::<Vec<_>>();
            structure.unassigned.extend(satellites);
            continue;
        }
        if module
            .vol
            .as_deref()
            .is_some_and(|vol| !files.contains_file(vol))
        {
            module.vol = None;
            structure.unassigned.extend(module.vol_env.take());
        }
        if structure.nested.contains(&module.yaml) {
            let module_files = module.files().map(str::to_owned).collect::<Vec<_>>();
            structure.nested.extend(module_files);
            continue;
        }
        structure.modules.push(module);
    }
}

/// Flattens a heat tree into modules, nested templates and leftovers.
struct TreeStructureBuilder<'a> {
    manifest_creator: &'a dyn ManifestCreator,
    structure: FilesDataStructure,
    used_env_files: BTreeSet<String>,
    errors: &'a mut BTreeMap<String, Vec<ErrorMessage>>,
}

impl TreeStructureBuilder<'_> {
    fn add_heats(&mut self, tree: &HeatStructureTree, analyzed: &AnalyzedZipHeatFiles) {
        for heat in tree.heat.iter() {
            if self.manifest_creator.is_file_base_file(&heat.file_name)
                || analyzed.module_files().contains(&heat.file_name)
            {
                let module = self.single_heat(heat);
                self.structure.modules.push(module);
            } else {
                self.structure.unassigned.insert(heat.file_name.to_owned());
                add_nested(heat, &mut self.structure);
            }
            if let Some(env) = heat.env_file_name() {
                self.used_env_files.insert(env.to_owned());
            }
        }
    }

    fn single_heat(&mut self, heat: &HeatStructureTree) -> Module {
        let mut module = Module {
            is_base: heat.base,
            ..Module::new(&heat.file_name)
        };
        add_nested(heat, &mut self.structure);
        for (i, volume) in heat.volume.iter().enumerate() {
            if i > 0 {
                tracing::warn!("{} has more than one volume", heat.file_name);
                add_structure_error(
                    self.errors,
                    UPLOAD_FILE,
                    ErrorMessage::warning(messages::MORE_THAN_ONE_VOL_FOR_HEAT),
                );
                break;
            }
            add_tree_artifacts(volume, &mut self.structure);
            module.vol = Some(volume.file_name.to_owned());
            if let Some(vol_env) = volume.env.as_deref() {
                module.vol_env = Some(vol_env.file_name.to_owned());
                add_tree_artifacts(vol_env, &mut self.structure);
            }
            add_nested(volume, &mut self.structure);
        }
        if let Some(env) = heat.env.as_deref() {
            module.env = Some(env.file_name.to_owned());
            add_tree_artifacts(env, &mut self.structure);
        }
        module
    }

    fn add_other_resources(&mut self, tree: &HeatStructureTree) {
        for other in tree.other.iter() {
            let file_name = &other.file_name;
            if is_yaml_or_env_file(file_name) {
                if is_env_file(file_name) && self.used_env_files.contains(file_name) {
                    continue;
                }
                self.structure.unassigned.insert(file_name.to_owned());
            } else {
                self.structure.artifacts.insert(file_name.to_owned());
            }
            add_tree_artifacts(other, &mut self.structure);
        }
    }
}

fn add_tree_artifacts(tree: &HeatStructureTree, structure: &mut FilesDataStructure) {
    structure.artifacts.extend(
        tree.artifacts
            .iter()
            .map(|artifact| artifact.file_name.to_owned()),
    );
}

fn add_nested(heat: &HeatStructureTree, structure: &mut FilesDataStructure) {
    for nested in heat.nested.iter() {
        if !structure.nested.insert(nested.file_name.to_owned()) {
            continue;
        }
        add_tree_artifacts(nested, structure);
        add_nested(nested, structure);
    }
}

fn write_manifest(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    manifest: &str,
    onboarding_type: OnboardingType,
) -> VspResult<()> {
    if onboarding_type.keeps_own_manifest() {
        return Ok(());
    }
    zip.start_file::<_, ()>(MANIFEST_NAME, FileOptions::default())?;
    zip.write_all(manifest.as_bytes())?;
    Ok(())
}

fn copy_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    is_dir: bool,
    entry: &mut impl Read,
) -> VspResult<()> {
    if is_dir {
        zip.add_directory::<_, ()>(name, FileOptions::default())?;
    } else {
        zip.start_file::<_, ()>(name, FileOptions::default())?;
        std::io::copy(entry, zip)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use domain_vsp::{mock::MockOrchestrationTemplateCandidateRepo, model::vo::Artifact};
    use indoc::indoc;

    use super::*;
    use crate::ManifestCreatorNamingConventionImpl;

    fn service() -> CandidateServiceImpl {
        CandidateServiceImpl::builder()
            .manifest_creator(Arc::new(ManifestCreatorNamingConventionImpl))
            .candidate_repository(Arc::new(MockOrchestrationTemplateCandidateRepo::new()))
            .build()
    }

    fn candidate_of(names: &[&str], tree: Option<HeatStructureTree>) -> CandidateDataEntityTo {
        CandidateDataEntityTo {
            content_map: names
                .iter()
                .map(|name| (name.to_string(), vec![]))
                .collect(),
            tree,
            ..Default::default()
        }
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn assert_placed_once(structure: &FilesDataStructure, names: &[&str]) {
        for name in names.iter().filter(|name| **name != MANIFEST_NAME) {
            let placements = structure
                .modules
                .iter()
                .flat_map(Module::files)
                .filter(|file| file == name)
                .count()
                + [&structure.nested, &structure.artifacts, &structure.unassigned]
                    .iter()
                    .filter(|bucket| bucket.contains(*name))
                    .count();
            assert_eq!(placements, 1, "{name}");
        }
    }

    const MANIFEST: &str = indoc! {r#"
        {
          "name": "vFW",
          "data": [
            {
              "file": "base_vfw.yaml",
              "type": "HEAT",
              "isBase": true,
              "data": [
                { "file": "base_vfw.env", "type": "HEAT_ENV" },
                {
                  "file": "base_vfw_volume.yaml",
                  "type": "HEAT_VOL",
                  "data": [{ "file": "base_vfw_volume.env", "type": "HEAT_ENV" }]
                }
              ]
            },
            {
              "file": "missing.yaml",
              "type": "HEAT",
              "data": [{ "file": "missing.env", "type": "HEAT_ENV" }]
            },
            { "file": "nested_module.yaml", "type": "HEAT" },
            { "file": "lb_chart.tgz", "type": "HELM" },
            { "file": "stray.env", "type": "HEAT_ENV" },
            { "file": "script.sh", "type": "SHELL" }
          ]
        }
    "#};

    #[test]
    fn test_structure_from_manifest() {
        let names = [
            "MANIFEST.json",
            "base_vfw.yaml",
            "base_vfw.env",
            "base_vfw_volume.env",
            "missing.env",
            "nested_module.yaml",
            "lb_chart.tgz",
            "stray.env",
            "script.sh",
            "extra.txt",
        ];
        let mut candidate = candidate_of(&names, None);
        let mut analyzed = AnalyzedZipHeatFiles::default();
        analyzed.add_nested_file("nested_module.yaml");

        let structure = service()
            .structure(&mut candidate, Some(MANIFEST.as_bytes()), &analyzed)
            .unwrap();

        assert_eq!(structure.modules.len(), 2);
        let base = &structure.modules[0];
        assert_eq!(base.yaml, "base_vfw.yaml");
        assert_eq!(base.env.as_deref(), Some("base_vfw.env"));
        assert_eq!(base.vol, None);
        assert_eq!(base.vol_env, None);
        assert_eq!(base.is_base, Some(true));
        assert_eq!(structure.modules[1].module_type, Some(FileDataType::Helm));
        assert!(structure.nested.contains("nested_module.yaml"));
        assert!(structure.artifacts.contains("script.sh"));
        for unassigned in ["base_vfw_volume.env", "missing.env", "stray.env", "extra.txt"] {
            assert!(structure.unassigned.contains(unassigned), "{unassigned}");
        }
        assert_placed_once(&structure, &names);
    }

    #[test]
    fn test_illegal_manifest_chains() {
        let volume_without_env = indoc! {r#"
            {"data": [{"file": "a.yaml", "type": "HEAT", "data": [
              {"file": "a_volume.yaml", "type": "HEAT_VOL", "data": [{"file": "x.sh", "type": "SHELL"}]}
            ]}]}
        "#};
        let err = structure_from_manifest(volume_without_env.as_bytes()).unwrap_err();
        assert!(matches!(err, VspException::IllegalManifest { file_name } if file_name == "a_volume.yaml"));

        let shell_dependency = indoc! {r#"
            {"data": [{"file": "a.yaml", "type": "HEAT", "data": [{"file": "x.sh", "type": "SHELL"}]}]}
        "#};
        let err = structure_from_manifest(shell_dependency.as_bytes()).unwrap_err();
        assert!(matches!(err, VspException::FileTypeNotLegal { .. }));

        let err = structure_from_manifest(b"not json").unwrap_err();
        assert!(matches!(err, VspException::InvalidManifest { .. }));
    }

    #[test]
    fn test_structure_from_naming_convention() {
        let names = [
            "base_vfw.yaml",
            "base_vfw.env",
            "base_vfw_volume.yaml",
            "base_vfw_volume.env",
            "second_volume.yaml",
            "nested.yaml",
            "lonely.yaml",
            "lonely_nested.yaml",
            "other.env",
            "script.sh",
            "image.qcow2",
            "untracked.txt",
        ];
        let base = HeatStructureTree {
            base: Some(true),
            nested: vec![HeatStructureTree {
                artifacts: vec![Artifact {
                    file_name: "image.qcow2".to_owned(),
                }],
                ..HeatStructureTree::new("nested.yaml")
            }],
            volume: vec![
                HeatStructureTree::new("base_vfw_volume.yaml").with_env("base_vfw_volume.env"),
                HeatStructureTree::new("second_volume.yaml"),
            ],
            ..HeatStructureTree::new("base_vfw.yaml").with_env("base_vfw.env")
        };
        let lonely = HeatStructureTree {
            nested: vec![HeatStructureTree::new("lonely_nested.yaml")],
            ..HeatStructureTree::new("lonely.yaml")
        };
        let tree = HeatStructureTree {
            heat: vec![base, lonely],
            other: vec![
                HeatStructureTree::new("base_vfw.env"),
                HeatStructureTree::new("other.env"),
                HeatStructureTree::new("script.sh"),
            ],
            ..Default::default()
        };
        let mut candidate = candidate_of(&names, Some(tree));

        let structure = service()
            .structure(&mut candidate, None, &AnalyzedZipHeatFiles::default())
            .unwrap();

        assert_eq!(structure.modules.len(), 1);
        let module = &structure.modules[0];
        assert_eq!(module.vol.as_deref(), Some("base_vfw_volume.yaml"));
        assert_eq!(module.vol_env.as_deref(), Some("base_vfw_volume.env"));
        assert_eq!(module.env.as_deref(), Some("base_vfw.env"));
        assert_eq!(structure.nested, set(&["nested.yaml", "lonely_nested.yaml"]));
        assert_eq!(structure.artifacts, set(&["image.qcow2", "script.sh"]));
        assert_eq!(
            structure.unassigned,
            set(&["lonely.yaml", "other.env", "second_volume.yaml", "untracked.txt"])
        );
        assert_placed_once(&structure, &names);
        assert_eq!(
            candidate.errors[UPLOAD_FILE],
            vec![ErrorMessage::warning(messages::MORE_THAN_ONE_VOL_FOR_HEAT)]
        );
    }

    #[test]
    fn test_analyzed_module_files_become_modules() {
        let tree = HeatStructureTree {
            heat: vec![HeatStructureTree::new("lb.yaml").with_env("lb.env")],
            ..Default::default()
        };
        let mut candidate = candidate_of(&["lb.yaml", "lb.env"], Some(tree));
        let mut analyzed = AnalyzedZipHeatFiles::default();
        analyzed.add_module_file("lb.yaml");

        let structure = service()
            .structure(&mut candidate, None, &analyzed)
            .unwrap();
        assert_eq!(structure.modules[0].yaml, "lb.yaml");
        assert_eq!(structure.modules[0].env.as_deref(), Some("lb.env"));
        assert!(structure.unassigned.is_empty());
    }

    #[test]
    fn test_zip_manifest_contributes_artifacts() {
        let zip_manifest = r#"{"data": [{"file": "readme.txt", "type": "OTHER"}]}"#;
        let mut candidate = candidate_of(&["MANIFEST.json", "readme.txt"], None);
        candidate
            .content_map
            .add_file(MANIFEST_NAME, zip_manifest.as_bytes().to_vec());

        let structure = service()
            .structure(&mut candidate, None, &AnalyzedZipHeatFiles::default())
            .unwrap();
        assert_eq!(structure.artifacts, set(&["readme.txt"]));
        assert!(structure.unassigned.is_empty());
    }

    #[test]
    fn test_create_candidate_data_entity() {
        let mut candidate = candidate_of(&["base_a.yaml"], None);
        candidate.uploaded_file_data = b"zip".to_vec();
        let data = service()
            .create_candidate_data_entity(&mut candidate, None, &AnalyzedZipHeatFiles::default())
            .unwrap();
        assert_eq!(data.content_data, b"zip");
        let structure: FilesDataStructure =
            serde_json::from_str(&data.files_data_structure).unwrap();
        assert_eq!(structure.unassigned, set(&["base_a.yaml"]));
    }

    #[test]
    fn test_upload_validation() {
        let service = service();
        assert!(service
            .validate_non_empty_file_to_upload(Some(b"zip"), "zip")
            .is_none());
        let error = service
            .validate_non_empty_file_to_upload(Some(b""), "zip")
            .unwrap();
        assert_eq!(error, ErrorMessage::error(messages::no_file_uploaded("zip")));
        assert!(service.validate_non_empty_file_to_upload(None, "zip").is_some());
        assert!(service.validate_raw_zip_data("csar", Some(b"")).is_none());
        assert!(service.validate_raw_zip_data("csar", None).is_some());
    }

    fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file::<_, ()>(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_replace_manifest_in_zip() {
        let content = zip_of(&[("manifest.json", "old"), ("base.yaml", "heat")]);
        let service = service();

        let replaced = service
            .replace_manifest_in_zip(&content, "new", OnboardingType::Zip)
            .unwrap();
        let files = FileContentHandler::from_zip(&replaced).unwrap();
        assert_eq!(files.file_content(MANIFEST_NAME), Some("new".as_bytes()));
        assert_eq!(files.file_content("base.yaml"), Some("heat".as_bytes()));
        assert!(!files.contains_file("manifest.json"));

        let appended = service
            .replace_manifest_in_zip(&zip_of(&[("base.yaml", "heat")]), "new", OnboardingType::Zip)
            .unwrap();
        let files = FileContentHandler::from_zip(&appended).unwrap();
        assert_eq!(files.file_content(MANIFEST_NAME), Some("new".as_bytes()));

        let csar = service
            .replace_manifest_in_zip(&content, "new", OnboardingType::Csar)
            .unwrap();
        let files = FileContentHandler::from_zip(&csar).unwrap();
        assert_eq!(files.file_list().collect::<Vec<_>>(), vec!["base.yaml"]);
    }

    #[test]
    fn test_fetch_zip_file_reports_unreadable_content() {
        let candidate = OrchestrationTemplateCandidateData {
            content_data: b"not a zip".to_vec(),
            ..Default::default()
        };
        let mut errors = BTreeMap::new();
        let fetched = service().fetch_zip_file(&candidate, "{}", OnboardingType::Zip, &mut errors);
        assert!(fetched.is_none());
        assert_eq!(
            errors[UPLOAD_FILE],
            vec![ErrorMessage::error(messages::CANDIDATE_PROCESS_FAILED)]
        );
    }

    #[test]
    fn test_get_zip_data() {
        let service = service();
        let content = zip_of(&[("base.yaml", "heat")]);
        let repacked = service.get_zip_data(&content).unwrap();
        assert_eq!(
            FileContentHandler::from_zip(&repacked).unwrap().file_content("base.yaml"),
            Some("heat".as_bytes())
        );

        let slip = zip_of(&[("../outside.yaml", "heat")]);
        assert!(matches!(
            service.get_zip_data(&slip).unwrap_err(),
            VspException::ZipSlip { .. }
        ));
    }
}
