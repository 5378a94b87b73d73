use std::collections::BTreeSet;

use domain_vsp::{
    constant::{
        is_env_file, is_volume_file, is_yaml_file, replace_extension, BASE_HEAT_REGEX,
        ENV_FILE_EXTENSION, MANIFEST_NAME, VOL_FILE_NAME_SUFFIX, YAML_EXTENSIONS,
    },
    model::{
        entity::{FileData, FileDataType, FilesDataStructure, ManifestContent, Module, VspDetails},
        vo::{AnalyzedZipHeatFiles, FileContentHandler},
    },
    service::ManifestCreator,
};

const CLOUD_SPECIFIC_FIXED_KEY_WORD: &str = "cloudtech";
/// Technology, then sub type. A cloud specific artifact names one of each.
const CLOUD_SPECIFIC_KEY_WORDS: [&[&str]; 2] =
    [&["k8s", "azure", "aws"], &["charts", "day0", "configtemplate"]];
const CONTROLLER_BLUEPRINT_ARCHIVE_FIXED_KEY_WORD: &str = "CBA";
const HELM_KEY_WORD: &str = "HELM";

/// Builds manifests from file names and file groups.
pub struct ManifestCreatorNamingConventionImpl;

impl ManifestCreator for ManifestCreatorNamingConventionImpl {
    fn create_manifest(&self, vsp: &VspDetails, structure: &FilesDataStructure) -> ManifestContent {
        manifest_of(vsp, file_data_list(structure, None))
    }

    fn create_manifest_from_existing(
        &self,
        vsp: &VspDetails,
        structure: &FilesDataStructure,
        existing: &ManifestContent,
    ) -> ManifestContent {
        manifest_of(vsp, file_data_list(structure, Some(existing)))
    }

    fn create_manifest_from_zip(
        &self,
        vsp: &VspDetails,
        files: &FileContentHandler,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> Option<ManifestContent> {
        tracing::info!("Trying to generate manifest");
        if files.is_empty() {
            tracing::info!("The zip holds no files, no manifest is created");
            return None;
        }
        let file_names = files
            .file_list()
            .filter(|file| *file != MANIFEST_NAME)
            .collect::<BTreeSet<_>>();
        let mut processed = BTreeSet::<String>::new();
        let mut data = vec![];
        for &file_name in file_names.iter() {
            if processed.contains(file_name) {
                continue;
            }
            let file_data = if self.is_file_base_file(file_name) {
                module_file_data(file_name, true, &file_names, &mut processed, &mut data)
            } else if is_yaml_file(file_name) && !analyzed.is_not_eligible_for_module(file_name) {
                module_file_data(file_name, false, &file_names, &mut processed, &mut data)
            } else if is_yaml_file(file_name) {
                FileData::new(file_name, FileDataType::Heat)
            } else if is_env_file(file_name) {
                FileData::new(file_name, FileDataType::HeatEnv)
            } else {
                FileData::new(file_name, FileDataType::Other)
            };
            data.push(file_data);
        }
        Some(manifest_of(vsp, data))
    }

    fn is_file_base_file(&self, file_name: &str) -> bool {
        BASE_HEAT_REGEX.is_match(file_name) && !is_volume_file(file_name)
    }
}

fn manifest_of(vsp: &VspDetails, data: Vec<FileData>) -> ManifestContent {
    ManifestContent {
        name: Some(vsp.name.to_owned()),
        description: vsp.description.to_owned(),
        version: vsp.version.map(|version| version.to_string()),
        data,
    }
}

fn file_data_list(
    structure: &FilesDataStructure,
    existing: Option<&ManifestContent>,
) -> Vec<FileData> {
    let modules = structure.modules.iter().map(module_data);
    let nested = structure
        .nested
        .iter()
        .map(|nested| FileData::new(nested, FileDataType::Heat));
    let artifacts = structure
        .artifacts
        .union(&structure.unassigned)
        .map(|artifact| FileData::new(artifact, artifact_type(artifact, existing)));
    modules.chain(nested).chain(artifacts).collect()
}

fn module_data(module: &Module) -> FileData {
    let mut file_data = FileData {
        is_base: module.is_base,
        ..FileData::new(
            &module.yaml,
            module.module_type.unwrap_or(FileDataType::Heat),
        )
    };
    if let Some(env) = module.env.as_deref() {
        file_data.add_file_data(FileData::new(env, FileDataType::HeatEnv));
    }
    if let Some(vol) = module.vol.as_deref() {
        let mut vol_data = FileData::new(vol, FileDataType::HeatVol);
        if let Some(vol_env) = module.vol_env.as_deref() {
            vol_data.add_file_data(FileData::new(vol_env, FileDataType::HeatEnv));
        }
        file_data.add_file_data(vol_data);
    }
    file_data
}

fn artifact_type(artifact: &str, existing: Option<&ManifestContent>) -> FileDataType {
    let upper = artifact.to_uppercase();
    if is_cloud_specific_artifact(artifact) {
        FileDataType::CloudTechnologySpecificArtifact
    } else if upper.contains(CONTROLLER_BLUEPRINT_ARCHIVE_FIXED_KEY_WORD) {
        FileDataType::ControllerBlueprintArchive
    } else if upper.contains(HELM_KEY_WORD) {
        FileDataType::Helm
    } else if existing.is_some_and(|manifest| is_pm_dictionary(artifact, manifest)) {
        FileDataType::PmDictionary
    } else {
        FileDataType::Other
    }
}

fn is_cloud_specific_artifact(artifact: &str) -> bool {
    artifact.contains(CLOUD_SPECIFIC_FIXED_KEY_WORD)
        && CLOUD_SPECIFIC_KEY_WORDS
            .iter()
            .all(|key_words| key_words.iter().any(|key_word| artifact.contains(key_word)))
}

fn is_pm_dictionary(artifact: &str, manifest: &ManifestContent) -> bool {
    manifest
        .data
        .iter()
        .any(|data| data.file_type == Some(FileDataType::PmDictionary) && data.file == artifact)
}

/// Module entry with its volume, volume env and env when the zip has them.
///
/// Related files are marked processed and pulled out of `data` if an earlier
/// iteration listed them on their own.
fn module_file_data(
    file_name: &str,
    is_base: bool,
    file_names: &BTreeSet<&str>,
    processed: &mut BTreeSet<String>,
    data: &mut Vec<FileData>,
) -> FileData {
    let mut claim = |file: &str| {
        processed.insert(file.to_owned());
        data.retain(|listed| listed.file != file);
    };
    let mut module = FileData {
        is_base: Some(is_base),
        ..FileData::new(file_name, FileDataType::Heat)
    };
    if let Some(vol) = related_volume(file_name, file_names) {
        claim(&vol);
        let mut vol_data = FileData::new(&vol, FileDataType::HeatVol);
        if let Some(vol_env) = related_env(&vol, file_names) {
            claim(&vol_env);
            vol_data.add_file_data(FileData::new(&vol_env, FileDataType::HeatEnv));
        }
        module.add_file_data(vol_data);
    }
    if let Some(env) = related_env(file_name, file_names) {
        claim(&env);
        module.add_file_data(FileData::new(&env, FileDataType::HeatEnv));
    }
    module
}

fn related_env(file_name: &str, file_names: &BTreeSet<&str>) -> Option<String> {
    replace_extension(file_name, ENV_FILE_EXTENSION).filter(|env| file_names.contains(env.as_str()))
}

fn related_volume(file_name: &str, file_names: &BTreeSet<&str>) -> Option<String> {
    YAML_EXTENSIONS
        .iter()
        .filter_map(|ext| replace_extension(file_name, &format!("{VOL_FILE_NAME_SUFFIX}{ext}")))
        .find(|vol| file_names.contains(vol.as_str()))
}
