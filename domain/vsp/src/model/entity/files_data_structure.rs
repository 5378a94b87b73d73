use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::FileDataType;
use crate::constant::MANIFEST_NAME;

/// One deployable heat unit: a template and its env, volume and volume env files.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub yaml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_base: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<FileDataType>,
}

impl Module {
    pub fn new(yaml: &str) -> Self {
        Self {
            yaml: yaml.to_owned(),
            ..Default::default()
        }
    }

    /// The yaml first, then env, vol and vol env when present.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.yaml.as_str()).chain(
            [&self.env, &self.vol, &self.vol_env]
                .into_iter()
                .filter_map(|file| file.as_deref()),
        )
    }

    /// Satellite files, without the yaml.
    pub fn satellites(&self) -> impl Iterator<Item = &str> {
        self.files().skip(1)
    }
}

/// How the files of an uploaded package are grouped.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesDataStructure {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub nested: BTreeSet<String>,
    #[serde(default)]
    pub artifacts: BTreeSet<String>,
    #[serde(default)]
    pub unassigned: BTreeSet<String>,
}

impl FilesDataStructure {
    /// Every file name referenced by any bucket.
    pub fn file_names(&self) -> BTreeSet<&str> {
        self.modules
            .iter()
            .flat_map(Module::files)
            .chain(self.nested.iter().map(String::as_str))
            .chain(self.artifacts.iter().map(String::as_str))
            .chain(self.unassigned.iter().map(String::as_str))
            .collect()
    }

    /// Makes every zip file name, the manifest excepted, appear in exactly one place.
    ///
    /// Names missing from the zip are dropped. A name claimed twice stays in the
    /// first place in the order modules, nested, artifacts, unassigned. A module
    /// without its yaml is dropped and a volume env without its volume is demoted.
    /// Unclaimed zip files end up unassigned.
    pub fn reconcile<'a>(&mut self, zip_files: impl IntoIterator<Item = &'a str>) {
        let zip_files = zip_files
            .into_iter()
            .filter(|file| *file != MANIFEST_NAME)
            .collect::<BTreeSet<_>>();
        let mut claimed = BTreeSet::new();
        let mut claim = |file: &str| zip_files.contains(file) && claimed.insert(file.to_owned());

        self.modules.retain_mut(|module| {
            if !claim(&module.yaml) {
                tracing::debug!("Dropping module {} missing from the zip", module.yaml);
                return false;
            }
            let yaml = module.yaml.as_str();
            for file in [&mut module.env, &mut module.vol] {
                if let Some(name) = file.as_deref().filter(|name| !claim(name)) {
                    tracing::debug!("Dropping {name} of module {yaml}, not in the zip or already placed");
                    *file = None;
                }
            }
            if let Some(name) = module.vol_env.to_owned() {
                let reason = if module.vol.is_none() {
                    Some("the module has no volume")
                } else if !claim(&name) {
                    Some("not in the zip or already placed")
                } else {
                    None
                };
                if let Some(reason) = reason {
                    tracing::debug!("Dropping {name} of module {yaml}, {reason}");
                    module.vol_env = None;
                }
            }
            true
        });
        for bucket in [&mut self.nested, &mut self.artifacts, &mut self.unassigned] {
            bucket.retain(|file| claim(file));
        }
        let unclaimed = zip_files
            .iter()
            .filter(|file| !claimed.contains(**file))
            .map(|file| file.to_string())
            .collect::<Vec<_>>();
        self.unassigned.extend(unclaimed);
    }
}
