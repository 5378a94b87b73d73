use once_cell::sync::Lazy;
use regex::Regex;

pub const MANIFEST_NAME: &str = "MANIFEST.json";
/// Error map key of problems found in the uploaded archive itself.
pub const UPLOAD_FILE: &str = "uploadFile";

pub const ENV_FILE_EXTENSION: &str = ".env";
pub const VOL_FILE_NAME_SUFFIX: &str = "_volume";
pub const YAML_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Base templates are named `base_*.yaml`, optionally with a prefix ending in `_`.
pub static BASE_HEAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*_)?base_.*\.(yaml|yml)$").unwrap());

pub fn is_yaml_file(file_name: &str) -> bool {
    YAML_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

pub fn is_env_file(file_name: &str) -> bool {
    file_name.ends_with(ENV_FILE_EXTENSION)
}

pub fn is_yaml_or_env_file(file_name: &str) -> bool {
    is_yaml_file(file_name) || is_env_file(file_name)
}

pub fn is_volume_file(file_name: &str) -> bool {
    YAML_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(&format!("{VOL_FILE_NAME_SUFFIX}{ext}")))
}

/// `name.ext` to `name<suffix>`, `None` without an extension.
pub fn replace_extension(file_name: &str, suffix: &str) -> Option<String> {
    let (stem, _) = file_name.rsplit_once('.')?;
    Some(format!("{stem}{suffix}"))
}

pub mod messages {
    pub const MORE_THAN_ONE_VOL_FOR_HEAT: &str =
        "heat contains more then one vol. selecting only first vol";
    pub const CANDIDATE_PROCESS_FAILED: &str = "Candidate zip file process failed";
    pub const MODULE_WITHOUT_YAML: &str = "module in manifest does not have a yaml file";

    pub fn no_file_uploaded(file_suffix: &str) -> String {
        format!("no {file_suffix} file was uploaded or file doesn't exist")
    }

    pub fn vol_env_without_vol(module_yaml: &str) -> String {
        format!("module {module_yaml} has a volume env file without a volume file")
    }

    pub fn file_in_more_than_one_place(file_name: &str) -> String {
        format!("file {file_name} is placed in more than one place")
    }
}
