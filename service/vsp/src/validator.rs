use std::collections::BTreeMap;

use domain_vsp::{
    constant::messages,
    model::{entity::FilesDataStructure, vo::ErrorMessage},
};

/// Errors of a user edited structure, `None` when it is consistent.
pub(crate) fn validate_file_data_structure(
    structure: &FilesDataStructure,
) -> Option<Vec<ErrorMessage>> {
    let mut errors = vec![];
    let mut placements = BTreeMap::<&str, usize>::new();
    for module in structure.modules.iter() {
        if module.yaml.trim().is_empty() {
            errors.push(ErrorMessage::error(messages::MODULE_WITHOUT_YAML));
        }
        if module.vol.is_none() && module.vol_env.is_some() {
            errors.push(ErrorMessage::error(messages::vol_env_without_vol(&module.yaml)));
        }
        for file in module.files().filter(|file| !file.is_empty()) {
            *placements.entry(file).or_default() += 1;
        }
    }
    for file in structure
        .nested
        .iter()
        .chain(structure.artifacts.iter())
        .chain(structure.unassigned.iter())
    {
        *placements.entry(file).or_default() += 1;
    }
    errors.extend(
        placements
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(file, _)| ErrorMessage::error(messages::file_in_more_than_one_place(file))),
    );
    if errors.is_empty() {
        None
    } else {
        tracing::debug!("File data structure has {} errors", errors.len());
        Some(errors)
    }
}
