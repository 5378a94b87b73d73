mod candidate;
mod file_data;
mod files_data_structure;
mod manifest;
mod vsp;

#[rustfmt::skip]
pub use {
    candidate::{CandidateDataEntityTo, OrchestrationTemplateCandidateData, ValidationStructureList},
    file_data::{FileData, FileDataType},
    files_data_structure::{FilesDataStructure, Module},
    manifest::ManifestContent,
    vsp::{Version, VspDetails},
};
