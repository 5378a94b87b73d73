mod analyzed_zip_heat_files;
mod error_message;
mod file_content_handler;
mod heat_structure_tree;
mod onboarding_type;

#[rustfmt::skip]
pub use {
    analyzed_zip_heat_files::AnalyzedZipHeatFiles,
    error_message::{add_structure_error, ErrorLevel, ErrorMessage},
    file_content_handler::{check_for_zip_slip, FileContentHandler},
    heat_structure_tree::{Artifact, HeatStructureTree},
    onboarding_type::OnboardingType,
};
