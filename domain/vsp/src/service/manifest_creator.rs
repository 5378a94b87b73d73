use crate::model::{
    entity::{FilesDataStructure, ManifestContent, VspDetails},
    vo::{AnalyzedZipHeatFiles, FileContentHandler},
};

pub trait ManifestCreator: Send + Sync {
    /// Manifest listing modules, then nested templates, then every other file.
    fn create_manifest(&self, vsp: &VspDetails, structure: &FilesDataStructure) -> ManifestContent;

    /// As [`create_manifest`](Self::create_manifest), keeping the pm dictionaries of
    /// the existing manifest.
    fn create_manifest_from_existing(
        &self,
        vsp: &VspDetails,
        structure: &FilesDataStructure,
        existing: &ManifestContent,
    ) -> ManifestContent;

    /// Manifest guessed from the zip file names alone, `None` for an empty zip.
    fn create_manifest_from_zip(
        &self,
        vsp: &VspDetails,
        files: &FileContentHandler,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> Option<ManifestContent>;

    fn is_file_base_file(&self, file_name: &str) -> bool;
}
