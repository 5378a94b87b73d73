use std::collections::BTreeMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::VspResult,
    model::{
        entity::{
            CandidateDataEntityTo, FilesDataStructure, ManifestContent,
            OrchestrationTemplateCandidateData, ValidationStructureList, Version, VspDetails,
        },
        vo::{AnalyzedZipHeatFiles, ErrorMessage, FileContentHandler, OnboardingType},
    },
};

/// Structuring of uploaded heat packages before they are processed.
#[async_trait]
pub trait CandidateService: Send + Sync {
    fn validate_non_empty_file_to_upload(
        &self,
        file_to_upload: Option<&[u8]>,
        file_suffix: &str,
    ) -> Option<ErrorMessage>;

    fn validate_raw_zip_data(
        &self,
        file_suffix: &str,
        uploaded_file_data: Option<&[u8]>,
    ) -> Option<ErrorMessage>;

    /// Groups the upload files into modules, nested templates, artifacts and
    /// unassigned files.
    ///
    /// The groups come from `manifest` when given, otherwise from the heat tree of
    /// the upload and the file naming convention. Structure warnings are added to
    /// the errors of `candidate`.
    fn structure(
        &self,
        candidate: &mut CandidateDataEntityTo,
        manifest: Option<&[u8]>,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> VspResult<FilesDataStructure>;

    fn create_candidate_data_entity(
        &self,
        candidate: &mut CandidateDataEntityTo,
        manifest: Option<&[u8]>,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> VspResult<OrchestrationTemplateCandidateData>;

    async fn update_candidate_upload_data(
        &self,
        vsp_id: Uuid,
        version: Version,
        upload_data: &OrchestrationTemplateCandidateData,
    ) -> VspResult<()>;

    /// `None` when nothing is stored or the stored structure is not valid.
    async fn get_file_data_structure(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<FilesDataStructure>>;

    async fn update_file_data_structure(
        &self,
        vsp_id: Uuid,
        version: Version,
        structure: &FilesDataStructure,
    ) -> VspResult<()>;

    async fn get_candidate(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>>;

    async fn get_candidate_info(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>>;

    fn create_manifest(&self, vsp: &VspDetails, structure: &FilesDataStructure)
        -> VspResult<String>;

    fn create_manifest_from_existing(
        &self,
        vsp: &VspDetails,
        structure: &FilesDataStructure,
        existing: &ManifestContent,
    ) -> VspResult<String>;

    fn create_manifest_from_zip(
        &self,
        vsp: &VspDetails,
        files: &FileContentHandler,
        analyzed: &AnalyzedZipHeatFiles,
    ) -> Option<ManifestContent>;

    /// Upload content with `manifest` in place of its manifest, `None` with an
    /// upload error when the content is unreadable.
    fn fetch_zip_file(
        &self,
        candidate: &OrchestrationTemplateCandidateData,
        manifest: &str,
        onboarding_type: OnboardingType,
        errors: &mut BTreeMap<String, Vec<ErrorMessage>>,
    ) -> Option<Vec<u8>>;

    fn replace_manifest_in_zip(
        &self,
        content: &[u8],
        manifest: &str,
        onboarding_type: OnboardingType,
    ) -> VspResult<Vec<u8>>;

    /// Repacks the zip, failing on entries that escape the archive root.
    fn get_zip_data(&self, content: &[u8]) -> VspResult<Vec<u8>>;

    fn validate_file_data_structure(
        &self,
        structure: &FilesDataStructure,
    ) -> Option<Vec<ErrorMessage>>;

    async fn delete_candidate(&self, vsp_id: Uuid, version: Version) -> VspResult<()>;

    async fn update_validation_data(
        &self,
        vsp_id: Uuid,
        version: Version,
        validation_data: &ValidationStructureList,
    ) -> VspResult<()>;
}
