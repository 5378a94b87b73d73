use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    exception::VspResult,
    model::entity::{
        FilesDataStructure, OrchestrationTemplateCandidateData, ValidationStructureList, Version,
    },
};

/// Storage of the pending orchestration template of each vsp version.
#[async_trait]
pub trait OrchestrationTemplateCandidateRepo: Send + Sync {
    async fn get(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>>;

    /// Same as [`get`](Self::get) without the uploaded content.
    async fn get_info(
        &self,
        vsp_id: Uuid,
        version: Version,
    ) -> VspResult<Option<OrchestrationTemplateCandidateData>>;

    async fn update(
        &self,
        vsp_id: Uuid,
        version: Version,
        candidate: &OrchestrationTemplateCandidateData,
    ) -> VspResult<()>;

    async fn get_structure(&self, vsp_id: Uuid, version: Version) -> VspResult<Option<String>>;

    async fn update_structure(
        &self,
        vsp_id: Uuid,
        version: Version,
        structure: &FilesDataStructure,
    ) -> VspResult<()>;

    async fn update_validation_data(
        &self,
        vsp_id: Uuid,
        version: Version,
        validation_data: &ValidationStructureList,
    ) -> VspResult<()>;

    async fn delete(&self, vsp_id: Uuid, version: Version) -> VspResult<()>;
}
