use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::VspResult,
    model::entity::{
        FilesDataStructure, OrchestrationTemplateCandidateData, ValidationStructureList, Version,
    },
    repository::OrchestrationTemplateCandidateRepo,
};

mock! {
    pub OrchestrationTemplateCandidateRepo {}
    #[async_trait]
    impl OrchestrationTemplateCandidateRepo for OrchestrationTemplateCandidateRepo {
        async fn get(
            &self,
            vsp_id: Uuid,
            version: Version,
        ) -> VspResult<Option<OrchestrationTemplateCandidateData>>;
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
}
