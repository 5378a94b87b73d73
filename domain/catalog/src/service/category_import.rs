use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    exception::CatalogResult,
    model::{entity::CategoryDefinition, vo::component_type::ComponentType},
};

#[async_trait]
pub trait CategoryImportService: Send + Sync {
    /// Creates or updates every category declared in the YAML document.
    async fn create_categories(
        &self,
        categories_yaml: &str,
    ) -> CatalogResult<HashMap<ComponentType, Vec<CategoryDefinition>>>;
}
