use async_trait::async_trait;

use crate::{
    exception::CatalogResult,
    model::{
        entity::{CategoryDefinition, GroupingDefinition, SubCategoryDefinition},
        vo::category::CategoryNodeType,
    },
};

/// Storage of the category taxonomy.
///
/// Creating an element whose unique id is taken reports the matching
/// `...AlreadyExists`/`...Exists...` exception.
#[async_trait]
pub trait ElementRepo: Send + Sync {
    async fn create_category(
        &self,
        category: &CategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<CategoryDefinition>;

    async fn update_category(
        &self,
        category: &CategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<CategoryDefinition>;

    async fn create_sub_category(
        &self,
        category_id: &str,
        sub_category: &SubCategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<SubCategoryDefinition>;

    async fn update_sub_category(
        &self,
        sub_category_id: &str,
        sub_category: &SubCategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<SubCategoryDefinition>;

    async fn create_grouping(
        &self,
        sub_category_id: &str,
        grouping: &GroupingDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<GroupingDefinition>;

    async fn update_grouping(
        &self,
        grouping_id: &str,
        grouping: &GroupingDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<GroupingDefinition>;

    async fn get_all_categories(
        &self,
        node_type: CategoryNodeType,
    ) -> CatalogResult<Vec<CategoryDefinition>>;
}
