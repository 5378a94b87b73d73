use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use domain_catalog::{
    exception::{CatalogException, CatalogResult},
    model::{
        entity::{CategoryDefinition, GroupingDefinition, SubCategoryDefinition},
        vo::category::CategoryNodeType,
    },
    repository::ElementRepo,
};

/// Category taxonomy kept in memory, each element under its unique id with the
/// id of its parent.
#[derive(Default)]
pub struct MemoryElementRepo {
    categories: DashMap<String, (CategoryNodeType, CategoryDefinition)>,
    sub_categories: DashMap<String, (String, SubCategoryDefinition)>,
    groupings: DashMap<String, (String, GroupingDefinition)>,
}

fn unique_id(id: &Option<String>, name: &str) -> CatalogResult<String> {
    id.to_owned()
        .ok_or_else(|| anyhow::anyhow!("Element {name} has no unique id").into())
}

fn not_found(id: &str) -> CatalogException {
    CatalogException::ElementNotFound { id: id.to_owned() }
}

#[async_trait]
impl ElementRepo for MemoryElementRepo {
    async fn create_category(
        &self,
        category: &CategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<CategoryDefinition> {
        let id = unique_id(&category.unique_id, &category.name)?;
        match self.categories.entry(id) {
            Entry::Occupied(_) => Err(CatalogException::CategoryAlreadyExists {
                name: category.name.to_owned(),
            }),
            Entry::Vacant(entry) => {
                entry.insert((node_type, category.clone()));
                Ok(category.clone())
            }
        }
    }

    async fn update_category(
        &self,
        category: &CategoryDefinition,
        node_type: CategoryNodeType,
    ) -> CatalogResult<CategoryDefinition> {
        let id = unique_id(&category.unique_id, &category.name)?;
        let mut stored = self.categories.get_mut(&id).ok_or_else(|| not_found(&id))?;
        *stored = (node_type, category.clone());
        Ok(category.clone())
    }

    async fn create_sub_category(
        &self,
        category_id: &str,
        sub_category: &SubCategoryDefinition,
        _node_type: CategoryNodeType,
    ) -> CatalogResult<SubCategoryDefinition> {
        if !self.categories.contains_key(category_id) {
            return Err(not_found(category_id));
        }
        let id = unique_id(&sub_category.unique_id, &sub_category.name)?;
        match self.sub_categories.entry(id) {
            Entry::Occupied(_) => Err(CatalogException::SubCategoryExistsForCategory {
                name: sub_category.name.to_owned(),
                category: category_id.to_owned(),
            }),
            Entry::Vacant(entry) => {
                entry.insert((category_id.to_owned(), sub_category.clone()));
                Ok(sub_category.clone())
            }
        }
    }

    async fn update_sub_category(
        &self,
        sub_category_id: &str,
        sub_category: &SubCategoryDefinition,
        _node_type: CategoryNodeType,
    ) -> CatalogResult<SubCategoryDefinition> {
        let mut stored = self
            .sub_categories
            .get_mut(sub_category_id)
            .ok_or_else(|| not_found(sub_category_id))?;
        stored.1 = sub_category.clone();
        Ok(sub_category.clone())
    }

    async fn create_grouping(
        &self,
        sub_category_id: &str,
        grouping: &GroupingDefinition,
        _node_type: CategoryNodeType,
    ) -> CatalogResult<GroupingDefinition> {
        if !self.sub_categories.contains_key(sub_category_id) {
            return Err(not_found(sub_category_id));
        }
        let id = unique_id(&grouping.unique_id, &grouping.name)?;
        match self.groupings.entry(id) {
            Entry::Occupied(_) => Err(CatalogException::GroupingExistsForSubCategory {
                name: grouping.name.to_owned(),
                sub_category: sub_category_id.to_owned(),
            }),
            Entry::Vacant(entry) => {
                entry.insert((sub_category_id.to_owned(), grouping.clone()));
                Ok(grouping.clone())
            }
        }
    }

    async fn update_grouping(
        &self,
        grouping_id: &str,
        grouping: &GroupingDefinition,
        _node_type: CategoryNodeType,
    ) -> CatalogResult<GroupingDefinition> {
        let mut stored = self
            .groupings
            .get_mut(grouping_id)
            .ok_or_else(|| not_found(grouping_id))?;
        stored.1 = grouping.clone();
        Ok(grouping.clone())
    }

    async fn get_all_categories(
        &self,
        node_type: CategoryNodeType,
    ) -> CatalogResult<Vec<CategoryDefinition>> {
        let mut categories = self
            .categories
            .iter()
            .filter(|entry| entry.value().0 == node_type)
            .map(|entry| {
                let mut category = entry.value().1.clone();
                category.subcategories = self.sub_categories_of(entry.key());
                category
            })
            .collect::<Vec<_>>();
        categories.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        Ok(categories)
    }
}

impl MemoryElementRepo {
    fn sub_categories_of(&self, category_id: &str) -> Vec<SubCategoryDefinition> {
        let mut sub_categories = self
            .sub_categories
            .iter()
            .filter(|entry| entry.value().0 == category_id)
            .map(|entry| {
                let mut sub_category = entry.value().1.clone();
                sub_category.groupings = self
                    .groupings
                    .iter()
                    .filter(|grouping| grouping.value().0 == *entry.key())
                    .map(|grouping| grouping.value().1.clone())
                    .collect();
                sub_category
                    .groupings
                    .sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
                sub_category
            })
            .collect::<Vec<_>>();
        sub_categories.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        sub_categories
    }
}
