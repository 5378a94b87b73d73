use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use domain_catalog::{
    exception::{CatalogException, CatalogResult},
    model::{
        entity::{
            CategoryDefinition, GroupingDefinition, MetadataKeyDefinition, SubCategoryDefinition,
        },
        vo::{
            category::{
                build_category_uid, build_grouping_uid, build_sub_category_uid,
                normalize_category_name, CategoryNodeType,
            },
            component_type::ComponentType,
        },
    },
    repository::ElementRepo,
    service::CategoryImportService,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_yaml::{Mapping, Value};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct CategoryImportServiceImpl {
    element_repository: Arc<dyn ElementRepo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryYaml {
    name: String,
    #[serde(default)]
    icons: Option<Vec<String>>,
    #[serde(default)]
    use_service_substitution_for_nested_services: Option<bool>,
    #[serde(default)]
    metadata_keys: Value,
    #[serde(default)]
    subcategories: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubCategoryYaml {
    name: String,
    #[serde(default)]
    icons: Option<Vec<String>>,
    #[serde(default)]
    metadata_keys: Value,
    #[serde(default)]
    groupings: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupingYaml {
    name: String,
    #[serde(default)]
    metadata_keys: Value,
}

impl CategoryImportServiceImpl {
    async fn upsert_category(
        &self,
        component_type: ComponentType,
        mut category: CategoryDefinition,
    ) -> CatalogResult<CategoryDefinition> {
        let node_type = CategoryNodeType::category_of(component_type);
        let subcategories = std::mem::take(&mut category.subcategories);
        let category_id = build_category_uid(&category.normalized_name, node_type);
        category.unique_id = Some(category_id.to_owned());

        tracing::debug!("Creating category {}", category.name);
        let created = match self.element_repository.create_category(&category, node_type).await {
            Err(CatalogException::CategoryAlreadyExists { .. }) => {
                tracing::debug!("Category {} already exists, updating", category.name);
                self.element_repository.update_category(&category, node_type).await
            }
            other => other,
        };
        let mut created = created.map_err(|e| {
            tracing::debug!("Failed to create {component_type} category {}: {e}", category.name);
            e
        })?;
        let category_id = created.unique_id.to_owned().unwrap_or(category_id);

        if subcategories.is_empty() {
            return Ok(created);
        }
        let sub_node_type = CategoryNodeType::sub_category_of(component_type).ok_or_else(|| {
            invalid(format!("{component_type} categories have no subcategories"))
        })?;
        for sub_category in subcategories {
            let sub_category = self
                .upsert_sub_category(component_type, &category_id, sub_node_type, sub_category)
                .await?;
            created.subcategories.push(sub_category);
        }
        Ok(created)
    }

    async fn upsert_sub_category(
        &self,
        component_type: ComponentType,
        category_id: &str,
        node_type: CategoryNodeType,
        mut sub_category: SubCategoryDefinition,
    ) -> CatalogResult<SubCategoryDefinition> {
        let groupings = std::mem::take(&mut sub_category.groupings);
        let sub_category_id = build_sub_category_uid(category_id, &sub_category.normalized_name);
        sub_category.unique_id = Some(sub_category_id.to_owned());

        let created = match self
            .element_repository
            .create_sub_category(category_id, &sub_category, node_type)
            .await
        {
            Err(CatalogException::SubCategoryExistsForCategory { .. }) => {
                tracing::debug!(
                    "Subcategory {} of {category_id} already exists, updating",
                    sub_category.name
                );
                self.element_repository
                    .update_sub_category(&sub_category_id, &sub_category, node_type)
                    .await
            }
            other => other,
        };
        let mut created = created.map_err(|e| {
            tracing::debug!(
                "Failed to create subcategory {} of {category_id}: {e}",
                sub_category.name
            );
            e
        })?;
        let sub_category_id = created.unique_id.to_owned().unwrap_or(sub_category_id);

        if groupings.is_empty() {
            return Ok(created);
        }
        let grouping_node_type = CategoryNodeType::grouping_of(component_type).ok_or_else(|| {
            invalid(format!("{component_type} subcategories have no groupings"))
        })?;
        for mut grouping in groupings {
            let grouping_id = build_grouping_uid(&sub_category_id, &grouping.normalized_name);
            grouping.unique_id = Some(grouping_id.to_owned());
            let stored = match self
                .element_repository
                .create_grouping(&sub_category_id, &grouping, grouping_node_type)
                .await
            {
                Err(CatalogException::GroupingExistsForSubCategory { .. }) => {
                    tracing::debug!("Grouping {} already exists, updating", grouping.name);
                    self.element_repository
                        .update_grouping(&grouping_id, &grouping, grouping_node_type)
                        .await
                }
                other => other,
            }?;
            created.groupings.push(stored);
        }
        Ok(created)
    }
}

#[async_trait]
impl CategoryImportService for CategoryImportServiceImpl {
    async fn create_categories(
        &self,
        categories_yaml: &str,
    ) -> CatalogResult<HashMap<ComponentType, Vec<CategoryDefinition>>> {
        let all_categories = parse_categories(categories_yaml)?;
        let mut result = HashMap::new();
        for (component_type, categories) in all_categories {
            tracing::debug!("Creating {} {component_type} categories", categories.len());
            let mut created = Vec::with_capacity(categories.len());
            for category in categories {
                created.push(self.upsert_category(component_type, category).await?);
            }
            result.insert(component_type, created);
        }
        Ok(result)
    }
}

/// Reads the `service`, `resource` and `product` sections of a categories document.
///
/// Nothing is persisted when the document is malformed.
fn parse_categories(yaml: &str) -> CatalogResult<Vec<(ComponentType, Vec<CategoryDefinition>)>> {
    let document: Mapping = serde_yaml::from_str(yaml).map_err(|e| invalid(e.to_string()))?;
    let mut all_categories = vec![];
    for (key, section) in document {
        let component_type = match key.as_str() {
            Some("service") => ComponentType::Service,
            Some("resource") => ComponentType::Resource,
            Some("product") => ComponentType::Product,
            other => {
                tracing::debug!("Not supported category type - {other:?}");
                continue;
            }
        };
        let categories = entries::<CategoryYaml>(section, "category")?
            .into_iter()
            .map(|category| to_category(component_type, category))
            .collect::<CatalogResult<Vec<_>>>()?;
        all_categories.push((component_type, categories));
    }
    Ok(all_categories)
}

fn to_category(
    component_type: ComponentType,
    category: CategoryYaml,
) -> CatalogResult<CategoryDefinition> {
    let subcategories = entries::<SubCategoryYaml>(category.subcategories, "subcategory")?
        .into_iter()
        .map(|sub_category| to_sub_category(component_type, sub_category))
        .collect::<CatalogResult<Vec<_>>>()?;
    if !subcategories.is_empty() && CategoryNodeType::sub_category_of(component_type).is_none() {
        return Err(invalid(format!(
            "{component_type} category {} declares subcategories",
            category.name
        )));
    }
    Ok(CategoryDefinition {
        unique_id: None,
        normalized_name: normalized(&category.name)?,
        name: category.name,
        icons: category.icons.unwrap_or_default(),
        use_service_substitution_for_nested_services: category
            .use_service_substitution_for_nested_services
            .unwrap_or_default(),
        metadata_keys: metadata_keys(category.metadata_keys)?,
        subcategories,
    })
}

fn to_sub_category(
    component_type: ComponentType,
    sub_category: SubCategoryYaml,
) -> CatalogResult<SubCategoryDefinition> {
    let groupings = entries::<GroupingYaml>(sub_category.groupings, "grouping")?
        .into_iter()
        .map(|grouping| {
            Ok(GroupingDefinition {
                unique_id: None,
                normalized_name: normalized(&grouping.name)?,
                name: grouping.name,
                metadata_keys: metadata_keys(grouping.metadata_keys)?,
            })
        })
        .collect::<CatalogResult<Vec<_>>>()?;
    if !groupings.is_empty() && CategoryNodeType::grouping_of(component_type).is_none() {
        return Err(invalid(format!(
            "{component_type} subcategory {} declares groupings",
            sub_category.name
        )));
    }
    Ok(SubCategoryDefinition {
        unique_id: None,
        normalized_name: normalized(&sub_category.name)?,
        name: sub_category.name,
        icons: sub_category.icons.unwrap_or_default(),
        metadata_keys: metadata_keys(sub_category.metadata_keys)?,
        groupings,
    })
}

fn metadata_keys(value: Value) -> CatalogResult<Vec<MetadataKeyDefinition>> {
    entries(value, "metadata key")
}

/// Values of a keyed YAML mapping, in document order. Null reads as empty.
fn entries<T: DeserializeOwned>(value: Value, kind: &str) -> CatalogResult<Vec<T>> {
    let mapping: Option<Mapping> =
        serde_yaml::from_value(value).map_err(|e| invalid(format!("{kind} section: {e}")))?;
    mapping
        .unwrap_or_default()
        .into_iter()
        .map(|(key, entry)| {
            serde_yaml::from_value(entry).map_err(|e| invalid(format!("{kind} {key:?}: {e}")))
        })
        .collect()
}

fn normalized(name: &str) -> CatalogResult<String> {
    let normalized_name = normalize_category_name(name);
    if normalized_name.is_empty() {
        return Err(invalid("empty name"));
    }
    Ok(normalized_name)
}

fn invalid(reason: impl Into<String>) -> CatalogException {
    CatalogException::InvalidCategoriesDefinition {
        reason: reason.into(),
    }
}
