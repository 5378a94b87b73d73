use serde::{Deserialize, Serialize};

use super::component_type::ComponentType;

/// Graph labels of the category taxonomy, also the prefix of their unique ids.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryNodeType {
    ResourceNewCategory,
    ResourceSubcategory,
    ServiceNewCategory,
    ProductCategory,
    ProductSubcategory,
    ProductGrouping,
}

impl CategoryNodeType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResourceNewCategory => "resourceNewCategory",
            Self::ResourceSubcategory => "resourceSubcategory",
            Self::ServiceNewCategory => "serviceNewCategory",
            Self::ProductCategory => "productCategory",
            Self::ProductSubcategory => "productSubcategory",
            Self::ProductGrouping => "productGrouping",
        }
    }

    pub fn category_of(component_type: ComponentType) -> Self {
        match component_type {
            ComponentType::Resource => Self::ResourceNewCategory,
            ComponentType::Service => Self::ServiceNewCategory,
            ComponentType::Product => Self::ProductCategory,
        }
    }

    /// Services have flat categories.
    pub fn sub_category_of(component_type: ComponentType) -> Option<Self> {
        match component_type {
            ComponentType::Resource => Some(Self::ResourceSubcategory),
            ComponentType::Service => None,
            ComponentType::Product => Some(Self::ProductSubcategory),
        }
    }

    /// Only product subcategories are grouped.
    pub fn grouping_of(component_type: ComponentType) -> Option<Self> {
        match component_type {
            ComponentType::Product => Some(Self::ProductGrouping),
            _ => None,
        }
    }
}

/// Uniqueness key of a category, subcategory or grouping name.
pub fn normalize_category_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn build_category_uid(normalized_name: &str, node_type: CategoryNodeType) -> String {
    format!("{}.{normalized_name}", node_type.name())
}

pub fn build_sub_category_uid(category_uid: &str, normalized_name: &str) -> String {
    format!("{category_uid}.{normalized_name}")
}

pub fn build_grouping_uid(sub_category_uid: &str, normalized_name: &str) -> String {
    format!("{sub_category_uid}.{normalized_name}")
}
