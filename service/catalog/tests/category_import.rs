use std::sync::Arc;

use domain_catalog::{
    exception::CatalogException,
    mock::MockElementRepo,
    model::vo::{category::CategoryNodeType, component_type::ComponentType},
    service::CategoryImportService,
};
use indoc::indoc;
use service_catalog::CategoryImportServiceImpl;

const CATEGORIES: &str = indoc! {"
    resource:
      network_l2_3:
        name: Network L2-3
        subcategories:
          router:
            name: Router
          gateway:
            name: Gateway
    product:
      network:
        name: Network
        subcategories:
          core:
            name: Core
            groupings:
              edge:
                name: Edge Grouping
"};

fn creating_repository() -> MockElementRepo {
    let mut repository = MockElementRepo::new();
    repository
        .expect_create_category()
        .returning(|category, _| Ok(category.clone()));
    repository
        .expect_create_sub_category()
        .returning(|_, sub_category, _| Ok(sub_category.clone()));
    repository
        .expect_create_grouping()
        .returning(|_, grouping, _| Ok(grouping.clone()));
    repository.expect_update_category().never();
    repository.expect_update_sub_category().never();
    repository.expect_update_grouping().never();
    repository
}

#[tokio::test]
async fn test_first_import_creates_everything() {
    let service = CategoryImportServiceImpl::builder()
        .element_repository(Arc::new(creating_repository()))
        .build();
    let result = service.create_categories(CATEGORIES).await.unwrap();

    let resources = &result[&ComponentType::Resource];
    assert_eq!(resources.len(), 1);
    let category = &resources[0];
    assert_eq!(
        category.unique_id.as_deref(),
        Some("resourceNewCategory.networkl2-3")
    );
    let ids = category
        .subcategories
        .iter()
        .map(|s| s.unique_id.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            "resourceNewCategory.networkl2-3.router",
            "resourceNewCategory.networkl2-3.gateway"
        ]
    );

    let grouping = &result[&ComponentType::Product][0].subcategories[0].groupings[0];
    assert_eq!(
        grouping.unique_id.as_deref(),
        Some("productCategory.network.core.edgegrouping")
    );
}

#[tokio::test]
async fn test_second_import_updates_existing_elements() {
    let mut repository = MockElementRepo::new();
    repository.expect_create_category().returning(|category, _| {
        Err(CatalogException::CategoryAlreadyExists {
            name: category.name.to_owned(),
        })
    });
    repository
        .expect_update_category()
        .times(2)
        .returning(|category, _| Ok(category.clone()));
    repository
        .expect_create_sub_category()
        .returning(|category_id, sub_category, _| {
            Err(CatalogException::SubCategoryExistsForCategory {
                name: sub_category.name.to_owned(),
                category: category_id.to_string(),
            })
        });
    repository
        .expect_update_sub_category()
        .times(3)
        .withf(|sub_category_id, sub_category, _| {
            Some(sub_category_id.to_string()) == sub_category.unique_id
        })
        .returning(|_, sub_category, _| Ok(sub_category.clone()));
    repository
        .expect_create_grouping()
        .returning(|sub_category_id, grouping, _| {
            Err(CatalogException::GroupingExistsForSubCategory {
                name: grouping.name.to_owned(),
                sub_category: sub_category_id.to_string(),
            })
        });
    repository
        .expect_update_grouping()
        .times(1)
        .withf(|grouping_id, _, node_type| {
            grouping_id.to_string() == "productCategory.network.core.edgegrouping"
                && *node_type == CategoryNodeType::ProductGrouping
        })
        .returning(|_, grouping, _| Ok(grouping.clone()));

    let service = CategoryImportServiceImpl::builder()
        .element_repository(Arc::new(repository))
        .build();
    let result = service.create_categories(CATEGORIES).await.unwrap();
    assert_eq!(result[&ComponentType::Resource][0].subcategories.len(), 2);
    assert_eq!(
        result[&ComponentType::Product][0].subcategories[0]
            .groupings
            .len(),
        1
    );
}

#[tokio::test]
async fn test_repository_failure_stops_the_import() {
    let mut repository = MockElementRepo::new();
    repository
        .expect_create_category()
        .times(1)
        .returning(|_, _| Err(anyhow::anyhow!("connection refused").into()));
    repository.expect_update_category().never();
    repository.expect_create_sub_category().never();

    let service = CategoryImportServiceImpl::builder()
        .element_repository(Arc::new(repository))
        .build();
    let err = service.create_categories(CATEGORIES).await.unwrap_err();
    assert_eq!(err.action_status(), "GENERAL_ERROR");
}

#[tokio::test]
async fn test_malformed_document_touches_nothing() {
    let mut repository = MockElementRepo::new();
    repository.expect_create_category().never();

    let service = CategoryImportServiceImpl::builder()
        .element_repository(Arc::new(repository))
        .build();
    let err = service
        .create_categories("resource:\n  x:\n    icons: [a]")
        .await
        .unwrap_err();
    assert_eq!(err.action_status(), "INVALID_CONTENT");
}
