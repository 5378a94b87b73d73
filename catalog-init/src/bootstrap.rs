use std::sync::Arc;

use colored::Colorize;
use domain_catalog::{
    model::vo::component_type::ComponentType,
    repository::ElementRepo,
    service::{ArtifactTemplateService, CategoryImportService},
};
use infrastructure_common::{config::build_config, telemetry::initialize_telemetry};
use service_catalog::{ArtifactTemplateServiceImpl, CategoryImportServiceImpl};
use tracing::{error, info};

use crate::{config::CatalogInitConfig, repository::MemoryElementRepo};

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build runtime".red(), e);
        }
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config().and_then(|c| Ok(c.try_deserialize::<CatalogInitConfig>()?))
    {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.common.telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };

    let element_repository: Arc<dyn ElementRepo> = Arc::new(MemoryElementRepo::default());
    if let Err(e) = import_categories(&config, element_repository.clone()).await {
        error!("Category import failed: {e}");
        return eprintln!("{}: {}", "Cannot import categories".red(), e);
    }
    if let Err(e) = check_import_structures(&config).await {
        error!("Import structure check failed: {e}");
        return eprintln!("{}: {}", "Cannot parse import structures".red(), e);
    }
    info!("Catalog initialized.");
}

/// Imports every configured category file, stopping at the first failure.
pub async fn import_categories(
    config: &CatalogInitConfig,
    element_repository: Arc<dyn ElementRepo>,
) -> anyhow::Result<usize> {
    let service = CategoryImportServiceImpl::builder()
        .element_repository(element_repository)
        .build();
    let mut imported = 0;
    for path in config.import.categories.iter() {
        let yaml = tokio::fs::read_to_string(path).await?;
        let categories = service
            .create_categories(&yaml)
            .await
            .map_err(|e| anyhow::anyhow!("{path}: {} ({e})", e.action_status()))?;
        let count = categories.values().map(Vec::len).sum::<usize>();
        info!("Imported {count} categories from {path}");
        imported += count;
    }
    Ok(imported)
}

/// Parses the configured import structures against the configured resource
/// artifact types.
pub async fn check_import_structures(config: &CatalogInitConfig) -> anyhow::Result<usize> {
    let service = ArtifactTemplateServiceImpl::builder()
        .artifact_configurations(Arc::new(config.artifacts.to_owned()))
        .component_type(ComponentType::Resource)
        .build();
    let mut parsed = 0;
    for path in config.import.import_structures.iter() {
        let json = tokio::fs::read_to_string(path).await?;
        let import_structure = serde_json::from_str(&json)?;
        let templates = service
            .parse_import_structure(&import_structure)
            .map_err(|e| anyhow::anyhow!("{path}: {} ({e})", e.action_status()))?;
        info!("{path} declares {} artifact templates", templates.len());
        parsed += templates.len();
    }
    Ok(parsed)
}
