mod artifact_template;
mod category_import;
mod node_filter;

#[rustfmt::skip]
pub use {
    artifact_template::ArtifactTemplateServiceImpl,
    category_import::CategoryImportServiceImpl,
    node_filter::NodeFilterValidationServiceImpl,
};
