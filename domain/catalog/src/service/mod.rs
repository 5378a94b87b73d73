mod artifact_template;
mod category_import;
mod node_filter;

#[rustfmt::skip]
pub use {
    artifact_template::ArtifactTemplateService,
    category_import::CategoryImportService,
    node_filter::NodeFilterValidationService,
};
