pub mod artifact_template;
pub mod category;
pub mod component;
pub mod data_type;

#[rustfmt::skip]
pub use {
    artifact_template::ArtifactTemplateInfo,
    category::{CategoryDefinition, GroupingDefinition, MetadataKeyDefinition, SubCategoryDefinition},
    component::{CapabilityDefinition, Component, ComponentInstance},
    data_type::{DataTypeDefinition, DataTypes, PropertyDefinition, SchemaDefinition},
};
