use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogException>;

#[derive(Error, Debug)]
pub enum CatalogException {
    // node filter
    #[error("Node filter of component instance: {instance_id} not found.")]
    FilterNotFound { instance_id: String },

    #[error("{side} property: {property_name} not found.")]
    MappedPropertyNotFound { side: String, property_name: String },

    #[error("Source property: {source_property} of type: {source_type} doesn't match target property: {target_property} of type: {target_type}.")]
    SourceTargetPropertyTypeMismatch {
        source_property: String,
        source_type: String,
        target_property: String,
        target_type: String,
    },

    #[error("Source property: {source_property} schema doesn't match target property: {target_property} schema.")]
    SourceTargetSchemaMismatch {
        source_property: String,
        target_property: String,
    },

    #[error("Selected property: {property_name} is not present.")]
    SelectedPropertyNotPresent { property_name: String },

    #[error("Operator: {operator} is not supported by property: {property_name}.")]
    UnsupportedOperatorProvided {
        property_name: String,
        operator: String,
    },

    #[error("Unsupported property type: {property_type} of property: {property_name}.")]
    UnsupportedPropertyType {
        property_type: String,
        property_name: String,
    },

    #[error("Value: {value} is not valid for property: {property_name} of type: {property_type}.")]
    UnsupportedValueProvided {
        property_type: String,
        property_name: String,
        value: String,
    },

    #[error("Constraint format incorrect.")]
    ConstraintFormatIncorrect,

    // artifact templates
    #[error("Artifact type: {artifact_type} is not supported.")]
    ArtifactTypeNotSupported { artifact_type: String },

    #[error("Failed to retrieve deployment artifact types.")]
    FailedRetrieveArtifactsTypes,

    #[error("Artifact: {file_name} of type: {artifact_type} has env: {env}, but was already parsed with env: {existing_env}.")]
    ArtifactNotValidEnv {
        file_name: String,
        artifact_type: String,
        env: String,
        existing_env: String,
    },

    #[error("Artifact: {file_name} of type: {artifact_type} is not valid under master: {parent_file_name} of type: {parent_type}.")]
    ArtifactNotValidInMaster {
        file_name: String,
        artifact_type: String,
        parent_file_name: String,
        parent_type: String,
    },

    #[error("Artifact: {file_name} of type: {artifact_type} already exists under: {master}.")]
    ArtifactAlreadyExistInMasterInCsar {
        file_name: String,
        artifact_type: String,
        master: String,
    },

    #[error("Artifact: {file_name} is nested deeper than {max_depth} levels.")]
    ArtifactNestingTooDeep { file_name: String, max_depth: usize },

    // data types
    #[error("Value is not valid for data type: {data_type}: {reason}.")]
    DataTypeValueViolation { data_type: String, reason: String },

    #[error("Data type: {data_type} has a cyclic derivation chain.")]
    DataTypeDerivationCycle { data_type: String },

    // categories
    #[error("Invalid categories definition: {reason}.")]
    InvalidCategoriesDefinition { reason: String },

    #[error("Category: {name} already exists.")]
    CategoryAlreadyExists { name: String },

    #[error("Sub category: {name} already exists in category: {category}.")]
    SubCategoryExistsForCategory { name: String, category: String },

    #[error("Grouping: {name} already exists in sub category: {sub_category}.")]
    GroupingExistsForSubCategory { name: String, sub_category: String },

    #[error("Element: {id} not found.")]
    ElementNotFound { id: String },

    #[error("Catalog internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl CatalogException {
    /// Status name reported to API consumers.
    pub fn action_status(&self) -> &'static str {
        match self {
            Self::FilterNotFound { .. } => "FILTER_NOT_FOUND",
            Self::MappedPropertyNotFound { .. } => "MAPPED_PROPERTY_NOT_FOUND",
            Self::SourceTargetPropertyTypeMismatch { .. } => {
                "SOURCE_TARGET_PROPERTY_TYPE_MISMATCH"
            }
            Self::SourceTargetSchemaMismatch { .. } => "SOURCE_TARGET_SCHEMA_MISMATCH",
            Self::SelectedPropertyNotPresent { .. } => "SELECTED_PROPERTY_NOT_PRESENT",
            Self::UnsupportedOperatorProvided { .. } => "UNSUPPORTED_OPERATOR_PROVIDED",
            Self::UnsupportedPropertyType { .. } => "UNSUPPORTED_PROPERTY_TYPE",
            Self::UnsupportedValueProvided { .. } => "UNSUPPORTED_VALUE_PROVIDED",
            Self::ConstraintFormatIncorrect => "CONSTRAINT_FORMAT_INCORRECT",
            Self::ArtifactTypeNotSupported { .. } => "ARTIFACT_TYPE_NOT_SUPPORTED",
            Self::FailedRetrieveArtifactsTypes => "FAILED_RETRIVE_ARTIFACTS_TYPES",
            Self::ArtifactNotValidEnv { .. } => "ARTIFACT_NOT_VALID_ENV",
            Self::ArtifactNotValidInMaster { .. } => "ARTIFACT_NOT_VALID_IN_MASTER",
            Self::ArtifactAlreadyExistInMasterInCsar { .. } => {
                "ARTIFACT_ALRADY_EXIST_IN_MASTER_IN_CSAR"
            }
            Self::ArtifactNestingTooDeep { .. } => "INVALID_CONTENT",
            Self::DataTypeValueViolation { .. } => "INVALID_PROPERTY_VALUE",
            Self::DataTypeDerivationCycle { .. } => "INVALID_DATA_TYPE",
            Self::InvalidCategoriesDefinition { .. } => "INVALID_CONTENT",
            Self::CategoryAlreadyExists { .. } => "COMPONENT_CATEGORY_ALREADY_EXISTS",
            Self::SubCategoryExistsForCategory { .. } => {
                "COMPONENT_SUB_CATEGORY_EXISTS_FOR_CATEGORY"
            }
            Self::GroupingExistsForSubCategory { .. } => {
                "COMPONENT_GROUPING_EXISTS_FOR_SUB_CATEGORY"
            }
            Self::ElementNotFound { .. } => "ELEMENT_NOT_FOUND",
            Self::InternalError { .. } => "GENERAL_ERROR",
        }
    }

    pub fn violation(data_type: &str, reason: impl Into<String>) -> Self {
        Self::DataTypeValueViolation {
            data_type: data_type.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for CatalogException {
    fn from(e: anyhow::Error) -> Self {
        CatalogException::InternalError { source: e }
    }
}
