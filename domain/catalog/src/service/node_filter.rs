use crate::{
    exception::CatalogResult,
    model::{
        entity::Component,
        vo::node_filter::{NodeFilterConstraintAction, NodeFilterConstraintType},
    },
};

/// Validates node-filter constraint expressions before they are stored.
pub trait NodeFilterValidationService: Send + Sync {
    fn validate_component_instance_exist(
        &self,
        component: &Component,
        component_instance_id: &str,
    ) -> CatalogResult<()>;

    /// Constraints on the node filter of one component instance.
    fn validate_filter(
        &self,
        component: &Component,
        component_instance_id: &str,
        constraints: &[String],
        action: NodeFilterConstraintAction,
        constraint_type: NodeFilterConstraintType,
    ) -> CatalogResult<bool>;

    /// Constraints on the substitution filter of the component itself.
    fn validate_component_filter(
        &self,
        component: &Component,
        constraints: &[String],
        action: NodeFilterConstraintAction,
    ) -> CatalogResult<bool>;
}
