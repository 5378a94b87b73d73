pub mod artifact_type;
pub mod category;
pub mod component_type;
pub mod constraint;
pub mod node_filter;
pub mod tosca;
