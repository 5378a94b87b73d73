use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::PropertyDefinition;
use crate::model::vo::component_type::ComponentType;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub capability_type: String,
    #[serde(default)]
    pub properties: Option<Vec<PropertyDefinition>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub unique_id: String,
    pub name: String,
    /// Capabilities grouped by capability type.
    #[serde(default)]
    pub capabilities: BTreeMap<String, Vec<CapabilityDefinition>>,
}

/// A resource or service with the instances composed into it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub unique_id: String,
    pub name: String,
    pub component_type: ComponentType,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
    #[serde(default)]
    pub component_instances: Vec<ComponentInstance>,
    /// Instance properties keyed by instance unique id.
    #[serde(default)]
    pub component_instances_properties: HashMap<String, Vec<PropertyDefinition>>,
}

impl Component {
    pub fn new(unique_id: &str, name: &str, component_type: ComponentType) -> Self {
        Self {
            unique_id: unique_id.to_owned(),
            name: name.to_owned(),
            component_type,
            properties: vec![],
            component_instances: vec![],
            component_instances_properties: HashMap::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn instance(&self, instance_id: &str) -> Option<&ComponentInstance> {
        self.component_instances
            .iter()
            .find(|i| i.unique_id == instance_id)
    }

    pub fn instance_by_name(&self, name: &str) -> Option<&ComponentInstance> {
        self.component_instances.iter().find(|i| i.name == name)
    }

    pub fn instance_properties(&self, instance_id: &str) -> Option<&[PropertyDefinition]> {
        self.component_instances_properties
            .get(instance_id)
            .map(Vec::as_slice)
    }
}
