use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    exception::{CatalogException, CatalogResult},
    model::vo::tosca::ToscaPropertyType,
};

/// All known data types keyed by type name.
pub type DataTypes = HashMap<String, DataTypeDefinition>;

/// Element type of a `list` or `map` property.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    #[serde(rename = "type")]
    pub entry_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl PropertyDefinition {
    pub fn new(name: &str, property_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            property_type: property_type.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, entry_type: &str) -> Self {
        self.schema = Some(SchemaDefinition {
            entry_type: entry_type.to_owned(),
        });
        self
    }

    pub fn schema_type(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.entry_type.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataTypeDefinition {
    pub name: String,
    /// Name of the parent type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl DataTypeDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn derived_from(mut self, parent: &str) -> Self {
        self.derived_from = Some(parent.to_owned());
        self
    }

    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// This type followed by every ancestor that can be resolved in `data_types`.
    ///
    /// A name repeating along the chain is reported as a derivation cycle.
    pub fn derivation_chain<'a>(
        &'a self,
        data_types: &'a DataTypes,
    ) -> CatalogResult<Vec<&'a DataTypeDefinition>> {
        let mut visited = HashSet::from([self.name.as_str()]);
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent_name) = current.derived_from.as_deref() {
            if !visited.insert(parent_name) {
                return Err(CatalogException::DataTypeDerivationCycle {
                    data_type: self.name.to_owned(),
                });
            }
            match data_types.get(parent_name) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        Ok(chain)
    }

    /// The nearest primitive this type derives from, if any.
    pub fn scalar_base(&self, data_types: &DataTypes) -> CatalogResult<Option<ToscaPropertyType>> {
        let chain = self.derivation_chain(data_types)?;
        let unresolved_parent = chain.last().and_then(|last| last.derived_from.as_deref());
        Ok(chain
            .iter()
            .map(|data_type| data_type.name.as_str())
            .chain(unresolved_parent)
            .filter_map(ToscaPropertyType::from_type_name)
            .find(ToscaPropertyType::is_derivable))
    }

    /// Properties declared along the whole chain; a descendant overrides its ancestors.
    pub fn all_properties<'a>(
        &'a self,
        data_types: &'a DataTypes,
    ) -> CatalogResult<HashMap<&'a str, &'a PropertyDefinition>> {
        let chain = self.derivation_chain(data_types)?;
        Ok(chain
            .iter()
            .rev()
            .flat_map(|data_type| data_type.properties.iter())
            .map(|property| (property.name.as_str(), property))
            .collect())
    }
}
