use domain_catalog::{
    exception::{CatalogException, CatalogResult},
    model::{
        entity::{Component, DataTypes, PropertyDefinition},
        vo::{
            constraint::{ConstraintSourceType, UIConstraint},
            node_filter::{NodeFilterConstraintAction, NodeFilterConstraintType},
            tosca::ToscaPropertyType,
        },
    },
    service::NodeFilterValidationService,
};
use serde_json::Value;

const SOURCE: &str = "Source";
const TARGET: &str = "Target";

pub struct NodeFilterValidationServiceImpl;

impl NodeFilterValidationService for NodeFilterValidationServiceImpl {
    fn validate_component_instance_exist(
        &self,
        component: &Component,
        component_instance_id: &str,
    ) -> CatalogResult<()> {
        if component_instance_id.is_empty() || component.instance(component_instance_id).is_none()
        {
            tracing::error!(
                "Component instance {component_instance_id} not found in {}",
                component.unique_id
            );
            return Err(CatalogException::FilterNotFound {
                instance_id: component_instance_id.to_owned(),
            });
        }
        Ok(())
    }

    fn validate_filter(
        &self,
        component: &Component,
        component_instance_id: &str,
        constraints: &[String],
        action: NodeFilterConstraintAction,
        constraint_type: NodeFilterConstraintType,
    ) -> CatalogResult<bool> {
        if action == NodeFilterConstraintAction::Delete {
            return Ok(true);
        }
        self.validate_component_instance_exist(component, component_instance_id)?;
        let instance_properties = component
            .instance_properties(component_instance_id)
            .unwrap_or_default();
        for expression in constraints {
            let constraint = UIConstraint::parse(expression)?;
            let target = instance_properties
                .iter()
                .find(|p| p.name == constraint.service_property_name);
            match constraint.source_type {
                ConstraintSourceType::PropertyConstraint => {
                    let source_properties = if component.name == constraint.source_name {
                        component.properties.as_slice()
                    } else {
                        component
                            .instance_by_name(&constraint.source_name)
                            .and_then(|i| component.instance_properties(&i.unique_id))
                            .unwrap_or_default()
                    };
                    validate_property_constraint(source_properties, target, &constraint)?;
                }
                ConstraintSourceType::StaticConstraint => {
                    let target = match constraint_type {
                        NodeFilterConstraintType::Properties => target,
                        NodeFilterConstraintType::Capabilities => capability_property(
                            component,
                            component_instance_id,
                            &constraint.service_property_name,
                        ),
                    };
                    validate_static_value_and_operator(target, &constraint)?;
                }
            }
        }
        Ok(true)
    }

    fn validate_component_filter(
        &self,
        component: &Component,
        constraints: &[String],
        action: NodeFilterConstraintAction,
    ) -> CatalogResult<bool> {
        if action == NodeFilterConstraintAction::Delete {
            return Ok(true);
        }
        for expression in constraints {
            let constraint = UIConstraint::parse(expression)?;
            let target = component.property(&constraint.service_property_name);
            match constraint.source_type {
                ConstraintSourceType::PropertyConstraint => {
                    let source_properties = if component.name == constraint.source_name {
                        component.properties.as_slice()
                    } else {
                        &[]
                    };
                    validate_property_constraint(source_properties, target, &constraint)?;
                }
                ConstraintSourceType::StaticConstraint => {
                    validate_static_value_and_operator(target, &constraint)?;
                }
            }
        }
        Ok(true)
    }
}

/// The first property of a capability group in which every capability has
/// properties and declares `property_name`.
fn capability_property<'a>(
    component: &'a Component,
    component_instance_id: &str,
    property_name: &str,
) -> Option<&'a PropertyDefinition> {
    let instance = component
        .component_instances
        .iter()
        .find(|i| i.unique_id.eq_ignore_ascii_case(component_instance_id))?;
    instance
        .capabilities
        .values()
        .filter(|group| group.iter().all(|c| c.properties.is_some()))
        .find(|group| {
            group.iter().all(|c| {
                c.properties
                    .iter()
                    .flatten()
                    .any(|p| p.name.eq_ignore_ascii_case(property_name))
            })
        })?
        .first()
        .and_then(|c| c.properties.as_ref())
        .and_then(|properties| properties.first())
}

fn validate_property_constraint(
    source_properties: &[PropertyDefinition],
    target: Option<&PropertyDefinition>,
    constraint: &UIConstraint,
) -> CatalogResult<()> {
    let source_name = constraint.value_text().unwrap_or_default();
    let source = source_properties.iter().find(|p| p.name == source_name);
    let (source, target) = match (source_properties.is_empty(), source, target) {
        (false, Some(source), Some(target)) => (source, target),
        (false, _, None) => {
            return Err(CatalogException::MappedPropertyNotFound {
                side: TARGET.to_owned(),
                property_name: constraint.service_property_name.to_owned(),
            })
        }
        _ => {
            return Err(CatalogException::MappedPropertyNotFound {
                side: SOURCE.to_owned(),
                property_name: source_name,
            })
        }
    };
    if source.property_type != target.property_type {
        return Err(CatalogException::SourceTargetPropertyTypeMismatch {
            source_property: source.name.to_owned(),
            source_type: source.property_type.to_owned(),
            target_property: target.name.to_owned(),
            target_type: target.property_type.to_owned(),
        });
    }
    let schema_bearing = ToscaPropertyType::from_type_name(&source.property_type)
        .is_some_and(|t| t.is_schema_bearing());
    if schema_bearing && source.schema != target.schema {
        return Err(CatalogException::SourceTargetSchemaMismatch {
            source_property: source.name.to_owned(),
            target_property: target.name.to_owned(),
        });
    }
    Ok(())
}

fn validate_static_value_and_operator(
    target: Option<&PropertyDefinition>,
    constraint: &UIConstraint,
) -> CatalogResult<()> {
    let property_name = &constraint.service_property_name;
    let property = target.ok_or_else(|| CatalogException::SelectedPropertyNotPresent {
        property_name: property_name.to_owned(),
    })?;
    let property_type = ToscaPropertyType::from_type_name(&property.property_type);
    if constraint.constraint_operator.is_ordering()
        && !property_type.is_some_and(|t| t.is_comparable())
    {
        return Err(CatalogException::UnsupportedOperatorProvided {
            property_name: property_name.to_owned(),
            operator: constraint.constraint_operator.to_string(),
        });
    }
    let property_type = property_type.ok_or_else(|| CatalogException::UnsupportedPropertyType {
        property_type: property.property_type.to_owned(),
        property_name: property_name.to_owned(),
    })?;
    let literals = match &constraint.value {
        Value::Array(items) => items.iter().map(literal_text).collect(),
        value => vec![literal_text(value)],
    };
    let data_types = DataTypes::new();
    for literal in literals {
        if !property_type
            .validator()
            .is_valid(literal.as_deref(), property.schema_type(), &data_types)
        {
            return Err(CatalogException::UnsupportedValueProvided {
                property_type: property.property_type.to_owned(),
                property_name: property_name.to_owned(),
                value: literal.unwrap_or_default(),
            });
        }
    }
    Ok(())
}

fn literal_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_owned()),
        other => Some(other.to_string()),
    }
}
