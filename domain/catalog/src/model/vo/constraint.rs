use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exception::{CatalogException, CatalogResult};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintSourceType {
    /// Value taken from a property of the component or of one of its instances.
    PropertyConstraint,
    /// Literal value.
    StaticConstraint,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOperator {
    Equal,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    InRange,
    ValidValues,
    Length,
    MinLength,
    MaxLength,
    Pattern,
}

impl ConstraintOperator {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "equal" => Self::Equal,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            "greater_or_equal" => Self::GreaterOrEqual,
            "less_or_equal" => Self::LessOrEqual,
            "in_range" => Self::InRange,
            "valid_values" => Self::ValidValues,
            "length" => Self::Length,
            "min_length" => Self::MinLength,
            "max_length" => Self::MaxLength,
            "pattern" => Self::Pattern,
            _ => return None,
        })
    }

    /// `>` and `<`, only meaningful for comparable types.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::InRange => "in_range",
            Self::ValidValues => "valid_values",
            Self::Length => "length",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::Pattern => "pattern",
        }
    }
}

impl Display for ConstraintOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A node-filter constraint as edited in the designer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UIConstraint {
    pub service_property_name: String,
    pub constraint_operator: ConstraintOperator,
    pub source_type: ConstraintSourceType,
    /// Component or instance name for property constraints, `static` otherwise.
    pub source_name: String,
    /// The literal, or the source property name for property constraints.
    pub value: Value,
}

pub const STATIC_SOURCE_NAME: &str = "static";
const GET_PROPERTY: &str = "get_property";

impl UIConstraint {
    /// Parses `{<property>: {<operator>: <value>}}` where value is a scalar, a list,
    /// or `{get_property: [<source>, <property>]}`.
    pub fn parse(expression: &str) -> CatalogResult<Self> {
        let document: serde_yaml::Value =
            serde_yaml::from_str(expression).map_err(|e| format_incorrect(expression, e))?;
        let (property, operation) = single_entry(&document)
            .ok_or_else(|| format_incorrect(expression, "expected one property"))?;
        let (operator, operand) = single_entry(operation)
            .ok_or_else(|| format_incorrect(expression, "expected one operator"))?;
        let constraint_operator = ConstraintOperator::from_key(&operator)
            .ok_or_else(|| format_incorrect(expression, "unknown operator"))?;

        let (source_type, source_name, value) = match operand {
            serde_yaml::Value::Mapping(_) => {
                let (function, arguments) = single_entry(operand)
                    .filter(|(function, _)| function == GET_PROPERTY)
                    .ok_or_else(|| format_incorrect(expression, "unsupported function"))?;
                match arguments.as_sequence().map(Vec::as_slice) {
                    Some([source, property]) => (
                        ConstraintSourceType::PropertyConstraint,
                        scalar_text(source)
                            .ok_or_else(|| format_incorrect(expression, "bad source"))?,
                        Value::String(
                            scalar_text(property)
                                .ok_or_else(|| format_incorrect(expression, "bad property"))?,
                        ),
                    ),
                    _ => return Err(format_incorrect(expression, "bad get_property arguments")),
                }
            }
            serde_yaml::Value::Null | serde_yaml::Value::Tagged(_) => {
                return Err(format_incorrect(expression, "missing value"))
            }
            literal => (
                ConstraintSourceType::StaticConstraint,
                STATIC_SOURCE_NAME.to_owned(),
                serde_json::to_value(literal).map_err(|e| format_incorrect(expression, e))?,
            ),
        };
        Ok(Self {
            service_property_name: property,
            constraint_operator,
            source_type,
            source_name,
            value,
        })
    }

    /// Text of the value as handed to a primitive validator.
    pub fn value_text(&self) -> Option<String> {
        match &self.value {
            Value::Null => None,
            Value::String(s) => Some(s.to_owned()),
            other => Some(other.to_string()),
        }
    }
}

fn single_entry(value: &serde_yaml::Value) -> Option<(String, &serde_yaml::Value)> {
    let mapping = value.as_mapping()?;
    if mapping.len() != 1 {
        return None;
    }
    let (key, value) = mapping.iter().next()?;
    Some((scalar_text(key)?, value))
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.to_owned()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn format_incorrect(expression: &str, reason: impl Display) -> CatalogException {
    tracing::debug!("Constraint {expression} cannot be parsed: {reason}");
    CatalogException::ConstraintFormatIncorrect
}
