use serde_json::{Map, Value};

use super::ToscaPropertyType;
use crate::{
    exception::{CatalogException, CatalogResult},
    model::entity::{DataTypeDefinition, DataTypes, PropertyDefinition},
};

/// Deepest data-type nesting a value may reach.
pub const MAX_DATA_TYPE_DEPTH: usize = 32;

/// Validates JSON values against (possibly nested) data types and returns
/// them with every primitive leaf in canonical form.
#[derive(Debug, Default)]
pub struct DataTypeValidatorConverter;

static INSTANCE: DataTypeValidatorConverter = DataTypeValidatorConverter;

impl DataTypeValidatorConverter {
    pub fn instance() -> &'static Self {
        &INSTANCE
    }

    /// Empty text is valid; text that is not JSON is not.
    pub fn is_valid(&self, value: &str, data_type: &DataTypeDefinition, data_types: &DataTypes) -> bool {
        self.validate_and_update(value, data_type, data_types).is_ok()
    }

    pub fn is_valid_value(
        &self,
        value: &Value,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> bool {
        self.validate_and_update_value(value, data_type, data_types).is_ok()
    }

    pub fn validate_and_update(
        &self,
        value: &str,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> CatalogResult<Value> {
        if value.is_empty() {
            return Ok(Value::Null);
        }
        let parsed = serde_json::from_str::<Value>(value).map_err(|e| {
            tracing::debug!("Value of data type {} is not JSON: {e}", data_type.name);
            CatalogException::violation(&data_type.name, format!("not a JSON value: {e}"))
        })?;
        self.validate_and_update_value(&parsed, data_type, data_types)
    }

    pub fn validate_and_update_value(
        &self,
        value: &Value,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> CatalogResult<Value> {
        self.validate_at_depth(value, data_type, data_types, 0)
            .map_err(|e| {
                tracing::debug!("Value rejected by data type {}: {e}", data_type.name);
                e
            })
    }

    fn validate_at_depth(
        &self,
        value: &Value,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
        depth: usize,
    ) -> CatalogResult<Value> {
        if depth > MAX_DATA_TYPE_DEPTH {
            return Err(CatalogException::violation(
                &data_type.name,
                format!("nested deeper than {MAX_DATA_TYPE_DEPTH} levels"),
            ));
        }
        match data_type.scalar_base(data_types)? {
            Some(scalar) => Self::validate_scalar(value, scalar, data_type, data_types),
            None => self.validate_complex(value, data_type, data_types, depth),
        }
    }

    /// A type derived from a primitive accepts exactly what the primitive accepts.
    fn validate_scalar(
        value: &Value,
        scalar: ToscaPropertyType,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> CatalogResult<Value> {
        let text = match value {
            Value::Object(_) | Value::Array(_) => {
                return Err(CatalogException::violation(
                    &data_type.name,
                    format!("a {} value cannot be a collection", scalar.type_name()),
                ))
            }
            Value::Null => None,
            primitive => Some(primitive.to_string()),
        };
        if !scalar.validator().is_valid(text.as_deref(), None, data_types) {
            return Err(CatalogException::violation(
                &data_type.name,
                format!("not a valid {} value", scalar.type_name()),
            ));
        }
        match text {
            None => Ok(Value::Null),
            Some(text) => Self::canonical(&text, scalar, None, data_type, data_types),
        }
    }

    /// Runs the primitive's converter and reads the result back as JSON.
    fn canonical(
        text: &str,
        primitive: ToscaPropertyType,
        inner_type: Option<&str>,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> CatalogResult<Value> {
        match primitive.converter().convert(text, inner_type, data_types) {
            None => Ok(Value::Null),
            Some(converted) if converted.is_empty() => Ok(Value::String(converted)),
            Some(converted) => serde_json::from_str(&converted).map_err(|e| {
                CatalogException::violation(
                    &data_type.name,
                    format!("converted {} value is not JSON: {e}", primitive.type_name()),
                )
            }),
        }
    }

    fn validate_complex(
        &self,
        value: &Value,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
        depth: usize,
    ) -> CatalogResult<Value> {
        let object = match value {
            Value::Null => return Ok(Value::Null),
            Value::Object(object) => object,
            _ => {
                return Err(CatalogException::violation(
                    &data_type.name,
                    "expected an object",
                ))
            }
        };
        let properties = data_type.all_properties(data_types)?;
        let mut updated = Map::with_capacity(object.len());
        for (key, element) in object {
            let property = properties.get(key.as_str()).ok_or_else(|| {
                CatalogException::violation(&data_type.name, format!("unknown property {key}"))
            })?;
            let converted = match ToscaPropertyType::from_type_name(&property.property_type) {
                Some(primitive) => {
                    Self::convert_primitive(element, primitive, property, data_type, data_types)?
                }
                None => {
                    let nested = data_types.get(&property.property_type).ok_or_else(|| {
                        CatalogException::violation(
                            &data_type.name,
                            format!(
                                "property {key} has unknown type {}",
                                property.property_type
                            ),
                        )
                    })?;
                    self.validate_at_depth(element, nested, data_types, depth + 1)?
                }
            };
            updated.insert(key.to_owned(), converted);
        }
        Ok(Value::Object(updated))
    }

    fn convert_primitive(
        element: &Value,
        primitive: ToscaPropertyType,
        property: &PropertyDefinition,
        data_type: &DataTypeDefinition,
        data_types: &DataTypes,
    ) -> CatalogResult<Value> {
        let inner_type = if primitive.is_schema_bearing() {
            Some(property.schema_type().ok_or_else(|| {
                CatalogException::violation(
                    &data_type.name,
                    format!("property {} has no element schema", property.name),
                )
            })?)
        } else {
            None
        };
        // null is checked as the literal text, as other non-string primitives are
        let text = match element {
            Value::String(s) if s.is_empty() => String::new(),
            other => other.to_string(),
        };
        if !primitive
            .validator()
            .is_valid(Some(&text), inner_type, data_types)
        {
            return Err(CatalogException::violation(
                &data_type.name,
                format!(
                    "property {} is not a valid {}",
                    property.name,
                    primitive.type_name()
                ),
            ));
        }
        if text.is_empty() {
            return Ok(Value::String(text));
        }
        Self::canonical(&text, primitive, inner_type, data_type, data_types)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::entity::PropertyDefinition;

    fn data_types() -> DataTypes {
        [
            DataTypeDefinition::new("tosca.datatypes.Root"),
            DataTypeDefinition::new("org.Port")
                .derived_from("tosca.datatypes.Root")
                .with_property(PropertyDefinition::new("number", "integer"))
                .with_property(PropertyDefinition::new("enabled", "boolean"))
                .with_property(PropertyDefinition::new("tags", "list").with_schema("string"))
                .with_property(PropertyDefinition::new("weights", "list").with_schema("float")),
            DataTypeDefinition::new("org.SecurePort")
                .derived_from("org.Port")
                .with_property(PropertyDefinition::new("cipher", "string")),
            DataTypeDefinition::new("org.Node")
                .derived_from("tosca.datatypes.Root")
                .with_property(PropertyDefinition::new("port", "org.SecurePort"))
                .with_property(PropertyDefinition::new("ports", "map").with_schema("org.Port"))
                .with_property(PropertyDefinition::new("raw", "list")),
            DataTypeDefinition::new("org.Name").derived_from("string"),
            DataTypeDefinition::new("org.Count").derived_from("integer"),
            DataTypeDefinition::new("org.Real").derived_from("float"),
            DataTypeDefinition::new("org.Clock").derived_from("scalar-unit.frequency"),
        ]
        .into_iter()
        .map(|d| (d.name.to_owned(), d))
        .collect()
    }

    #[test]
    fn test_complex_value_with_inherited_properties() {
        let types = data_types();
        let converter = DataTypeValidatorConverter::instance();
        let value = json!({"number": 31, "enabled": true, "cipher": "aes", "weights": ["1", 2]});
        let updated = converter
            .validate_and_update_value(&value, &types["org.SecurePort"], &types)
            .unwrap();
        assert_eq!(
            updated,
            json!({"number": 31, "enabled": true, "cipher": "aes", "weights": [1.0, 2.0]})
        );
        let quoted_number = json!({"number": "31"});
        assert!(!converter.is_valid_value(&quoted_number, &types["org.SecurePort"], &types));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let types = data_types();
        let value = json!({"number": 1, "colour": "red"});
        assert!(!DataTypeValidatorConverter::instance().is_valid_value(
            &value,
            &types["org.Port"],
            &types
        ));
    }

    #[test]
    fn test_nested_types_and_collections() {
        let types = data_types();
        let converter = DataTypeValidatorConverter::instance();
        let value = json!({
            "port": {"number": 8080, "tags": ["a", "b"]},
            "ports": {"admin": {"number": 8, "enabled": false, "weights": ["0.5"]}}
        });
        let updated = converter
            .validate_and_update_value(&value, &types["org.Node"], &types)
            .unwrap();
        assert_eq!(
            updated,
            json!({
                "port": {"number": 8080, "tags": ["a", "b"]},
                "ports": {"admin": {"number": 8, "enabled": false, "weights": [0.5]}}
            })
        );
        let invalid = json!({"ports": {"admin": {"number": "eight"}}});
        assert!(!converter.is_valid_value(&invalid, &types["org.Node"], &types));
    }

    #[test]
    fn test_collection_without_schema_is_rejected() {
        let types = data_types();
        let value = json!({"raw": [1, 2]});
        assert!(!DataTypeValidatorConverter::instance().is_valid_value(
            &value,
            &types["org.Node"],
            &types
        ));
    }

    #[test]
    fn test_scalar_derived_types() {
        let types = data_types();
        let converter = DataTypeValidatorConverter::instance();
        let count = &types["org.Count"];
        assert!(converter.is_valid_value(&Value::Null, count, &types));
        assert!(converter.is_valid_value(&json!(12), count, &types));
        assert!(!converter.is_valid_value(&json!("twelve"), count, &types));
        assert!(!converter.is_valid_value(&json!({"value": 12}), count, &types));
        assert!(!converter.is_valid_value(&json!([12]), &types["org.Name"], &types));
        assert!(converter.is_valid_value(&json!("name"), &types["org.Name"], &types));
    }

    #[test]
    fn test_scalar_derived_values_are_converted() {
        let types = data_types();
        let converter = DataTypeValidatorConverter::instance();
        let convert = |value: Value, name: &str| {
            converter
                .validate_and_update_value(&value, &types[name], &types)
                .unwrap()
        };
        assert_eq!(convert(json!(1), "org.Real"), json!(1.0));
        assert_eq!(convert(json!(2.5), "org.Real"), json!(2.5));
        assert_eq!(convert(json!(12), "org.Count"), json!(12));
        assert_eq!(convert(json!("2ghz"), "org.Clock"), json!("2 GHz"));
        assert_eq!(convert(json!("name"), "org.Name"), json!("name"));
        assert_eq!(convert(Value::Null, "org.Count"), Value::Null);
        assert!(!converter.is_valid_value(&json!("fast"), &types["org.Clock"], &types));
    }

    #[test]
    fn test_text_entry_points() {
        let types = data_types();
        let converter = DataTypeValidatorConverter::instance();
        let port = &types["org.Port"];
        assert!(converter.is_valid("", port, &types));
        assert!(!converter.is_valid("{number:", port, &types));
        assert_eq!(converter.validate_and_update("", port, &types).unwrap(), Value::Null);
        let secure_port = &types["org.SecurePort"];
        assert!(converter.is_valid(r#"{"number": "", "cipher": null}"#, secure_port, &types));
        assert!(!converter.is_valid(r#"{"enabled": null}"#, port, &types));
        assert!(!converter.is_valid(r#"{"number": null}"#, port, &types));
    }

    #[test]
    fn test_self_referencing_type_is_bounded() {
        let mut types = data_types();
        types.insert(
            "org.Tree".to_string(),
            DataTypeDefinition::new("org.Tree")
                .with_property(PropertyDefinition::new("child", "org.Tree")),
        );
        let mut value = json!({});
        for _ in 0..=MAX_DATA_TYPE_DEPTH + 1 {
            value = json!({ "child": value });
        }
        let err = DataTypeValidatorConverter::instance()
            .validate_and_update_value(&value, &types["org.Tree"], &types)
            .unwrap_err();
        assert_eq!(err.action_status(), "INVALID_PROPERTY_VALUE");
    }
}
