use serde_json::{Map, Number, Value};

use super::{
    element_text, unquote,
    validator::{parse_boolean, parse_float, parse_integer, parse_range, ScalarUnitKind, UNBOUNDED},
    DataTypeValidatorConverter, ToscaPropertyType,
};
use crate::model::entity::DataTypes;

/// Produces the canonical JSON text of an already validated value.
///
/// `None` means the value has no canonical form and is stored as null.
pub trait PropertyValueConverter: Send + Sync {
    fn convert(&self, value: &str, inner_type: Option<&str>, data_types: &DataTypes)
        -> Option<String>;
}

fn json_string(value: &str) -> Option<String> {
    serde_json::to_string(value).ok()
}

pub struct StringConverter;

impl PropertyValueConverter for StringConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        json_string(&unquote(value))
    }
}

pub struct IntegerConverter;

impl PropertyValueConverter for IntegerConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        parse_integer(value).map(|i| i.to_string())
    }
}

pub struct FloatConverter;

impl PropertyValueConverter for FloatConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        parse_float(value)
            .and_then(Number::from_f64)
            .map(|n| n.to_string())
    }
}

pub struct BooleanConverter;

impl PropertyValueConverter for BooleanConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        parse_boolean(value).map(|b| b.to_string())
    }
}

/// Trimmed string form, used by timestamps and versions.
pub struct ToscaStringConverter;

impl PropertyValueConverter for ToscaStringConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        json_string(unquote(value).trim())
    }
}

pub struct ScalarUnitConverter(pub ScalarUnitKind);

impl PropertyValueConverter for ScalarUnitConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        let value = unquote(value);
        let (number, unit) = self.0.parse(&value)?;
        json_string(&format!("{number} {unit}"))
    }
}

pub struct RangeConverter;

impl PropertyValueConverter for RangeConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        let (lower, upper) = parse_range(value)?;
        let upper = match upper {
            Some(upper) => Value::from(upper),
            None => Value::from(UNBOUNDED),
        };
        serde_json::to_string(&Value::Array(vec![Value::from(lower), upper])).ok()
    }
}

pub struct JsonConverter;

impl PropertyValueConverter for JsonConverter {
    fn convert(&self, value: &str, _: Option<&str>, _: &DataTypes) -> Option<String> {
        serde_json::from_str::<Value>(value)
            .ok()
            .and_then(|v| serde_json::to_string(&v).ok())
    }
}

/// Converts one collection element; complex elements go through the data-type converter.
fn convert_element(element: &Value, inner_type: &str, data_types: &DataTypes) -> Option<Value> {
    if let Some(primitive) = ToscaPropertyType::from_type_name(inner_type) {
        let Some(text) = element_text(element) else {
            return Some(Value::Null);
        };
        if text.is_empty() {
            return Some(Value::String(text));
        }
        return match primitive.converter().convert(&text, None, data_types) {
            Some(converted) => serde_json::from_str(&converted).ok(),
            None => Some(Value::Null),
        };
    }
    let data_type = data_types.get(inner_type)?;
    DataTypeValidatorConverter::instance()
        .validate_and_update_value(element, data_type, data_types)
        .ok()
}

pub struct ListConverter;

impl PropertyValueConverter for ListConverter {
    fn convert(
        &self,
        value: &str,
        inner_type: Option<&str>,
        data_types: &DataTypes,
    ) -> Option<String> {
        let inner_type = inner_type?;
        let Ok(Value::Array(elements)) = serde_json::from_str::<Value>(value) else {
            return None;
        };
        let converted = elements
            .iter()
            .map(|element| convert_element(element, inner_type, data_types))
            .collect::<Option<Vec<_>>>()?;
        serde_json::to_string(&converted).ok()
    }
}

pub struct MapConverter;

impl PropertyValueConverter for MapConverter {
    fn convert(
        &self,
        value: &str,
        inner_type: Option<&str>,
        data_types: &DataTypes,
    ) -> Option<String> {
        let inner_type = inner_type?;
        let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(value) else {
            return None;
        };
        let converted = entries
            .iter()
            .map(|(key, element)| {
                convert_element(element, inner_type, data_types).map(|v| (key.to_owned(), v))
            })
            .collect::<Option<Map<String, Value>>>()?;
        serde_json::to_string(&converted).ok()
    }
}
