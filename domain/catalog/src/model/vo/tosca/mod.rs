//! TOSCA primitive property types and value checking.
//!
//! Every primitive kind is bound to one [`PropertyTypeValidator`] and one
//! [`PropertyValueConverter`]. Composite data types are checked by
//! [`DataTypeValidatorConverter`], which delegates leaves to the primitives.

mod converter;
mod data_type_validator;
mod property_type;
mod validator;

#[rustfmt::skip]
pub use {
    converter::PropertyValueConverter,
    data_type_validator::{DataTypeValidatorConverter, MAX_DATA_TYPE_DEPTH},
    property_type::ToscaPropertyType,
    validator::PropertyTypeValidator,
};

use std::borrow::Cow;

use serde_json::Value;

/// Strips one level of JSON string quoting, leaving other text untouched.
pub(crate) fn unquote(value: &str) -> Cow<'_, str> {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        if let Ok(Value::String(inner)) = serde_json::from_str::<Value>(trimmed) {
            return Cow::Owned(inner);
        }
    }
    Cow::Borrowed(value)
}

/// Text handed to an element validator: strings unquoted, null absent.
pub(crate) fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.to_owned()),
        other => Some(other.to_string()),
    }
}
