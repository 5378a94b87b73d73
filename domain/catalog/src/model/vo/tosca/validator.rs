use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{element_text, unquote, DataTypeValidatorConverter, ToscaPropertyType};
use crate::model::entity::DataTypes;

pub const STRING_MAXIMUM_LENGTH: usize = 2500;

/// Checks the textual form of a primitive value.
///
/// `value` is `None` when the value is absent. `inner_type` carries the
/// element type for collections.
pub trait PropertyTypeValidator: Send + Sync {
    fn is_valid(&self, value: Option<&str>, inner_type: Option<&str>, data_types: &DataTypes)
        -> bool;
}

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(\d+|0x[0-9a-fA-F]+|0o[0-7]+)$").unwrap());
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?f?$").unwrap());
static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+(\.\d+(\.[A-Za-z0-9_]+(-\d+)?)?)?$").unwrap()
});
static SCALAR_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-+]?\d+(\.\d+)?)\s*([A-Za-z]+)\s*$").unwrap());

const BOOLEAN_TRUE: [&str; 6] = ["true", "t", "on", "yes", "y", "1"];
const BOOLEAN_FALSE: [&str; 6] = ["false", "f", "off", "no", "n", "0"];

pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if !INTEGER.is_match(value) {
        return None;
    }
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let magnitude = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(octal) = digits.strip_prefix("0o") {
        i64::from_str_radix(octal, 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

pub(crate) fn parse_float(value: &str) -> Option<f64> {
    let value = value.trim();
    if !FLOAT.is_match(value) {
        return None;
    }
    value.trim_end_matches('f').parse::<f64>().ok().filter(|f| f.is_finite())
}

pub(crate) fn parse_boolean(value: &str) -> Option<bool> {
    let lower = value.trim().to_lowercase();
    if BOOLEAN_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if BOOLEAN_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub struct StringValidator;

impl PropertyTypeValidator for StringValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        value.map_or(true, |v| v.chars().count() <= STRING_MAXIMUM_LENGTH)
    }
}

pub struct IntegerValidator;

impl PropertyTypeValidator for IntegerValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        match value {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => parse_integer(v).is_some(),
        }
    }
}

pub struct FloatValidator;

impl PropertyTypeValidator for FloatValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        match value {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => parse_float(v).is_some(),
        }
    }
}

pub struct BooleanValidator;

impl PropertyTypeValidator for BooleanValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        match value {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => parse_boolean(v).is_some(),
        }
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD hh:mm:ss[.f]` and plain dates.
pub struct TimestampValidator;

impl PropertyTypeValidator for TimestampValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        let Some(value) = value else {
            return true;
        };
        let value = unquote(value);
        let value = value.trim();
        value.is_empty()
            || chrono::DateTime::parse_from_rfc3339(value).is_ok()
            || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").is_ok()
            || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    }
}

/// `<major>.<minor>[.<fix>[.<qualifier>[-<build>]]]`
pub struct VersionValidator;

impl PropertyTypeValidator for VersionValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        let Some(value) = value else {
            return true;
        };
        let value = unquote(value);
        value.is_empty() || VERSION.is_match(value.trim())
    }
}

pub(crate) const UNBOUNDED: &str = "UNBOUNDED";

/// Lower and upper bound of a `range`; the upper bound may be `UNBOUNDED`.
pub(crate) fn parse_range(value: &str) -> Option<(i64, Option<i64>)> {
    let Ok(Value::Array(bounds)) = serde_json::from_str::<Value>(value) else {
        return None;
    };
    let [lower, upper] = bounds.as_slice() else {
        return None;
    };
    let lower = parse_integer(&element_text(lower)?)?;
    let upper = element_text(upper)?;
    if upper == UNBOUNDED {
        return Some((lower, None));
    }
    let upper = parse_integer(&upper)?;
    (lower <= upper).then_some((lower, Some(upper)))
}

pub struct RangeValidator;

impl PropertyTypeValidator for RangeValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        match value {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => parse_range(v).is_some(),
        }
    }
}

pub struct JsonValidator;

impl PropertyTypeValidator for JsonValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        match value {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => serde_json::from_str::<Value>(v).is_ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarUnitKind {
    Size,
    Time,
    Frequency,
    Bitrate,
}

impl ScalarUnitKind {
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Self::Size => &[
                "B", "kB", "KiB", "MB", "MiB", "GB", "GiB", "TB", "TiB",
            ],
            Self::Time => &["d", "h", "m", "s", "ms", "us", "ns"],
            Self::Frequency => &["Hz", "kHz", "MHz", "GHz"],
            Self::Bitrate => &[
                "bps", "Kbps", "Kibps", "Mbps", "Mibps", "Gbps", "Gibps", "Tbps", "Tibps",
            ],
        }
    }

    /// Canonical spelling of `unit`. Bitrate units are case sensitive.
    pub fn canonical_unit(&self, unit: &str) -> Option<&'static str> {
        self.units().iter().copied().find(|known| match self {
            Self::Bitrate => *known == unit,
            _ => known.eq_ignore_ascii_case(unit),
        })
    }

    /// Splits `<number> <unit>` and resolves the unit.
    pub(crate) fn parse<'a>(&self, value: &'a str) -> Option<(&'a str, &'static str)> {
        let captures = SCALAR_UNIT.captures(value)?;
        let number = captures.get(1)?.as_str();
        let unit = self.canonical_unit(captures.get(3)?.as_str())?;
        Some((number, unit))
    }
}

pub struct ScalarUnitValidator(pub ScalarUnitKind);

impl PropertyTypeValidator for ScalarUnitValidator {
    fn is_valid(&self, value: Option<&str>, _: Option<&str>, _: &DataTypes) -> bool {
        let Some(value) = value else {
            return true;
        };
        let value = unquote(value);
        value.is_empty() || self.0.parse(&value).is_some()
    }
}

/// Checks one collection element against a primitive or a data type.
fn is_valid_element(element: &Value, inner_type: &str, data_types: &DataTypes) -> bool {
    if let Some(primitive) = ToscaPropertyType::from_type_name(inner_type) {
        if primitive.is_schema_bearing() {
            return false;
        }
        let text = match element {
            Value::Array(_) | Value::Object(_) if primitive != ToscaPropertyType::Json => {
                return false
            }
            _ => element_text(element),
        };
        return primitive
            .validator()
            .is_valid(text.as_deref(), None, data_types);
    }
    match data_types.get(inner_type) {
        Some(data_type) => {
            DataTypeValidatorConverter::instance().is_valid_value(element, data_type, data_types)
        }
        None => false,
    }
}

pub struct ListValidator;

impl PropertyTypeValidator for ListValidator {
    fn is_valid(
        &self,
        value: Option<&str>,
        inner_type: Option<&str>,
        data_types: &DataTypes,
    ) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return true;
        };
        let Some(inner_type) = inner_type else {
            return false;
        };
        match serde_json::from_str::<Value>(value) {
            Ok(Value::Array(elements)) => elements
                .iter()
                .all(|element| is_valid_element(element, inner_type, data_types)),
            _ => false,
        }
    }
}

pub struct MapValidator;

impl PropertyTypeValidator for MapValidator {
    fn is_valid(
        &self,
        value: Option<&str>,
        inner_type: Option<&str>,
        data_types: &DataTypes,
    ) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return true;
        };
        let Some(inner_type) = inner_type else {
            return false;
        };
        match serde_json::from_str::<Value>(value) {
            Ok(Value::Object(entries)) => entries.iter().all(|(key, element)| {
                !key.trim().is_empty() && is_valid_element(element, inner_type, data_types)
            }),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_forms() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-0x10"), Some(-16));
        assert_eq!(parse_integer("+0o17"), Some(15));
        assert_eq!(parse_integer("\"42\""), None);
        assert_eq!(parse_integer("4.2"), None);
    }

    #[test]
    fn test_boolean_spellings() {
        assert_eq!(parse_boolean("Yes"), Some(true));
        assert_eq!(parse_boolean("off"), Some(false));
        assert_eq!(parse_boolean("maybe"), None);
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(parse_range("[1, 5]"), Some((1, Some(5))));
        assert_eq!(parse_range(r#"[1, "UNBOUNDED"]"#), Some((1, None)));
        assert_eq!(parse_range("[5, 1]"), None);
        assert_eq!(parse_range("[1]"), None);
    }

    #[test]
    fn test_list_needs_element_type() {
        let types = DataTypes::new();
        assert!(!ListValidator.is_valid(Some("[1, 2]"), None, &types));
        assert!(ListValidator.is_valid(Some("[1, 2]"), Some("integer"), &types));
        assert!(!ListValidator.is_valid(Some(r#"[1, "two"]"#), Some("integer"), &types));
        assert!(ListValidator.is_valid(None, None, &types));
    }

    #[test]
    fn test_map_rejects_blank_keys() {
        let types = DataTypes::new();
        assert!(MapValidator.is_valid(Some(r#"{"a": "x"}"#), Some("string"), &types));
        assert!(!MapValidator.is_valid(Some(r#"{" ": "x"}"#), Some("string"), &types));
        assert!(!MapValidator.is_valid(Some("[]"), Some("string"), &types));
    }

    #[test]
    fn test_scalar_units_and_versions() {
        let types = DataTypes::new();
        let time = ScalarUnitValidator(ScalarUnitKind::Time);
        assert!(time.is_valid(Some("\"10 MS\""), None, &types));
        assert!(!time.is_valid(Some("10 parsecs"), None, &types));
        let bitrate = ScalarUnitValidator(ScalarUnitKind::Bitrate);
        assert!(bitrate.is_valid(Some("10 Mbps"), None, &types));
        assert!(!bitrate.is_valid(Some("10 mbps"), None, &types));
        assert!(VersionValidator.is_valid(Some("1.0.2.beta-3"), None, &types));
        assert!(!VersionValidator.is_valid(Some("v1"), None, &types));
        assert!(TimestampValidator.is_valid(Some("2001-12-14"), None, &types));
        assert!(TimestampValidator.is_valid(Some("2001-12-14T21:59:43.10-05:00"), None, &types));
        assert!(!TimestampValidator.is_valid(Some("yesterday"), None, &types));
    }
}
