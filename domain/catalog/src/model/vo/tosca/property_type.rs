use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{
    converter::{
        BooleanConverter, FloatConverter, IntegerConverter, JsonConverter, ListConverter,
        MapConverter, PropertyValueConverter, RangeConverter, ScalarUnitConverter,
        StringConverter, ToscaStringConverter,
    },
    validator::{
        BooleanValidator, FloatValidator, IntegerValidator, JsonValidator, ListValidator,
        MapValidator, PropertyTypeValidator, RangeValidator, ScalarUnitKind, ScalarUnitValidator,
        StringValidator, TimestampValidator, VersionValidator,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToscaPropertyType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "timestamp")]
    Timestamp,
    #[serde(rename = "version")]
    Version,
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "scalar-unit.size")]
    ScalarUnitSize,
    #[serde(rename = "scalar-unit.time")]
    ScalarUnitTime,
    #[serde(rename = "scalar-unit.frequency")]
    ScalarUnitFrequency,
    #[serde(rename = "scalar-unit.bitrate")]
    ScalarUnitBitrate,
}

struct Strategy {
    validator: Box<dyn PropertyTypeValidator>,
    converter: Box<dyn PropertyValueConverter>,
}

impl Strategy {
    fn new(
        validator: impl PropertyTypeValidator + 'static,
        converter: impl PropertyValueConverter + 'static,
    ) -> Self {
        Self {
            validator: Box::new(validator),
            converter: Box::new(converter),
        }
    }
}

const ALL: [ToscaPropertyType; 14] = [
    ToscaPropertyType::String,
    ToscaPropertyType::Integer,
    ToscaPropertyType::Float,
    ToscaPropertyType::Boolean,
    ToscaPropertyType::Timestamp,
    ToscaPropertyType::Version,
    ToscaPropertyType::Range,
    ToscaPropertyType::Json,
    ToscaPropertyType::List,
    ToscaPropertyType::Map,
    ToscaPropertyType::ScalarUnitSize,
    ToscaPropertyType::ScalarUnitTime,
    ToscaPropertyType::ScalarUnitFrequency,
    ToscaPropertyType::ScalarUnitBitrate,
];

static TYPE_NAMES: Lazy<HashMap<&'static str, ToscaPropertyType>> =
    Lazy::new(|| ALL.iter().map(|t| (t.type_name(), *t)).collect());

static STRATEGIES: Lazy<HashMap<ToscaPropertyType, Strategy>> = Lazy::new(|| {
    use ToscaPropertyType::*;
    ALL.iter()
        .map(|t| {
            let strategy = match t {
                String => Strategy::new(StringValidator, StringConverter),
                Integer => Strategy::new(IntegerValidator, IntegerConverter),
                Float => Strategy::new(FloatValidator, FloatConverter),
                Boolean => Strategy::new(BooleanValidator, BooleanConverter),
                Timestamp => Strategy::new(TimestampValidator, ToscaStringConverter),
                Version => Strategy::new(VersionValidator, ToscaStringConverter),
                Range => Strategy::new(RangeValidator, RangeConverter),
                Json => Strategy::new(JsonValidator, JsonConverter),
                List => Strategy::new(ListValidator, ListConverter),
                Map => Strategy::new(MapValidator, MapConverter),
                ScalarUnitSize => Strategy::new(
                    ScalarUnitValidator(ScalarUnitKind::Size),
                    ScalarUnitConverter(ScalarUnitKind::Size),
                ),
                ScalarUnitTime => Strategy::new(
                    ScalarUnitValidator(ScalarUnitKind::Time),
                    ScalarUnitConverter(ScalarUnitKind::Time),
                ),
                ScalarUnitFrequency => Strategy::new(
                    ScalarUnitValidator(ScalarUnitKind::Frequency),
                    ScalarUnitConverter(ScalarUnitKind::Frequency),
                ),
                ScalarUnitBitrate => Strategy::new(
                    ScalarUnitValidator(ScalarUnitKind::Bitrate),
                    ScalarUnitConverter(ScalarUnitKind::Bitrate),
                ),
            };
            (*t, strategy)
        })
        .collect()
});

impl ToscaPropertyType {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Version => "version",
            Self::Range => "range",
            Self::Json => "json",
            Self::List => "list",
            Self::Map => "map",
            Self::ScalarUnitSize => "scalar-unit.size",
            Self::ScalarUnitTime => "scalar-unit.time",
            Self::ScalarUnitFrequency => "scalar-unit.frequency",
            Self::ScalarUnitBitrate => "scalar-unit.bitrate",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        TYPE_NAMES.get(name).copied()
    }

    /// Whether a data type may derive from this primitive. Collections may not.
    pub fn is_derivable(&self) -> bool {
        !self.is_schema_bearing()
    }

    /// Collections carrying an element schema.
    pub fn is_schema_bearing(&self) -> bool {
        matches!(self, Self::List | Self::Map)
    }

    /// Types accepting the ordering operators of a node filter.
    pub fn is_comparable(&self) -> bool {
        matches!(self, Self::String | Self::Integer | Self::Float)
    }

    pub fn validator(&self) -> &'static dyn PropertyTypeValidator {
        match STRATEGIES.get(self) {
            Some(strategy) => strategy.validator.as_ref(),
            None => &StringValidator,
        }
    }

    pub fn converter(&self) -> &'static dyn PropertyValueConverter {
        match STRATEGIES.get(self) {
            Some(strategy) => strategy.converter.as_ref(),
            None => &StringConverter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_name_round_trips() {
        for t in ALL {
            assert_eq!(ToscaPropertyType::from_type_name(t.type_name()), Some(t));
        }
        assert_eq!(ToscaPropertyType::from_type_name("tosca.datatypes.Root"), None);
    }

    #[test]
    fn test_registry_binds_matching_strategies() {
        let types = Default::default();
        assert!(ToscaPropertyType::Integer.validator().is_valid(Some("0x1F"), None, &types));
        assert!(!ToscaPropertyType::Integer.validator().is_valid(Some("1.5"), None, &types));
        assert_eq!(
            ToscaPropertyType::Integer.converter().convert("0x1F", None, &types),
            Some("31".to_string())
        );
        assert!(ToscaPropertyType::ScalarUnitSize
            .validator()
            .is_valid(Some("4 GiB"), None, &types));
        assert!(!ToscaPropertyType::ScalarUnitSize
            .validator()
            .is_valid(Some("4 GHz"), None, &types));
    }
}
