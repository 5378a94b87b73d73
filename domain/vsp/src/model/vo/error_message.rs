use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorLevel {
    Error,
    Warning,
    Info,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub level: ErrorLevel,
    pub message: String,
}

impl ErrorMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ErrorLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ErrorLevel::Warning,
            message: message.into(),
        }
    }
}

pub fn add_structure_error(
    errors: &mut BTreeMap<String, Vec<ErrorMessage>>,
    key: &str,
    message: ErrorMessage,
) {
    errors.entry(key.to_owned()).or_default().push(message);
}
