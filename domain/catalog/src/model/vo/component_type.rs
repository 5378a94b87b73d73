use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Resource,
    Service,
    Product,
}

impl ComponentType {
    pub fn value(&self) -> &'static str {
        match self {
            Self::Resource => "Resource",
            Self::Service => "Service",
            Self::Product => "Product",
        }
    }
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
