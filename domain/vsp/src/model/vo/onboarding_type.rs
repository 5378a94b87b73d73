use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingType {
    Zip,
    Csar,
    Manual,
    NetworkPackage,
}

impl OnboardingType {
    /// CSAR packages carry their own manifest.
    pub fn keeps_own_manifest(&self) -> bool {
        matches!(self, Self::Csar)
    }
}
