use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named part of the candidate's design document.
/// `ALL` fixes the display and context-summary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Assumptions,
    FunctionalRequirements,
    NonFunctionalRequirements,
    ResourceEstimation,
    HighLevelDesign,
    DeepDive,
}

impl SectionKey {
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Assumptions,
        SectionKey::FunctionalRequirements,
        SectionKey::NonFunctionalRequirements,
        SectionKey::ResourceEstimation,
        SectionKey::HighLevelDesign,
        SectionKey::DeepDive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionKey::Assumptions => "Assumptions",
            SectionKey::FunctionalRequirements => "Functional Requirements",
            SectionKey::NonFunctionalRequirements => "Non-Functional Requirements",
            SectionKey::ResourceEstimation => "Resource Estimation",
            SectionKey::HighLevelDesign => "High-Level Design",
            SectionKey::DeepDive => "Deep Dive",
        }
    }

    /// Wire name, as used in URLs and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Assumptions => "assumptions",
            SectionKey::FunctionalRequirements => "functionalRequirements",
            SectionKey::NonFunctionalRequirements => "nonFunctionalRequirements",
            SectionKey::ResourceEstimation => "resourceEstimation",
            SectionKey::HighLevelDesign => "highLevelDesign",
            SectionKey::DeepDive => "deepDive",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSectionKey(pub String);

impl FromStr for SectionKey {
    type Err = UnknownSectionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSectionKey(s.to_string()))
    }
}
