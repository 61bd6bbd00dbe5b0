use super::value::ParameterValue;
use serde::{Deserialize, Serialize};

/// Layer 2 control catalog annotated with assessment requirements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Catalog {
    pub metadata: CatalogMetadata,
    pub control_families: Vec<ControlFamily>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct CatalogMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub last_modified: String,
    /// Named external frameworks that guideline mappings may point into.
    pub mapping_references: Vec<MappingReference>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct MappingReference {
    pub id: String,
    pub title: String,
    pub version: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ControlFamily {
    pub id: String,
    pub title: String,
    pub description: String,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Control {
    pub id: String,
    pub title: String,
    pub objective: String,
    /// Applies to every assessment requirement of this control.
    pub guideline_mappings: Vec<Mapping>,
    pub assessment_requirements: Vec<AssessmentRequirement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssessmentRequirement {
    pub id: String,
    pub text: String,
    pub applicability: Vec<String>,
    pub recommendation: String,
    pub recommended_parameters: Vec<RecommendedParameter>,
    pub guideline_mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct RecommendedParameter {
    pub id: String,
    pub description: String,
    pub default: Option<ParameterValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Mapping {
    pub reference_id: String,
    pub identifiers: Vec<String>,
}
