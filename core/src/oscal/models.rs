use super::assessment::{AssessmentPlan, AssessmentResults};
use super::catalog::Catalog;
use super::component::ComponentDefinition;
use serde::{Deserialize, Serialize};

/// Single-document envelope, keyed the way OSCAL JSON files are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct OscalModels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_definition: Option<ComponentDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_plan: Option<AssessmentPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_results: Option<AssessmentResults>,
}

impl From<Catalog> for OscalModels {
    fn from(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
            ..Self::default()
        }
    }
}

impl From<ComponentDefinition> for OscalModels {
    fn from(definition: ComponentDefinition) -> Self {
        Self {
            component_definition: Some(definition),
            ..Self::default()
        }
    }
}

impl From<AssessmentResults> for OscalModels {
    fn from(results: AssessmentResults) -> Self {
        Self {
            assessment_results: Some(results),
            ..Self::default()
        }
    }
}

impl OscalModels {
    pub fn is_empty(&self) -> bool {
        self.catalog.is_none()
            && self.component_definition.is_none()
            && self.assessment_plan.is_none()
            && self.assessment_results.is_none()
    }
}
