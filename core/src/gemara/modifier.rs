use super::value::ParameterValue;
use serde::{Deserialize, Serialize};

/// Layer 3 policy adjustment to a catalog parameter, e.g. tightening
/// `main_branch_min_approvals` to 2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ParameterModifier {
    pub target_id: String,
    #[serde(default)]
    pub mod_type: String,
    pub value: ParameterValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}
