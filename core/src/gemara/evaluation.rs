use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer 4 evaluation of one control: the outcome of each requirement check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ControlEvaluation {
    pub control_id: String,
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Assessment {
    pub requirement_id: String,
    pub description: String,
    pub message: String,
    pub steps_executed: i64,
    pub result: EvaluationResult,
    pub methods: Vec<AssessmentMethod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssessmentMethod {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum EvaluationResult {
    Passed,
    Failed,
    NeedsReview,
    NotApplicable,
    NotRun,
    #[default]
    Unknown,
}

impl EvaluationResult {
    /// Token written to the `result` observation property.
    pub fn as_token(&self) -> &'static str {
        match self {
            EvaluationResult::Passed => "passed",
            EvaluationResult::Failed => "failed",
            EvaluationResult::NeedsReview => "needs-review",
            EvaluationResult::NotApplicable => "not-applicable",
            EvaluationResult::NotRun => "not-run",
            EvaluationResult::Unknown => "unknown",
        }
    }
}

impl From<String> for EvaluationResult {
    fn from(raw: String) -> Self {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "passed" => EvaluationResult::Passed,
            "failed" => EvaluationResult::Failed,
            "needsreview" => EvaluationResult::NeedsReview,
            "notapplicable" => EvaluationResult::NotApplicable,
            "notrun" => EvaluationResult::NotRun,
            _ => EvaluationResult::Unknown,
        }
    }
}

impl From<EvaluationResult> for String {
    fn from(result: EvaluationResult) -> Self {
        result.to_string()
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvaluationResult::Passed => "Passed",
            EvaluationResult::Failed => "Failed",
            EvaluationResult::NeedsReview => "Needs Review",
            EvaluationResult::NotApplicable => "Not Applicable",
            EvaluationResult::NotRun => "Not Run",
            EvaluationResult::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}
