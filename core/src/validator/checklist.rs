use crate::error::CoreResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub checklist_version: String,
    pub checks: Vec<ChecklistCheck>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistCheck {
    pub check_id: String,
    pub severity: String,
    pub description: String,
}

impl Checklist {
    pub fn severity_of(&self, check_id: &str) -> &str {
        self.checks
            .iter()
            .find(|c| c.check_id == check_id)
            .map(|c| c.severity.as_str())
            .unwrap_or("MAJOR")
    }
}

pub fn checklist_v1() -> CoreResult<Checklist> {
    let json = include_str!("checklist_v1.json");
    Ok(serde_json::from_str(json)?)
}
