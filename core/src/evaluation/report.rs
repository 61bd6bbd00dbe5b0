use crate::error::CoreResult;
use crate::oscal::extensions::{find_trestle_prop, ASSESSMENT_RULE_ID_PROP};
use crate::oscal::AssessmentResults;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FindingRow {
    pub target_id: String,
    pub state: String,
    pub observation_count: usize,
    pub rule_ids: Vec<String>,
}

/// One row per finding across all results, sorted by target statement.
pub fn finding_rows(results: &AssessmentResults) -> Vec<FindingRow> {
    let mut rows = Vec::new();
    for result in &results.results {
        let rule_by_observation: HashMap<&str, &str> = result
            .observations
            .iter()
            .filter_map(|obs| {
                find_trestle_prop(ASSESSMENT_RULE_ID_PROP, &obs.props)
                    .map(|rule| (obs.uuid.as_str(), rule.value.as_str()))
            })
            .collect();

        for finding in &result.findings {
            let mut rule_ids: Vec<String> = finding
                .related_observations
                .iter()
                .filter_map(|rel| rule_by_observation.get(rel.observation_uuid.as_str()))
                .map(|rule| rule.to_string())
                .collect();
            rule_ids.sort();
            rule_ids.dedup();
            rows.push(FindingRow {
                target_id: finding.target.target_id.clone(),
                state: finding.target.status.state.clone(),
                observation_count: finding.related_observations.len(),
                rule_ids,
            });
        }
    }
    rows.sort_by(|a, b| a.target_id.cmp(&b.target_id));
    rows
}

pub fn render_findings_csv(results: &AssessmentResults) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(["target_id", "state", "observations", "rule_ids"])?;
    for row in finding_rows(results) {
        wtr.write_record([
            row.target_id,
            row.state,
            row.observation_count.to_string(),
            row.rule_ids.join(";"),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

pub fn render_findings_markdown(results: &AssessmentResults) -> String {
    let rows = finding_rows(results);
    let mut out = Vec::new();
    out.push("# Findings".to_string());
    out.push("".to_string());
    if rows.is_empty() {
        out.push("No failing control statements.".to_string());
        out.push("".to_string());
        return out.join("\n");
    }

    out.push("| Statement | State | Observations | Rules |".to_string());
    out.push("|---|---|---|---|".to_string());
    for row in rows {
        out.push(format!(
            "| {} | {} | {} | {} |",
            row.target_id,
            row.state,
            row.observation_count,
            row.rule_ids.join(", ")
        ));
    }
    out.push("".to_string());
    out.join("\n")
}
