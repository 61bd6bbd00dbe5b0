pub mod checklist;

use crate::error::CoreResult;
use crate::oscal::OscalModels;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const PASS: &str = "PASS";
pub const FAIL: &str = "FAIL";
pub const NOT_APPLICABLE: &str = "NOT_APPLICABLE";
const BLOCKER: &str = "BLOCKER";

const UUID_PATTERN: &str =
    r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[45][0-9A-Fa-f]{3}-[89ABab][0-9A-Fa-f]{3}-[0-9A-Fa-f]{12}$";
const TOKEN_PATTERN: &str = r"^(\p{L}|_)(\p{L}|\p{N}|[.\-_])*$";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub severity: String,
    pub result: String, // PASS|FAIL|NOT_APPLICABLE
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub checklist_version: String,
    pub overall: String, // PASS|FAIL
    pub checks: Vec<CheckResult>,
}

impl ValidationSummary {
    pub fn result_for_check(&self, check_id: &str) -> (String, String) {
        for c in &self.checks {
            if c.check_id == check_id {
                return (c.result.clone(), c.message.clone());
            }
        }
        (
            FAIL.to_string(),
            format!("missing check result for {}", check_id),
        )
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| c.result == FAIL)
    }

    pub fn passed(&self) -> bool {
        self.overall == PASS
    }
}

/// Structural checks over generated documents. Full schema validation is
/// left to external tooling.
pub struct DocumentValidator {
    checklist: checklist::Checklist,
    uuid_re: Regex,
    token_re: Regex,
}

impl DocumentValidator {
    pub fn new_v1() -> CoreResult<Self> {
        Ok(Self {
            checklist: checklist::checklist_v1()?,
            uuid_re: Regex::new(UUID_PATTERN)
                .map_err(|e| crate::error::CoreError::InvalidInput(e.to_string()))?,
            token_re: Regex::new(TOKEN_PATTERN)
                .map_err(|e| crate::error::CoreError::InvalidInput(e.to_string()))?,
        })
    }

    pub fn validate_json_str(&self, raw: &str) -> CoreResult<ValidationSummary> {
        let models: OscalModels = serde_json::from_str(raw)?;
        self.validate(&models)
    }

    pub fn validate(&self, models: &OscalModels) -> CoreResult<ValidationSummary> {
        let tree = serde_json::to_value(models)?;

        let outcomes: Vec<(&str, Option<Vec<String>>)> = vec![
            ("CHK.UUID.FORMAT", Some(self.check_uuid_format(&tree))),
            ("CHK.UUID.UNIQUE", Some(check_uuid_unique(&tree))),
            ("CHK.METADATA.REQUIRED", applicable(models, check_metadata(&tree))),
            ("CHK.PROPS.TOKEN", Some(self.check_props(&tree))),
            (
                "CHK.COMPONENT.IMPLEMENTED_REQUIREMENTS",
                models
                    .component_definition
                    .as_ref()
                    .map(|_| check_implemented_requirements(models)),
            ),
            (
                "CHK.RESULTS.OBSERVATION_REFS",
                models
                    .assessment_results
                    .as_ref()
                    .map(|_| check_observation_refs(models)),
            ),
            (
                "CHK.CATALOG.RESOURCE_LINKS",
                models.catalog.as_ref().map(|_| check_resource_links(models)),
            ),
        ];

        let checks: Vec<CheckResult> = outcomes
            .into_iter()
            .map(|(check_id, problems)| self.to_check_result(check_id, problems))
            .collect();

        let blocked = checks
            .iter()
            .any(|c| c.result == FAIL && c.severity == BLOCKER);
        Ok(ValidationSummary {
            checklist_version: self.checklist.checklist_version.clone(),
            overall: if blocked { FAIL } else { PASS }.to_string(),
            checks,
        })
    }

    fn to_check_result(&self, check_id: &str, problems: Option<Vec<String>>) -> CheckResult {
        let (result, message) = match problems {
            None => (NOT_APPLICABLE, "document not present".to_string()),
            Some(p) if p.is_empty() => (PASS, "ok".to_string()),
            Some(p) => (FAIL, p.join("; ")),
        };
        CheckResult {
            check_id: check_id.to_string(),
            severity: self.checklist.severity_of(check_id).to_string(),
            result: result.to_string(),
            message,
        }
    }

    fn check_uuid_format(&self, tree: &Value) -> Vec<String> {
        let mut problems = Vec::new();
        walk(tree, &mut |key, value| {
            let candidates: Vec<&str> = match value {
                Value::String(s) if key == "uuid" || key.ends_with("-uuid") => vec![s.as_str()],
                Value::Array(items) if key.ends_with("-uuids") => {
                    items.iter().filter_map(Value::as_str).collect()
                }
                _ => Vec::new(),
            };
            for candidate in candidates {
                if !self.uuid_re.is_match(candidate) {
                    problems.push(format!("{} '{}' is not a valid uuid", key, candidate));
                }
            }
        });
        problems
    }

    fn check_props(&self, tree: &Value) -> Vec<String> {
        let mut problems = Vec::new();
        walk(tree, &mut |key, value| {
            let Value::Array(props) = value else { return };
            if key != "props" {
                return;
            }
            for prop in props {
                let name = prop.get("name").and_then(Value::as_str).unwrap_or_default();
                if !self.token_re.is_match(name) {
                    problems.push(format!("property name '{}' is not a token", name));
                }
                if let Some(ns) = prop.get("ns").and_then(Value::as_str) {
                    if url::Url::parse(ns).is_err() {
                        problems.push(format!("property namespace '{}' is not a URI", ns));
                    }
                }
            }
        });
        problems
    }
}

fn applicable(models: &OscalModels, problems: Vec<String>) -> Option<Vec<String>> {
    if models.is_empty() {
        None
    } else {
        Some(problems)
    }
}

/// Visits every object member of the tree with its key.
fn walk<'a>(value: &'a Value, visit: &mut dyn FnMut(&'a str, &'a Value)) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visit(key.as_str(), child);
                walk(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visit);
            }
        }
        _ => {}
    }
}

fn check_uuid_unique(tree: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    walk(tree, &mut |key, value| {
        if let (true, Some(uuid)) = (key == "uuid", value.as_str()) {
            if !seen.insert(uuid) {
                duplicates.insert(uuid.to_string());
            }
        }
    });
    duplicates
        .into_iter()
        .map(|uuid| format!("uuid {} is used more than once", uuid))
        .collect()
}

fn check_metadata(tree: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(docs) = tree.as_object() else {
        return problems;
    };
    for (doc_key, doc) in docs {
        let Some(metadata) = doc.get("metadata") else {
            problems.push(format!("{} has no metadata", doc_key));
            continue;
        };
        for field in ["title", "version", "oscal-version"] {
            let present = metadata
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if !present {
                problems.push(format!("{} metadata.{} is empty", doc_key, field));
            }
        }
        for field in ["last-modified", "published"] {
            match metadata.get(field).and_then(Value::as_str) {
                Some(stamp) if OffsetDateTime::parse(stamp, &Rfc3339).is_err() => {
                    problems.push(format!("{} metadata.{} '{}' is not RFC 3339", doc_key, field, stamp));
                }
                None if field == "last-modified" => {
                    problems.push(format!("{} metadata.last-modified is missing", doc_key));
                }
                _ => {}
            }
        }
    }
    problems
}

fn check_implemented_requirements(models: &OscalModels) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(definition) = &models.component_definition {
        for component in &definition.components {
            for set in &component.control_implementations {
                if set.implemented_requirements.is_empty() {
                    problems.push(format!(
                        "component '{}' control implementation {} has no implemented requirements",
                        component.title, set.uuid
                    ));
                }
            }
        }
    }
    problems
}

fn check_observation_refs(models: &OscalModels) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(results) = &models.assessment_results {
        for result in &results.results {
            let known: HashSet<&str> = result.observations.iter().map(|o| o.uuid.as_str()).collect();
            for finding in &result.findings {
                for related in &finding.related_observations {
                    if !known.contains(related.observation_uuid.as_str()) {
                        problems.push(format!(
                            "finding {} references unknown observation {}",
                            finding.uuid, related.observation_uuid
                        ));
                    }
                }
            }
        }
    }
    problems
}

fn check_resource_links(models: &OscalModels) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(catalog) = &models.catalog {
        let resources: HashSet<&str> = catalog
            .back_matter
            .iter()
            .flat_map(|b| b.resources.iter())
            .map(|r| r.uuid.as_str())
            .collect();
        for control in catalog.all_controls() {
            for link in &control.links {
                if link.rel.as_deref() != Some("reference") {
                    continue;
                }
                let target = link.href.trim_start_matches('#');
                if !resources.contains(target) {
                    problems.push(format!(
                        "control {} links to missing resource {}",
                        control.id, link.href
                    ));
                }
            }
        }
    }
    problems
}
