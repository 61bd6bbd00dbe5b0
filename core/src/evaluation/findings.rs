use crate::gemara::EvaluationResult;
use crate::ids::IdGenerator;
use crate::oscal::extensions::{find_trestle_prop, ASSESSMENT_RULE_ID_PROP, RESULT_PROP};
use crate::oscal::{
    Finding, FindingTarget, ObjectiveStatus, Observation, RelatedObservation, Resource,
    SubjectReference,
};
use std::collections::HashMap;

pub const NOT_SATISFIED: &str = "not-satisfied";
pub const STATEMENT_TARGET_TYPE: &str = "statement-id";

/// Findings keyed by target statement, at most one per target.
#[derive(Debug, Default)]
pub struct FindingSet {
    findings: Vec<Finding>,
    by_target: HashMap<String, usize>,
}

impl FindingSet {
    pub fn record(&mut self, observation_uuid: &str, targets: &[String], ids: &dyn IdGenerator) {
        for target in targets {
            let related = RelatedObservation {
                observation_uuid: observation_uuid.to_string(),
            };
            match self.by_target.get(target) {
                Some(&i) => self.findings[i].related_observations.push(related),
                None => {
                    self.by_target.insert(target.clone(), self.findings.len());
                    self.findings.push(Finding {
                        uuid: ids.next_id(),
                        title: target.clone(),
                        description: "Automated checks did not pass for this control statement"
                            .to_string(),
                        target: FindingTarget {
                            target_type: STATEMENT_TARGET_TYPE.to_string(),
                            target_id: target.clone(),
                            status: ObjectiveStatus {
                                state: NOT_SATISFIED.to_string(),
                            },
                        },
                        related_observations: vec![related],
                    });
                }
            }
        }
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// Back-matter resources for observation subjects; first title wins.
#[derive(Debug, Default)]
pub struct SubjectResources {
    resources: Vec<Resource>,
    seen: HashMap<String, usize>,
}

impl SubjectResources {
    pub fn remember(&mut self, subject: &SubjectReference) {
        if self.seen.contains_key(&subject.subject_uuid) {
            return;
        }
        self.seen
            .insert(subject.subject_uuid.clone(), self.resources.len());
        self.resources.push(Resource {
            uuid: subject.subject_uuid.clone(),
            title: subject.title.clone(),
            ..Resource::default()
        });
    }

    pub fn into_resources(self) -> Vec<Resource> {
        self.resources
    }
}

/// Walks the merged observations and raises a finding on every mapped
/// statement of a rule whose subject did not pass.
pub fn derive_findings(
    observations: &[Observation],
    targets_by_rule: &HashMap<String, Vec<String>>,
    ids: &dyn IdGenerator,
) -> (Vec<Finding>, Vec<Resource>) {
    let mut findings = FindingSet::default();
    let mut resources = SubjectResources::default();
    let passed = EvaluationResult::Passed.as_token();

    for observation in observations {
        if observation.props.is_empty() {
            continue;
        }
        let Some(rule) = find_trestle_prop(ASSESSMENT_RULE_ID_PROP, &observation.props) else {
            continue;
        };
        let Some(targets) = targets_by_rule.get(&rule.value) else {
            continue;
        };

        for subject in &observation.subjects {
            resources.remember(subject);
            let Some(result) = find_trestle_prop(RESULT_PROP, &subject.props) else {
                continue;
            };
            if result.value != passed {
                findings.record(&observation.uuid, targets, ids);
                break;
            }
        }
    }

    (findings.into_findings(), resources.into_resources())
}
