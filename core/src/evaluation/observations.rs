use crate::gemara::ControlEvaluation;
use crate::ids::IdGenerator;
use crate::oscal::common::non_empty;
use crate::oscal::extensions::{
    trestle_prop, ASSESSMENT_CHECK_ID_PROP, ASSESSMENT_RULE_ID_PROP, REASON_PROP, RESULT_PROP,
    STEPS_EXECUTED_PROP,
};
use crate::oscal::{Observation, SubjectReference};
use std::collections::HashMap;

pub const OBSERVATION_METHOD: &str = "TEST-AUTOMATED";
pub const SUBJECT_TYPE: &str = "resource";

/// Subject uuids memoized by requirement id for a whole conversion run, so
/// the same requirement seen in several evaluations shares one subject.
#[derive(Debug, Default)]
pub struct SubjectRegistry {
    uuids: HashMap<String, String>,
}

impl SubjectRegistry {
    pub fn subject_uuid(&mut self, requirement_id: &str, ids: &dyn IdGenerator) -> String {
        self.uuids
            .entry(requirement_id.to_string())
            .or_insert_with(|| ids.next_id())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.uuids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }
}

/// One observation per assessment. The source carries no timestamp, so
/// every observation is stamped with `collected`.
pub fn observations_from_evaluation(
    evaluation: &ControlEvaluation,
    subjects: &mut SubjectRegistry,
    ids: &dyn IdGenerator,
    collected: &str,
) -> Vec<Observation> {
    evaluation
        .assessments
        .iter()
        .map(|assessment| {
            let result = assessment.result.as_token();
            let subject = SubjectReference {
                subject_uuid: subjects.subject_uuid(&assessment.requirement_id, ids),
                subject_type: SUBJECT_TYPE.to_string(),
                title: non_empty(&assessment.message),
                props: vec![trestle_prop(RESULT_PROP, result)],
            };

            Observation {
                uuid: ids.next_id(),
                title: Some(assessment.requirement_id.clone()),
                description: assessment.description.clone(),
                methods: vec![OBSERVATION_METHOD.to_string()],
                collected: collected.to_string(),
                props: vec![
                    trestle_prop(ASSESSMENT_RULE_ID_PROP, assessment.requirement_id.as_str()),
                    // no separate check id in the source; reuse the requirement
                    trestle_prop(ASSESSMENT_CHECK_ID_PROP, assessment.requirement_id.as_str()),
                    trestle_prop(RESULT_PROP, result),
                    trestle_prop(REASON_PROP, assessment.message.as_str()),
                    trestle_prop(STEPS_EXECUTED_PROP, assessment.steps_executed.to_string()),
                ],
                subjects: vec![subject],
            }
        })
        .collect()
}
