use super::observations::OBSERVATION_METHOD;
use crate::error::CoreResult;
use crate::ids::IdGenerator;
use crate::oscal::metadata::now_rfc3339;
use crate::oscal::{
    AssessmentPlan, AssessmentResult, AssessmentResults, ImportAp, Metadata, Observation,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Merges an assessment plan with observations into an assessment-results
/// shell holding a single result.
pub trait PlanTransformer: Send + Sync {
    fn transform(
        &self,
        plan: &AssessmentPlan,
        plan_href: &str,
        observations: Vec<Observation>,
        ids: &dyn IdGenerator,
    ) -> CoreResult<AssessmentResults>;
}

/// Scopes observations to the plan's activities: observations for unknown
/// activities are dropped and activities without results get an empty
/// placeholder observation. Plans without activities accept everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPlanTransformer;

pub const PLACEHOLDER_DESCRIPTION: &str = "No results received for activity";

impl PlanTransformer for DefaultPlanTransformer {
    fn transform(
        &self,
        plan: &AssessmentPlan,
        plan_href: &str,
        observations: Vec<Observation>,
        ids: &dyn IdGenerator,
    ) -> CoreResult<AssessmentResults> {
        let now = now_rfc3339()?;
        let observations = scope_observations(plan, observations, ids, &now);

        let mut metadata = Metadata::sample(now.clone());
        metadata.title = "Automated Assessment Results".to_string();
        if !plan.metadata.version.is_empty() {
            metadata.version = plan.metadata.version.clone();
        }

        let result = AssessmentResult {
            uuid: ids.next_id(),
            title: "Automated Assessment Result".to_string(),
            description: "Assessment results generated from control evaluations".to_string(),
            start: now,
            reviewed_controls: plan.reviewed_controls.clone(),
            observations,
            findings: Vec::new(),
        };

        Ok(AssessmentResults {
            uuid: ids.next_id(),
            metadata,
            import_ap: ImportAp {
                href: plan_href.to_string(),
            },
            results: vec![result],
            back_matter: None,
        })
    }
}

fn scope_observations(
    plan: &AssessmentPlan,
    observations: Vec<Observation>,
    ids: &dyn IdGenerator,
    collected: &str,
) -> Vec<Observation> {
    let activities = plan.activities();
    if activities.is_empty() {
        return observations;
    }

    let in_scope: HashSet<&str> = activities.iter().map(|a| a.title.as_str()).collect();
    let total = observations.len();
    let mut kept: Vec<Observation> = observations
        .into_iter()
        .filter(|obs| obs.title.as_deref().is_some_and(|t| in_scope.contains(t)))
        .collect();
    if kept.len() < total {
        warn!(
            dropped = total - kept.len(),
            "observations outside the plan's activities were dropped"
        );
    }

    let mut seen: HashSet<String> = kept.iter().filter_map(|o| o.title.clone()).collect();
    for activity in activities {
        if seen.insert(activity.title.clone()) {
            debug!(activity = %activity.title, "no results for planned activity");
            kept.push(Observation {
                uuid: ids.next_id(),
                title: Some(activity.title.clone()),
                description: PLACEHOLDER_DESCRIPTION.to_string(),
                methods: vec![OBSERVATION_METHOD.to_string()],
                collected: collected.to_string(),
                props: Vec::new(),
                subjects: Vec::new(),
            });
        }
    }
    kept
}
