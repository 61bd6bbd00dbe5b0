use super::findings::derive_findings;
use super::observations::{observations_from_evaluation, SubjectRegistry};
use super::transformer::{DefaultPlanTransformer, PlanTransformer};
use crate::error::{CoreError, CoreResult};
use crate::gemara::ControlEvaluation;
use crate::ids::{IdGenerator, UlidUuidGenerator};
use crate::oscal::metadata::now_rfc3339;
use crate::oscal::{AssessmentPlan, AssessmentResults, BackMatter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Converts evaluations against a plan into assessment results, with the
/// id source and plan transformer swappable.
pub struct ResultsConverter {
    ids: Arc<dyn IdGenerator>,
    transformer: Box<dyn PlanTransformer>,
}

impl Default for ResultsConverter {
    fn default() -> Self {
        Self {
            ids: Arc::new(UlidUuidGenerator),
            transformer: Box::new(DefaultPlanTransformer),
        }
    }
}

impl ResultsConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_transformer(mut self, transformer: Box<dyn PlanTransformer>) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn convert(
        &self,
        plan_href: &str,
        plan: &AssessmentPlan,
        evaluations: &[ControlEvaluation],
    ) -> CoreResult<AssessmentResults> {
        let ids = self.ids.as_ref();
        let targets_by_rule = statement_targets_by_activity(plan);

        let collected = now_rfc3339()?;
        let mut subjects = SubjectRegistry::default();
        let mut observations = Vec::new();
        for evaluation in evaluations {
            observations.extend(observations_from_evaluation(
                evaluation,
                &mut subjects,
                ids,
                &collected,
            ));
        }
        debug!(
            observations = observations.len(),
            subjects = subjects.len(),
            "built observations from evaluations"
        );

        let mut results = self
            .transformer
            .transform(plan, plan_href, observations, ids)?;
        if results.results.len() != 1 {
            return Err(CoreError::Shape(format!(
                "assessment results must hold exactly one result, got {}",
                results.results.len()
            )));
        }

        let result = &mut results.results[0];
        let (findings, resources) = derive_findings(&result.observations, &targets_by_rule, ids);
        debug!(
            findings = findings.len(),
            resources = resources.len(),
            "derived findings"
        );
        result.findings = findings;
        if !resources.is_empty() {
            results.back_matter = Some(BackMatter { resources });
        }
        Ok(results)
    }
}

/// Convenience entry point using ULID-backed ids and the default transformer.
pub fn to_assessment_results(
    plan_href: &str,
    plan: &AssessmentPlan,
    evaluations: &[ControlEvaluation],
) -> CoreResult<AssessmentResults> {
    ResultsConverter::default().convert(plan_href, plan, evaluations)
}

/// Activity title → `{control}_smt` statement ids of its related controls.
/// Activity titles are expected to match evaluation requirement ids.
pub fn statement_targets_by_activity(plan: &AssessmentPlan) -> HashMap<String, Vec<String>> {
    plan.activities()
        .iter()
        .map(|activity| {
            let targets = activity
                .related_controls
                .iter()
                .flat_map(|related| related.included_control_ids())
                .map(|control_id| format!("{}_smt", control_id))
                .collect();
            (activity.title.clone(), targets)
        })
        .collect()
}
