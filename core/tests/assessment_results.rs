use gemara_oscal_core::error::{CoreError, CoreResult};
use gemara_oscal_core::evaluation::transformer::PLACEHOLDER_DESCRIPTION;
use gemara_oscal_core::evaluation::{PlanTransformer, ResultsConverter};
use gemara_oscal_core::gemara::ControlEvaluation;
use gemara_oscal_core::ids::{IdGenerator, SequentialIdGenerator};
use gemara_oscal_core::oscal::extensions::RESULT_PROP;
use gemara_oscal_core::oscal::{
    AssessmentPlan, AssessmentResults, ImportAp, Metadata, Observation, OscalModels,
};
use gemara_oscal_core::validator::DocumentValidator;
use serde_json::json;
use std::sync::Arc;

fn plan() -> AssessmentPlan {
    serde_json::from_value(json!({
        "uuid": "00000000-0000-4000-8000-100000000000",
        "metadata": {
            "title": "Baseline Plan",
            "last-modified": "2024-01-01T00:00:00Z",
            "version": "1.2.3",
            "oscal-version": "1.1.3"
        },
        "import-ssp": { "href": "ssp.json" },
        "local-definitions": {
            "activities": [
                {
                    "uuid": "00000000-0000-4000-8000-100000000001",
                    "title": "OSPS-QA-07.01",
                    "related-controls": {
                        "control-selections": [
                            { "include-controls": [{ "control-id": "PL-8" }, { "control-id": "SA-8" }] }
                        ]
                    }
                },
                {
                    "uuid": "00000000-0000-4000-8000-100000000002",
                    "title": "OSPS-AC-01.01",
                    "related-controls": {
                        "control-selections": [
                            { "include-controls": [{ "control-id": "AC-2" }] }
                        ]
                    }
                },
                {
                    "uuid": "00000000-0000-4000-8000-100000000003",
                    "title": "OSPS-BR-01.01"
                }
            ]
        },
        "reviewed-controls": {
            "control-selections": [
                { "include-controls": [{ "control-id": "PL-8" }, { "control-id": "SA-8" }, { "control-id": "AC-2" }] }
            ]
        }
    }))
    .unwrap()
}

fn evaluation(control: &str, requirement: &str, result: &str) -> ControlEvaluation {
    serde_json::from_value(json!({
        "control-id": control,
        "assessments": [{
            "requirement-id": requirement,
            "description": format!("Checks {}", requirement),
            "message": format!("{} evaluated", requirement),
            "steps-executed": 2,
            "result": result
        }]
    }))
    .unwrap()
}

fn converter() -> ResultsConverter {
    ResultsConverter::new().with_id_generator(Arc::new(SequentialIdGenerator::new()))
}

fn observation<'a>(results: &'a AssessmentResults, title: &str) -> Vec<&'a Observation> {
    results.results[0]
        .observations
        .iter()
        .filter(|o| o.title.as_deref() == Some(title))
        .collect()
}

#[test]
fn failed_requirement_raises_one_finding_per_statement() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Failed")],
        )
        .unwrap();

    let failing = observation(&results, "OSPS-QA-07.01")[0];
    let findings = &results.results[0].findings;
    assert_eq!(findings.len(), 2);

    let pl8 = findings
        .iter()
        .find(|f| f.target.target_id == "PL-8_smt")
        .unwrap();
    assert_eq!(pl8.target.target_type, "statement-id");
    assert_eq!(pl8.target.status.state, "not-satisfied");
    assert_eq!(pl8.related_observations.len(), 1);
    assert_eq!(pl8.related_observations[0].observation_uuid, failing.uuid);
    assert!(findings.iter().any(|f| f.target.target_id == "SA-8_smt"));
}

#[test]
fn passing_evaluations_raise_no_findings() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[
                evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Passed"),
                evaluation("OSPS-AC-01", "OSPS-AC-01.01", "Passed"),
            ],
        )
        .unwrap();
    assert!(results.results[0].findings.is_empty());
}

#[test]
fn observations_carry_rule_result_and_subject() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[evaluation("OSPS-AC-01", "OSPS-AC-01.01", "Needs Review")],
        )
        .unwrap();

    let obs = observation(&results, "OSPS-AC-01.01")[0];
    let props: Vec<(&str, &str)> = obs
        .props
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str()))
        .collect();
    assert_eq!(
        props,
        vec![
            ("assessment-rule-id", "OSPS-AC-01.01"),
            ("assessment-check-id", "OSPS-AC-01.01"),
            ("result", "needs-review"),
            ("reason", "OSPS-AC-01.01 evaluated"),
            ("steps-executed", "2"),
        ]
    );
    assert_eq!(obs.methods, vec!["TEST-AUTOMATED"]);
    assert_eq!(obs.description, "Checks OSPS-AC-01.01");

    let subject = &obs.subjects[0];
    assert_eq!(subject.subject_type, "resource");
    assert_eq!(subject.props[0].name, RESULT_PROP);
    assert_eq!(subject.props[0].value, "needs-review");

    // needs-review is not a pass
    assert_eq!(results.results[0].findings.len(), 1);
    assert_eq!(results.results[0].findings[0].target.target_id, "AC-2_smt");
}

#[test]
fn repeated_requirement_reuses_its_subject() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[
                evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Failed"),
                evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Failed"),
            ],
        )
        .unwrap();

    let observations = observation(&results, "OSPS-QA-07.01");
    assert_eq!(observations.len(), 2);
    assert_ne!(observations[0].uuid, observations[1].uuid);
    assert_eq!(
        observations[0].subjects[0].subject_uuid,
        observations[1].subjects[0].subject_uuid
    );

    let resources = &results.back_matter.as_ref().unwrap().resources;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].uuid, observations[0].subjects[0].subject_uuid);
    assert_eq!(resources[0].title.as_deref(), Some("OSPS-QA-07.01 evaluated"));

    let pl8 = results.results[0]
        .findings
        .iter()
        .find(|f| f.target.target_id == "PL-8_smt")
        .unwrap();
    assert_eq!(pl8.related_observations.len(), 2);
}

#[test]
fn observations_are_scoped_to_plan_activities() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[
                evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Passed"),
                evaluation("OSPS-XX-99", "OSPS-XX-99.01", "Failed"),
            ],
        )
        .unwrap();

    assert!(observation(&results, "OSPS-XX-99.01").is_empty());

    let placeholders: Vec<&Observation> = results.results[0]
        .observations
        .iter()
        .filter(|o| o.description == PLACEHOLDER_DESCRIPTION)
        .collect();
    let mut titles: Vec<&str> = placeholders
        .iter()
        .filter_map(|o| o.title.as_deref())
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["OSPS-AC-01.01", "OSPS-BR-01.01"]);
    assert!(placeholders.iter().all(|o| o.props.is_empty()));
    assert!(results.results[0].findings.is_empty());
}

#[test]
fn results_reference_the_plan() {
    let results = converter()
        .convert("https://example.com/plan.json", &plan(), &[])
        .unwrap();
    assert_eq!(results.import_ap.href, "https://example.com/plan.json");
    assert_eq!(results.metadata.version, "1.2.3");
    assert_eq!(results.results.len(), 1);
    assert_eq!(
        results.results[0]
            .reviewed_controls
            .included_control_ids()
            .collect::<Vec<_>>(),
        vec!["PL-8", "SA-8", "AC-2"]
    );
    assert!(results.back_matter.is_none());
}

#[test]
fn plan_without_activities_keeps_every_observation() {
    let mut bare = plan();
    bare.local_definitions = None;
    let results = converter()
        .convert(
            "plan.json",
            &bare,
            &[evaluation("OSPS-XX-99", "OSPS-XX-99.01", "Failed")],
        )
        .unwrap();
    assert_eq!(results.results[0].observations.len(), 1);
    assert!(results.results[0].findings.is_empty());
}

struct EmptyTransformer;

impl PlanTransformer for EmptyTransformer {
    fn transform(
        &self,
        _plan: &AssessmentPlan,
        plan_href: &str,
        _observations: Vec<Observation>,
        ids: &dyn IdGenerator,
    ) -> CoreResult<AssessmentResults> {
        Ok(AssessmentResults {
            uuid: ids.next_id(),
            metadata: Metadata::sample("2024-01-01T00:00:00Z"),
            import_ap: ImportAp {
                href: plan_href.to_string(),
            },
            results: Vec::new(),
            back_matter: None,
        })
    }
}

#[test]
fn transformer_must_yield_exactly_one_result() {
    let err = converter()
        .with_transformer(Box::new(EmptyTransformer))
        .convert(
            "plan.json",
            &plan(),
            &[evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Failed")],
        )
        .unwrap_err();
    assert!(matches!(err, CoreError::Shape(_)));
}

#[test]
fn generated_results_pass_structural_checks() {
    let results = converter()
        .convert(
            "plan.json",
            &plan(),
            &[
                evaluation("OSPS-QA-07", "OSPS-QA-07.01", "Failed"),
                evaluation("OSPS-AC-01", "OSPS-AC-01.01", "Passed"),
            ],
        )
        .unwrap();
    let summary = DocumentValidator::new_v1()
        .unwrap()
        .validate(&OscalModels::from(results))
        .unwrap();
    assert!(summary.passed(), "{:?}", summary.checks);
    assert_eq!(summary.result_for_check("CHK.RESULTS.OBSERVATION_REFS").0, "PASS");
    assert_eq!(summary.result_for_check("CHK.CATALOG.RESOURCE_LINKS").0, "NOT_APPLICABLE");
}
