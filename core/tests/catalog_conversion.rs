use gemara_oscal_core::catalog::to_catalog;
use gemara_oscal_core::error::CoreError;
use gemara_oscal_core::gemara::GuidanceDocument;
use gemara_oscal_core::ids::SequentialIdGenerator;
use gemara_oscal_core::oscal::{Control, OscalModels};
use gemara_oscal_core::validator::DocumentValidator;

const GUIDANCE: &str = r#"
metadata:
  id: SSDF
  title: Secure Software Development Framework
  description: Practices for secure software development
  author: NIST
  version: "1.1"
  publication-date: "2022-02-03"
  last-modified: "2024-05-06 07:08:09"
  resources:
    - id: SP800-161
      title: Cybersecurity Supply Chain Risk Management Practices
      url: https://doi.org/10.6028/NIST.SP.800-161r1
      issuing-body: NIST
      publication-date: "2022-05-05"
categories:
  - id: PO
    title: Prepare the Organization
    guidelines:
      - id: PO.1.1
        title: Identify requirements
        objective: Know which security requirements apply.
        base-guideline-id: PO.1
        see-also: [PO.2]
      - id: PO.1
        title: Define security requirements
        objective: Ensure requirements are known at all times.
        recommendations:
          - Document the requirements.
          - Review them yearly.
        guideline-parts:
          - id: a
            title: Inventory
            prose: Keep an inventory of requirements.
            recommendations: [Automate the inventory.]
        external-references: [SP800-161, MISSING-REF]
      - id: PO.2
        title: Implement roles
        objective: Assign responsibilities.
  - id: PS
    title: Protect the Software
    guidelines:
      - id: PS.1
        title: Protect code
        objective: Prevent unauthorized access to code.
        base-guideline-id: PO.1
"#;

fn guidance() -> GuidanceDocument {
    serde_yaml::from_str(GUIDANCE).unwrap()
}

fn find<'a>(controls: &'a [Control], id: &str) -> &'a Control {
    controls
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("control {} not found", id))
}

#[test]
fn one_group_per_category_with_nested_guidelines() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    assert_eq!(catalog.groups.len(), 2);

    let po = &catalog.groups[0];
    assert_eq!(po.id.as_deref(), Some("PO"));
    assert_eq!(po.title, "Prepare the Organization");
    let top: Vec<&str> = po.controls.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(top.len(), 2);
    assert!(top.contains(&"PO.1"));
    assert!(top.contains(&"PO.2"));

    let parent = find(&po.controls, "PO.1");
    assert_eq!(parent.controls.len(), 1);
    assert_eq!(parent.controls[0].id, "PO.1.1");
}

#[test]
fn nesting_does_not_cross_categories() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let ps = &catalog.groups[1];
    assert_eq!(ps.controls.len(), 1);
    assert_eq!(ps.controls[0].id, "PS.1");
}

#[test]
fn control_parts_follow_statement_conventions() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let control = find(&catalog.groups[0].controls, "PO.1");

    let objective = &control.parts[0];
    assert_eq!(objective.id.as_deref(), Some("PO.1_obj"));
    assert_eq!(objective.name, "assessment-objective");
    assert_eq!(
        objective.prose.as_deref(),
        Some("Ensure requirements are known at all times.")
    );

    let statement = &control.parts[1];
    assert_eq!(statement.id.as_deref(), Some("PO.1_smt"));
    assert_eq!(statement.parts[0].id.as_deref(), Some("PO.1_smt.a"));
    assert_eq!(statement.parts[0].title.as_deref(), Some("Inventory"));
    assert_eq!(
        statement.parts[0].parts[0].prose.as_deref(),
        Some("Automate the inventory.")
    );

    let guidance = &control.parts[2];
    assert_eq!(guidance.name, "guidance");
    assert_eq!(
        guidance.prose.as_deref(),
        Some("Document the requirements. Review them yearly.")
    );
}

#[test]
fn see_also_and_known_references_become_links() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let resources = &catalog.back_matter.as_ref().unwrap().resources;
    assert_eq!(resources.len(), 1);

    let parent = find(&catalog.groups[0].controls, "PO.1");
    assert_eq!(parent.links.len(), 1);
    assert_eq!(parent.links[0].href, format!("#{}", resources[0].uuid));
    assert_eq!(parent.links[0].rel.as_deref(), Some("reference"));

    let child = &parent.controls[0];
    assert_eq!(child.links[0].href, "#PO.2");
    assert_eq!(child.links[0].rel.as_deref(), Some("related"));
}

#[test]
fn resources_carry_citation_and_source_id() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let resource = &catalog.back_matter.unwrap().resources[0];
    assert_eq!(
        resource.citation.as_ref().unwrap().text,
        "NIST. (2022-05-05). *Cybersecurity Supply Chain Risk Management Practices*. https://doi.org/10.6028/NIST.SP.800-161r1"
    );
    assert_eq!(resource.props[0].name, "id");
    assert_eq!(resource.props[0].value, "SP800-161");
    assert_eq!(
        resource.rlinks[0].href,
        "https://doi.org/10.6028/NIST.SP.800-161r1"
    );
}

#[test]
fn metadata_records_dates_and_author() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let metadata = &catalog.metadata;
    assert_eq!(metadata.title, "Secure Software Development Framework");
    assert_eq!(metadata.version, "1.1");
    assert_eq!(metadata.oscal_version, "1.1.3");
    assert_eq!(metadata.published.as_deref(), Some("2022-02-03T00:00:00Z"));
    assert_eq!(metadata.last_modified, "2024-05-06T07:08:09Z");

    assert_eq!(metadata.parties[0].name.as_deref(), Some("NIST"));
    assert_eq!(metadata.responsible_parties[0].role_id, "author");
    assert_eq!(
        metadata.responsible_parties[0].party_uuids,
        vec![metadata.parties[0].uuid.clone()]
    );
}

#[test]
fn empty_category_id_omits_group_id() {
    let mut doc = guidance();
    doc.categories[1].id = String::new();
    let catalog = to_catalog(&doc, &SequentialIdGenerator::new()).unwrap();
    assert!(catalog.groups[1].id.is_none());
    let json = serde_json::to_value(&catalog.groups[1]).unwrap();
    assert!(json.get("id").is_none());
}

#[test]
fn malformed_dates_fail_conversion() {
    let mut doc = guidance();
    doc.metadata.publication_date = "Feb 3 2022".to_string();
    let err = to_catalog(&doc, &SequentialIdGenerator::new()).unwrap_err();
    assert!(matches!(err, CoreError::DateParse { field: "publication-date", .. }));

    let mut doc = guidance();
    doc.metadata.last_modified = "2024-05-06T07:08:09Z".to_string();
    let err = to_catalog(&doc, &SequentialIdGenerator::new()).unwrap_err();
    assert!(err.to_string().contains("last-modified"));
}

#[test]
fn converted_catalog_passes_structural_checks() {
    let catalog = to_catalog(&guidance(), &SequentialIdGenerator::new()).unwrap();
    let summary = DocumentValidator::new_v1()
        .unwrap()
        .validate(&OscalModels::from(catalog))
        .unwrap();
    assert_eq!(summary.overall, "PASS", "{:?}", summary.checks);
    assert_eq!(summary.result_for_check("CHK.CATALOG.RESOURCE_LINKS").0, "PASS");
}
