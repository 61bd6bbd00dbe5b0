//! Property extension vocabulary shared with downstream compliance tooling.
//! These names are a contract: consumers look them up verbatim.

use super::common::Property;

pub const TRESTLE_NAMESPACE: &str =
    "https://oscal-compass.github.io/compliance-trestle/schemas/oscal";

pub const RULE_ID_PROP: &str = "Rule_Id";
pub const RULE_DESCRIPTION_PROP: &str = "Rule_Description";
pub const CHECK_ID_PROP: &str = "Check_Id";
pub const CHECK_DESCRIPTION_PROP: &str = "Check_Description";
pub const PARAMETER_ID_PROP: &str = "Parameter_Id";
pub const PARAMETER_DESCRIPTION_PROP: &str = "Parameter_Description";
pub const PARAMETER_DEFAULT_PROP: &str = "Parameter_Value_Alternatives";
pub const FRAMEWORK_PROP: &str = "Framework_Short_Name";
pub const ASSESSMENT_RULE_ID_PROP: &str = "assessment-rule-id";
pub const ASSESSMENT_CHECK_ID_PROP: &str = "assessment-check-id";
pub const RESULT_PROP: &str = "result";
pub const REASON_PROP: &str = "reason";
pub const STEPS_EXECUTED_PROP: &str = "steps-executed";
pub const RESOURCE_ID_PROP: &str = "id";

/// A namespaced property without remarks.
pub fn trestle_prop(name: impl Into<String>, value: impl Into<String>) -> Property {
    Property {
        name: name.into(),
        value: value.into(),
        ns: Some(TRESTLE_NAMESPACE.to_string()),
        class: None,
        remarks: None,
    }
}

/// A namespaced property tagged with the rule set it belongs to.
pub fn rule_set_prop(
    name: impl Into<String>,
    value: impl Into<String>,
    remark: &str,
) -> Property {
    Property {
        remarks: Some(remark.to_string()),
        ..trestle_prop(name, value)
    }
}

pub fn find_trestle_prop<'a>(name: &str, props: &'a [Property]) -> Option<&'a Property> {
    props
        .iter()
        .find(|p| p.name == name && p.ns.as_deref() == Some(TRESTLE_NAMESPACE))
}
