use crate::gemara::{AssessmentMethod, AssessmentRequirement};
use crate::oscal::extensions::{
    rule_set_prop, CHECK_DESCRIPTION_PROP, CHECK_ID_PROP, PARAMETER_DEFAULT_PROP,
    PARAMETER_DESCRIPTION_PROP, PARAMETER_ID_PROP, RULE_DESCRIPTION_PROP, RULE_ID_PROP,
};
use crate::oscal::Property;

pub fn rule_set_remark(group: usize) -> String {
    format!("rule_set_{}", group)
}

/// Rule id and description, then id/description/default per recommended
/// parameter, all tagged with the same rule set remark.
pub fn rule_props(requirement: &AssessmentRequirement, group: usize) -> Vec<Property> {
    let remark = rule_set_remark(group);
    let mut props = vec![
        rule_set_prop(RULE_ID_PROP, requirement.id.as_str(), &remark),
        rule_set_prop(
            RULE_DESCRIPTION_PROP,
            escape_newlines(&requirement.text),
            &remark,
        ),
    ];

    for (i, parameter) in requirement.recommended_parameters.iter().enumerate() {
        props.push(rule_set_prop(
            format!("{}_{}", PARAMETER_ID_PROP, i),
            parameter.id.as_str(),
            &remark,
        ));
        props.push(rule_set_prop(
            format!("{}_{}", PARAMETER_DESCRIPTION_PROP, i),
            escape_newlines(&parameter.description),
            &remark,
        ));
        if let Some(default) = parameter.default.as_ref().filter(|d| !d.is_empty()) {
            props.push(rule_set_prop(
                format!("{}_{}", PARAMETER_DEFAULT_PROP, i),
                default.to_string(),
                &remark,
            ));
        }
    }
    props
}

pub fn check_props(rule_id: &str, method: &AssessmentMethod, group: usize) -> Vec<Property> {
    let remark = rule_set_remark(group);
    vec![
        rule_set_prop(RULE_ID_PROP, rule_id, &remark),
        rule_set_prop(CHECK_ID_PROP, method.name.as_str(), &remark),
        rule_set_prop(CHECK_DESCRIPTION_PROP, method.description.as_str(), &remark),
    ]
}

fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}
