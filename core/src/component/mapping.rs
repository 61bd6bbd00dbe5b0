use crate::gemara::{Mapping, MappingReference};
use crate::ids::IdGenerator;
use crate::normalize::normalize_control_id;
use crate::oscal::extensions::{trestle_prop, FRAMEWORK_PROP, RULE_ID_PROP};
use crate::oscal::{ControlImplementationSet, ImplementedRequirement, Property};
use std::collections::HashMap;
use tracing::warn;

/// One control-implementation set per mapping reference, kept in the order
/// the catalog declares them.
#[derive(Debug, Default)]
pub struct MappingSets {
    order: Vec<String>,
    sets: HashMap<String, ControlImplementationSet>,
}

impl MappingSets {
    pub fn from_references(references: &[MappingReference], ids: &dyn IdGenerator) -> Self {
        let mut out = Self::default();
        for reference in references {
            if out.sets.contains_key(&reference.id) {
                warn!(reference = %reference.id, "duplicate mapping reference, keeping the first");
                continue;
            }
            out.sets
                .entry(reference.id.clone())
                .or_insert_with(|| ControlImplementationSet {
                    uuid: ids.next_id(),
                    source: reference.url.clone(),
                    description: reference.description.clone(),
                    props: vec![trestle_prop(FRAMEWORK_PROP, reference.id.as_str())],
                    set_parameters: Vec::new(),
                    implemented_requirements: Vec::new(),
                });
            out.order.push(reference.id.clone());
        }
        out
    }

    /// Records `rule_id` against every mapped control of every known
    /// framework. Mappings into undeclared frameworks are dropped.
    pub fn map_rule<'a>(
        &mut self,
        rule_id: &str,
        mappings: impl IntoIterator<Item = &'a Mapping>,
        ids: &dyn IdGenerator,
    ) {
        for mapping in mappings {
            let Some(set) = self.sets.get_mut(&mapping.reference_id) else {
                warn!(
                    rule = rule_id,
                    reference = %mapping.reference_id,
                    "mapping reference not declared in catalog metadata, dropping"
                );
                continue;
            };
            for identifier in &mapping.identifiers {
                upsert_implemented_requirement(set, rule_id, identifier, ids);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_sets(mut self) -> Vec<ControlImplementationSet> {
        self.order
            .iter()
            .filter_map(|id| self.sets.remove(id))
            .collect()
    }
}

fn upsert_implemented_requirement(
    set: &mut ControlImplementationSet,
    rule_id: &str,
    identifier: &str,
    ids: &dyn IdGenerator,
) {
    let control_id = normalize_control_id(identifier);
    let rule_prop: Property = trestle_prop(RULE_ID_PROP, rule_id);

    match set
        .implemented_requirements
        .iter_mut()
        .find(|req| req.control_id == control_id)
    {
        Some(existing) => {
            if !existing.props.contains(&rule_prop) {
                existing.props.push(rule_prop);
            }
        }
        None => set.implemented_requirements.push(ImplementedRequirement {
            uuid: ids.next_id(),
            control_id,
            description: String::new(),
            props: vec![rule_prop],
        }),
    }
}
