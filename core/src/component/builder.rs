use super::mapping::MappingSets;
use super::rules::{check_props, rule_props};
use crate::error::CoreResult;
use crate::gemara::{Catalog, ControlEvaluation, ParameterModifier};
use crate::ids::{IdGenerator, UlidUuidGenerator};
use crate::oscal::metadata::now_rfc3339;
use crate::oscal::{ComponentDefinition, DefinedComponent, Metadata, SetParameter};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const VALIDATION_COMPONENT_TYPE: &str = "validation";

/// Accumulates target and validation components across calls, then
/// flattens them into one component definition.
///
/// Target components are keyed by the id of the catalog they came from so
/// later calls (parameter modifiers) can find them again. Adding a second
/// catalog with the same id replaces the earlier component in place.
pub struct DefinitionBuilder {
    title: String,
    version: String,
    ids: Arc<dyn IdGenerator>,
    target_order: Vec<String>,
    targets: HashMap<String, DefinedComponent>,
    validation_components: Vec<DefinedComponent>,
}

impl DefinitionBuilder {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ids: Arc::new(UlidUuidGenerator),
            target_order: Vec::new(),
            targets: HashMap::new(),
            validation_components: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn add_target_component(
        &mut self,
        name: &str,
        component_type: &str,
        catalog: &Catalog,
    ) -> &mut Self {
        let ids = self.ids.as_ref();
        let mut mapping_sets = MappingSets::from_references(&catalog.metadata.mapping_references, ids);
        let mut props = Vec::new();
        let mut group = 0usize;

        for family in &catalog.control_families {
            for control in &family.controls {
                for requirement in &control.assessment_requirements {
                    props.extend(rule_props(requirement, group));
                    group += 1;
                    mapping_sets.map_rule(
                        &requirement.id,
                        control
                            .guideline_mappings
                            .iter()
                            .chain(requirement.guideline_mappings.iter()),
                        ids,
                    );
                }
            }
        }

        debug!(
            catalog = %catalog.metadata.id,
            rule_sets = group,
            frameworks = mapping_sets.len(),
            "built target component"
        );

        let component = DefinedComponent {
            uuid: ids.next_id(),
            component_type: component_type.to_string(),
            title: name.to_string(),
            description: catalog.metadata.description.clone(),
            props,
            control_implementations: mapping_sets.into_sets(),
        };

        let key = catalog.metadata.id.clone();
        if self.targets.insert(key.clone(), component).is_some() {
            debug!(catalog = %key, "replaced existing target component");
        } else {
            self.target_order.push(key);
        }
        self
    }

    pub fn add_validation_component(
        &mut self,
        name: &str,
        evaluations: &[ControlEvaluation],
    ) -> &mut Self {
        let mut props = Vec::new();
        let mut group = 0usize;
        for evaluation in evaluations {
            for assessment in &evaluation.assessments {
                for method in &assessment.methods {
                    props.extend(check_props(&assessment.requirement_id, method, group));
                    group += 1;
                }
            }
        }

        debug!(validator = name, rule_sets = group, "built validation component");
        self.validation_components.push(DefinedComponent {
            uuid: self.ids.next_id(),
            component_type: VALIDATION_COMPONENT_TYPE.to_string(),
            title: name.to_string(),
            description: String::new(),
            props,
            control_implementations: Vec::new(),
        });
        self
    }

    /// Broadcasts each modifier as a set-parameter onto every
    /// control-implementation set of the component built from catalog
    /// `reference_id`. Unknown ids are ignored.
    pub fn add_parameter_modifiers(
        &mut self,
        reference_id: &str,
        modifiers: &[ParameterModifier],
    ) -> &mut Self {
        let Some(component) = self.targets.get_mut(reference_id) else {
            warn!(
                catalog = reference_id,
                "no target component for parameter modifiers, ignoring"
            );
            return self;
        };

        for modifier in modifiers {
            let set_parameter = SetParameter {
                param_id: modifier.target_id.clone(),
                values: vec![modifier.value.to_string()],
            };
            for set in &mut component.control_implementations {
                set.set_parameters.push(set_parameter.clone());
            }
        }
        self
    }

    pub fn target_component(&self, catalog_id: &str) -> Option<&DefinedComponent> {
        self.targets.get(catalog_id)
    }

    pub fn build(&self) -> CoreResult<ComponentDefinition> {
        let mut metadata = Metadata::sample(now_rfc3339()?);
        metadata.title = self.title.clone();
        metadata.version = self.version.clone();

        let components: Vec<DefinedComponent> = self
            .target_order
            .iter()
            .filter_map(|id| self.targets.get(id).cloned())
            .chain(self.validation_components.iter().cloned())
            .collect();

        Ok(ComponentDefinition {
            uuid: self.ids.next_id(),
            metadata,
            components,
        })
    }
}
