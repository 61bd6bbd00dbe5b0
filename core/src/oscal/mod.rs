//! The OSCAL 1.1.3 subset produced (and, for assessment plans, consumed) by
//! the converters. Field names serialise in OSCAL's kebab-case JSON form.

pub mod assessment;
pub mod catalog;
pub mod common;
pub mod component;
pub mod extensions;
pub mod metadata;
pub mod models;

pub use assessment::{
    Activity, AssessedControls, AssessmentPlan, AssessmentResult, AssessmentResults,
    AssociatedActivity, Finding, FindingTarget, ImportAp, ImportSsp, LocalDefinitions,
    ObjectiveStatus, Observation, RelatedObservation, ReviewedControls, SelectControlById, Step,
    SubjectReference, Task,
};
pub use catalog::{Catalog, Control, Group};
pub use common::{BackMatter, Citation, Link, Part, Property, Resource, ResourceLink};
pub use component::{
    ComponentDefinition, ControlImplementationSet, DefinedComponent, ImplementedRequirement,
    SetParameter,
};
pub use metadata::{Metadata, Party, ResponsibleParty, Role};
pub use models::OscalModels;
