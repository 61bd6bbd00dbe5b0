//! Source documents from the Gemara layers: guidance (layer 1), control
//! catalogs (layer 2), parameter modifiers (layer 3) and control
//! evaluations (layer 4). All are read-only inputs to the converters.

pub mod catalog;
pub mod evaluation;
pub mod guidance;
pub mod modifier;
pub mod value;

pub use catalog::{
    AssessmentRequirement, Catalog, CatalogMetadata, Control, ControlFamily, Mapping,
    MappingReference, RecommendedParameter,
};
pub use evaluation::{Assessment, AssessmentMethod, ControlEvaluation, EvaluationResult};
pub use guidance::{
    Category, GuidanceDocument, GuidanceMetadata, Guideline, GuidelinePart, ResourceReference,
};
pub use modifier::ParameterModifier;
pub use value::ParameterValue;
