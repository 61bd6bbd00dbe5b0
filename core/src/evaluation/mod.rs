//! Assessment plan + control evaluations → OSCAL assessment results.

pub mod findings;
pub mod observations;
pub mod report;
pub mod results;
pub mod transformer;

pub use report::{render_findings_csv, render_findings_markdown, FindingRow};
pub use results::{to_assessment_results, ResultsConverter};
pub use transformer::{DefaultPlanTransformer, PlanTransformer};
