//! Command-line surface for the converters.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert Gemara documents into OSCAL JSON.
#[derive(Parser, Debug)]
#[command(name = "oscal_convert", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write the OSCAL document here instead of stdout
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a layer 1 guidance document into an OSCAL catalog
    Catalog(CatalogArgs),

    /// Build a component definition from a manifest of catalogs and evaluations
    ComponentDefinition(ComponentDefinitionArgs),

    /// Turn control evaluations into OSCAL assessment results
    AssessmentResults(AssessmentResultsArgs),
}

#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Guidance document (YAML or JSON)
    #[arg(value_name = "GUIDANCE")]
    pub guidance: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ComponentDefinitionArgs {
    /// Manifest listing target catalogs and validators (YAML)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

#[derive(Parser, Debug)]
pub struct AssessmentResultsArgs {
    /// OSCAL assessment plan (bare or wrapped in an `assessment-plan` key)
    #[arg(long, value_name = "PATH")]
    pub plan: PathBuf,

    /// Href recorded as the results' import-ap; defaults to the plan path
    #[arg(long, env = "OSCAL_PLAN_HREF")]
    pub plan_href: Option<String>,

    /// Control evaluations (YAML or JSON list)
    #[arg(long, value_name = "PATH")]
    pub evaluations: PathBuf,

    /// Also write a CSV summary of findings
    #[arg(long, value_name = "PATH")]
    pub summary_csv: Option<PathBuf>,
}
