//! oscal_convert: Gemara documents in, OSCAL JSON out.

mod cli;
mod load;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AssessmentResultsArgs, CatalogArgs, Cli, Commands, ComponentDefinitionArgs};
use gemara_oscal_core::catalog::to_catalog;
use gemara_oscal_core::component::DefinitionBuilder;
use gemara_oscal_core::evaluation::{render_findings_csv, ResultsConverter};
use gemara_oscal_core::gemara::{Catalog, GuidanceDocument};
use gemara_oscal_core::ids::UlidUuidGenerator;
use gemara_oscal_core::oscal::OscalModels;
use std::io::Write;
use std::path::Path;
use std::process;
use tracing::info;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{:#}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let models = match cli.command {
        Commands::Catalog(args) => convert_catalog(&args)?,
        Commands::ComponentDefinition(args) => build_component_definition(&args)?,
        Commands::AssessmentResults(args) => convert_results(&args)?,
    };
    write_models(&models, cli.output.as_deref())
}

fn convert_catalog(args: &CatalogArgs) -> Result<OscalModels> {
    let guidance: GuidanceDocument = load::read_document(&args.guidance)?;
    let catalog = to_catalog(&guidance, &UlidUuidGenerator)
        .with_context(|| format!("failed to convert {}", args.guidance.display()))?;
    info!(groups = catalog.groups.len(), "catalog converted");
    Ok(catalog.into())
}

fn build_component_definition(args: &ComponentDefinitionArgs) -> Result<OscalModels> {
    let manifest = load::read_manifest(&args.manifest)?;
    let mut builder = DefinitionBuilder::new(&manifest.title, &manifest.version);

    for target in &manifest.targets {
        let catalog: Catalog = load::read_document(&target.catalog)?;
        builder.add_target_component(&target.name, &target.component_type, &catalog);
        if let Some(path) = &target.parameter_modifiers {
            let modifiers = load::read_modifiers(path)?;
            builder.add_parameter_modifiers(&catalog.metadata.id, &modifiers);
        }
    }
    for validator in &manifest.validators {
        let evaluations = load::read_evaluations(&validator.evaluations)?;
        builder.add_validation_component(&validator.name, &evaluations);
    }

    let definition = builder.build()?;
    info!(components = definition.components.len(), "component definition built");
    Ok(definition.into())
}

fn convert_results(args: &AssessmentResultsArgs) -> Result<OscalModels> {
    let plan = load::read_plan(&args.plan)?;
    let evaluations = load::read_evaluations(&args.evaluations)?;
    let plan_href = args
        .plan_href
        .clone()
        .unwrap_or_else(|| args.plan.display().to_string());

    let results = ResultsConverter::new()
        .convert(&plan_href, &plan, &evaluations)
        .context("failed to build assessment results")?;

    if let Some(path) = &args.summary_csv {
        let csv = render_findings_csv(&results)?;
        std::fs::write(path, csv)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "findings summary written");
    }
    Ok(results.into())
}

fn write_models(models: &OscalModels, output: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(models)?;
    json.push('\n');
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}
