use anyhow::{bail, Context, Result};
use gemara_oscal_core::gemara::{ControlEvaluation, ParameterModifier};
use gemara_oscal_core::oscal::AssessmentPlan;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Reads a YAML or JSON document from disk.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

const PLAN_KEY: &str = "assessment-plan";

/// Accepts either a bare plan or one wrapped in `assessment-plan`.
pub fn read_plan(path: &Path) -> Result<AssessmentPlan> {
    let mut value: serde_yaml::Value = read_document(path)?;
    if let Some(inner) = value
        .as_mapping_mut()
        .and_then(|doc| doc.remove(PLAN_KEY))
    {
        return serde_yaml::from_value(inner).with_context(|| {
            format!("{} has a malformed {} document", path.display(), PLAN_KEY)
        });
    }
    serde_yaml::from_value(value)
        .with_context(|| format!("{} is not an assessment plan", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

pub fn read_evaluations(path: &Path) -> Result<Vec<ControlEvaluation>> {
    Ok(match read_document::<OneOrMany<ControlEvaluation>>(path)? {
        OneOrMany::Many(evaluations) => evaluations,
        OneOrMany::One(evaluation) => vec![evaluation],
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
    #[serde(default)]
    pub validators: Vec<ValidatorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub catalog: PathBuf,
    #[serde(default)]
    pub parameter_modifiers: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ValidatorEntry {
    pub name: String,
    pub evaluations: PathBuf,
}

/// Loads a manifest and resolves its file references against the
/// manifest's own directory.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let mut manifest: Manifest = read_document(path)?;
    if manifest.targets.is_empty() && manifest.validators.is_empty() {
        bail!("{} lists no targets or validators", path.display());
    }
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for target in &mut manifest.targets {
        target.catalog = base.join(&target.catalog);
        if let Some(modifiers) = target.parameter_modifiers.as_mut() {
            *modifiers = base.join(&*modifiers);
        }
    }
    for validator in &mut manifest.validators {
        validator.evaluations = base.join(&validator.evaluations);
    }
    Ok(manifest)
}

pub fn read_modifiers(path: &Path) -> Result<Vec<ParameterModifier>> {
    read_document(path)
}
