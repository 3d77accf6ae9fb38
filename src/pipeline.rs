//! One generator run: config check → load → resolve/classify → render → write.
//!
//! Both artifacts are rendered in memory before the first write, so any
//! failure ahead of the write stage leaves the output location untouched.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::codegen::{Codegen, ENUMS_UNIT, FUNCTIONS_UNIT, Form};
use crate::config::{GeneratorConfig, PolicySource};
use crate::error::{GenError, Stage};
use crate::lower::{lower_enums, lower_functions};
use crate::output::{OutputSink, write_artifact};
use crate::policy::{ExplicitMapPolicy, ReferenceTextPolicy, ResolutionPolicy};
use crate::profile::Profile;
use crate::schema::{ApiDescription, load_api};

/// Rendered text of both artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub functions: String,
    pub enums: String,
    pub bound_functions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub bound_functions: usize,
    pub enum_values: usize,
    pub functions_path: PathBuf,
    pub enums_path: PathBuf,
}

/// Render both artifacts from an already loaded description.
pub fn render(
    api: &ApiDescription,
    policy: &dyn ResolutionPolicy,
    profile: &Profile,
    form: Form,
    target: &str,
) -> Result<Artifacts, GenError> {
    let mut functions = Codegen::new(profile, form, target)?;
    let mut enums = Codegen::new(profile, form, target)?;
    let bound = lower_functions(api, policy);
    functions.emit(&bound);
    enums.emit(&lower_enums(api));
    Ok(Artifacts {
        functions: functions.into_unit(FUNCTIONS_UNIT),
        enums: enums.into_unit(ENUMS_UNIT),
        bound_functions: bound.len(),
    })
}

pub fn load_policy(source: &PolicySource) -> Result<Box<dyn ResolutionPolicy>, GenError> {
    match source {
        PolicySource::ReferenceText(path) => {
            let text = read_to_string(Stage::Policy, path)?;
            Ok(Box::new(ReferenceTextPolicy::new(text)))
        }
        PolicySource::ExplicitMap(path) => {
            let bytes = std::fs::read(path).map_err(|err| GenError::io(Stage::Policy, path, err))?;
            let policy = ExplicitMapPolicy::from_json(&bytes).map_err(|err| match err {
                GenError::Config { message } => GenError::config(format!("{}: {message}", path.display())),
                other => other,
            })?;
            if policy.is_empty() {
                tracing::warn!(path = %path.display(), "explicit map is empty; no functions will be bound");
            }
            Ok(Box::new(policy))
        }
    }
}

pub fn run(config: &GeneratorConfig, sink: &dyn OutputSink) -> Result<RunSummary, GenError> {
    // reject an unrenderable profile/form pair before touching any input
    Codegen::new(&config.profile, config.form, config.target.as_str())?;

    let bytes = std::fs::read(&config.api).map_err(|err| GenError::io(Stage::Load, &config.api, err))?;
    let api = load_api(&bytes)?;
    info!(
        path = %config.api.display(),
        functions = api.utility_functions.len(),
        enums = api.global_enums.len(),
        "loaded API description"
    );

    let policy = load_policy(&config.policy)?;
    let artifacts = render(&api, policy.as_ref(), &config.profile, config.form, &config.target)?;

    write_artifact(sink, &config.functions_path, &artifacts.functions)?;
    write_artifact(sink, &config.enums_path, &artifacts.enums)?;

    let summary = RunSummary {
        bound_functions: artifacts.bound_functions,
        enum_values: api.global_enums.iter().map(|e| e.values.len()).sum(),
        functions_path: config.functions_path.clone(),
        enums_path: config.enums_path.clone(),
    };
    info!(
        functions = %summary.functions_path.display(),
        enums = %summary.enums_path.display(),
        "generation finished"
    );
    Ok(summary)
}

fn read_to_string(stage: Stage, path: &Path) -> Result<String, GenError> {
    std::fs::read_to_string(path).map_err(|err| GenError::io(stage, path, err))
}
