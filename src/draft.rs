//! Draft files: a `FormState` saved as JSON, checked and compiled from the CLI

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::form::{can_reach, compile, FormState, Payload, Step, ValidationResult};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Failed to read draft {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid draft {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Draft has invalid steps: {}", format_steps(.0))]
    Incomplete(Vec<Step>),
}

fn format_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| step.number().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a draft; missing keys take their form defaults
pub fn load(path: impl AsRef<Path>) -> Result<FormState, DraftError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| DraftError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw).map_err(|source| DraftError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(raw: &str) -> serde_json::Result<FormState> {
    serde_json::from_str(raw)
}

/// Validation status of a single step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub reachable: bool,
    pub result: ValidationResult,
}

/// Validate every step of a draft, regardless of gating
pub fn check(state: &FormState) -> Vec<StepReport> {
    Step::all()
        .iter()
        .map(|step| StepReport {
            step: *step,
            reachable: can_reach(*step, state),
            result: step.validate(state),
        })
        .collect()
}

/// Compile a draft, refusing unless every step validates (or `force`)
pub fn compile_draft(state: &FormState, force: bool) -> Result<Payload, DraftError> {
    let invalid: Vec<Step> = check(state)
        .into_iter()
        .filter(|report| !report.result.is_valid())
        .map(|report| report.step)
        .collect();

    if !invalid.is_empty() {
        if !force {
            return Err(DraftError::Incomplete(invalid));
        }
        tracing::warn!(steps = %format_steps(&invalid), "compiling draft with invalid steps");
    }

    Ok(compile(state))
}
