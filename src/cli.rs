use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};

use crate::feasibility::{EvaluationDocument, FeasibilityError};

pub const USAGE: &str = "usage: allotment [--config <path>] <document-path>";

pub const EXIT_FEASIBLE: u8 = 0;
pub const EXIT_INFEASIBLE: u8 = 1;
/// A request or the capacity map broke the input contract.
pub const EXIT_MALFORMED_INPUT: u8 = 2;
/// Usage, config, logging or document loading failed.
pub const EXIT_FAILURE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Feasible,
    Infeasible,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feasible => "feasible",
            Self::Infeasible => "infeasible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Evaluate(CliArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub document_path: PathBuf,
}

impl CliCommand {
    pub fn from_env() -> Result<Self> {
        Self::parse(env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut config_path = None;
        let mut document_path = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Self::Help),
                "--config" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("missing value for --config"))?;
                    config_path = Some(PathBuf::from(value));
                }
                other if other.starts_with('-') => {
                    return Err(anyhow!("unknown argument: {other}. {USAGE}"));
                }
                path => {
                    if document_path.is_some() {
                        return Err(anyhow!("expected exactly one <document-path>. {USAGE}"));
                    }
                    document_path = Some(PathBuf::from(path));
                }
            }
        }

        let document_path =
            document_path.ok_or_else(|| anyhow!("missing <document-path>. {USAGE}"))?;

        Ok(Self::Evaluate(CliArgs {
            config_path,
            document_path,
        }))
    }
}

pub fn evaluate_document(path: &Path) -> Result<Verdict> {
    let document = EvaluationDocument::load(path)?;
    let feasible = document
        .evaluate()
        .with_context(|| format!("malformed evaluation input in {}", path.display()))?;

    tracing::info!(
        target: "feasibility",
        requests = document.requests.len(),
        feasible,
        "evaluation_completed"
    );

    Ok(if feasible {
        Verdict::Feasible
    } else {
        Verdict::Infeasible
    })
}

/// Keeps contract violations apart from infeasibility and from every other
/// failure, so scripts can branch on the status alone.
pub fn exit_status(result: &Result<Verdict>) -> u8 {
    match result {
        Ok(Verdict::Feasible) => EXIT_FEASIBLE,
        Ok(Verdict::Infeasible) => EXIT_INFEASIBLE,
        Err(err) if err.chain().any(|cause| cause.is::<FeasibilityError>()) => {
            EXIT_MALFORMED_INPUT
        }
        Err(_) => EXIT_FAILURE,
    }
}
