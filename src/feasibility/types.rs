use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::feasibility::{error::FeasibilityError, evaluator::evaluate_input, input::InputValue};

pub type ResourceName = String;

/// Capacities and requested amounts share one representation. Integer
/// inputs are widened, so fractional capacities work alongside integral ones.
pub type Quantity = f64;

/// Ceiling per named resource for the duration of one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capacities(BTreeMap<ResourceName, Quantity>);

impl Capacities {
    pub fn new<N: Into<ResourceName>>(entries: impl IntoIterator<Item = (N, Quantity)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, capacity)| (name.into(), capacity))
                .collect(),
        )
    }

    pub fn get(&self, resource: &str) -> Option<Quantity> {
        self.0.get(resource).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.0.iter().map(|(name, capacity)| (name.as_str(), *capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<ResourceName, Quantity>> for Capacities {
    fn from(value: BTreeMap<ResourceName, Quantity>) -> Self {
        Self(value)
    }
}

/// One consumer's demand. Resources it does not mention are requested at zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request(BTreeMap<ResourceName, Quantity>);

impl Request {
    pub fn new<N: Into<ResourceName>>(entries: impl IntoIterator<Item = (N, Quantity)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(name, amount)| (name.into(), amount))
                .collect(),
        )
    }

    pub fn get(&self, resource: &str) -> Option<Quantity> {
        self.0.get(resource).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }
}

impl From<BTreeMap<ResourceName, Quantity>> for Request {
    fn from(value: BTreeMap<ResourceName, Quantity>) -> Self {
        Self(value)
    }
}

/// Untyped on-disk form of a single evaluation.
///
/// Members stay untyped so that shape and type problems surface from
/// [`EvaluationDocument::evaluate`] with their request position, rather than
/// as an opaque deserialization failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluationDocument {
    pub capacities: InputValue,
    #[serde(default)]
    pub requests: Vec<InputValue>,
}

impl EvaluationDocument {
    pub fn parse(text: &str) -> Result<Self> {
        json5::from_str(text).context("failed to parse evaluation document")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid document {}", path.display()))
    }

    pub fn evaluate(&self) -> Result<bool, FeasibilityError> {
        evaluate_input(&self.capacities, &self.requests)
    }
}
