//! Tagged validation of untyped evaluation input.
//!
//! Callers hand over raw values; everything is checked here before the
//! evaluator sees a single number.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::feasibility::{
    error::{FeasibilityError, structural, type_kind},
    types::{Capacities, Quantity, Request},
};

/// Untyped value at the evaluation boundary.
///
/// Mirrors the JSON data model, except that numbers are held as `f64` so
/// JSON5 `Infinity` and `NaN` survive loading instead of collapsing to null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<InputValue>),
    Object(BTreeMap<String, InputValue>),
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            // Always Some without serde_json's arbitrary_precision feature.
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(mapping) => Self::Object(
                mapping
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

pub fn describe_shape(value: &InputValue) -> &'static str {
    match value {
        InputValue::Null => "null",
        InputValue::Bool(_) => "boolean",
        InputValue::Number(_) => "number",
        InputValue::String(_) => "string",
        InputValue::Array(_) => "array",
        InputValue::Object(_) => "object",
    }
}

/// Checks every request's shape first, then every amount's type.
///
/// A non-mapping element anywhere in the sequence is reported before any
/// type problem, so the first error returned is always the earliest
/// structural violation when one exists.
pub fn parse_requests(values: &[InputValue]) -> Result<Vec<Request>, FeasibilityError> {
    let mappings = values
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            InputValue::Object(mapping) => Ok(mapping),
            other => Err(structural(format!(
                "request must be a mapping of resource to amount, got {}",
                describe_shape(other)
            ))
            .with_index(index)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    mappings
        .into_iter()
        .enumerate()
        .map(|(index, mapping)| {
            numeric_entries(mapping, "requested amount")
                .map(Request::from)
                .map_err(|err| err.with_index(index))
        })
        .collect()
}

pub fn parse_capacities(value: &InputValue) -> Result<Capacities, FeasibilityError> {
    let InputValue::Object(mapping) = value else {
        return Err(structural(format!(
            "capacities must be a mapping of resource to capacity, got {}",
            describe_shape(value)
        )));
    };

    numeric_entries(mapping, "capacity").map(Capacities::from)
}

// Booleans are rejected rather than read as 0/1.
fn numeric_entries(
    mapping: &BTreeMap<String, InputValue>,
    role: &str,
) -> Result<BTreeMap<String, Quantity>, FeasibilityError> {
    mapping
        .iter()
        .map(|(resource, value)| match value {
            InputValue::Number(amount) => Ok((resource.clone(), *amount)),
            other => Err(type_kind(format!(
                "{role} must be numeric, got {}",
                describe_shape(other)
            ))
            .with_resource(resource.clone())),
        })
        .collect()
}
