use std::collections::BTreeMap;

use serde_json::Value;

use crate::feasibility::{
    error::FeasibilityError,
    input::{InputValue, parse_capacities, parse_requests},
    types::{Capacities, Quantity, Request},
};

/// Why an allocation was judged infeasible. Only ever logged; callers get a
/// bare verdict.
#[derive(Debug, Clone, PartialEq)]
enum Violation {
    InvalidCapacity {
        resource: String,
        capacity: Quantity,
    },
    UnknownResource {
        index: usize,
        resource: String,
    },
    InvalidAmount {
        index: usize,
        resource: String,
        amount: Quantity,
    },
    CapacityExceeded {
        index: usize,
        resource: String,
        used: Quantity,
        capacity: Quantity,
    },
}

/// Decides whether `requests` fit within `capacities` taken together.
///
/// Usage is summed per resource in request order with plain IEEE-754
/// addition and compared with a strict `>` after every addition. Sums that
/// land a few ULPs past an exactly representable capacity are infeasible.
pub fn is_allocation_feasible(capacities: &Capacities, requests: &[Request]) -> bool {
    match first_violation(capacities, requests) {
        None => {
            tracing::debug!(
                target: "feasibility",
                resources = capacities.len(),
                requests = requests.len(),
                "allocation_feasible"
            );
            true
        }
        Some(violation) => {
            tracing::debug!(
                target: "feasibility",
                resources = capacities.len(),
                requests = requests.len(),
                violation = ?violation,
                "allocation_infeasible"
            );
            false
        }
    }
}

/// Untyped entry point over JSON values.
///
/// Request shapes are checked over the whole sequence first, then request
/// amount types, then the capacity map. Any contract violation is returned
/// as an error and never folded into a `false` verdict.
pub fn evaluate(capacities: &Value, requests: &[Value]) -> Result<bool, FeasibilityError> {
    let capacities = InputValue::from(capacities.clone());
    let requests: Vec<InputValue> = requests.iter().cloned().map(InputValue::from).collect();
    evaluate_input(&capacities, &requests)
}

/// Same contract as [`evaluate`], over boundary values that may carry
/// non-finite numbers.
pub fn evaluate_input(
    capacities: &InputValue,
    requests: &[InputValue],
) -> Result<bool, FeasibilityError> {
    let requests = parse_requests(requests).inspect_err(|err| {
        tracing::debug!(target: "feasibility", error = %err, kind = ?err.kind, "requests_rejected");
    })?;
    let capacities = parse_capacities(capacities).inspect_err(|err| {
        tracing::debug!(target: "feasibility", error = %err, kind = ?err.kind, "capacities_rejected");
    })?;

    Ok(is_allocation_feasible(&capacities, &requests))
}

fn first_violation(capacities: &Capacities, requests: &[Request]) -> Option<Violation> {
    if let Some((resource, capacity)) = capacities
        .iter()
        .find(|(_, capacity)| !is_valid_capacity(*capacity))
    {
        return Some(Violation::InvalidCapacity {
            resource: resource.to_string(),
            capacity,
        });
    }

    let mut used: BTreeMap<&str, Quantity> =
        capacities.iter().map(|(resource, _)| (resource, 0.0)).collect();

    for (index, request) in requests.iter().enumerate() {
        for (resource, amount) in request.iter() {
            let (Some(capacity), Some(total)) = (capacities.get(resource), used.get_mut(resource))
            else {
                return Some(Violation::UnknownResource {
                    index,
                    resource: resource.to_string(),
                });
            };

            if !is_valid_amount(amount) {
                return Some(Violation::InvalidAmount {
                    index,
                    resource: resource.to_string(),
                    amount,
                });
            }

            *total += amount;
            if *total > capacity {
                return Some(Violation::CapacityExceeded {
                    index,
                    resource: resource.to_string(),
                    used: *total,
                    capacity,
                });
            }
        }
    }

    None
}

// A capacity of -0.0 compares equal to zero and is accepted as an empty resource.
fn is_valid_capacity(capacity: Quantity) -> bool {
    !capacity.is_nan() && capacity >= 0.0
}

// Sign bit, not `< 0.0`: -0.0 is a negative amount.
fn is_valid_amount(amount: Quantity) -> bool {
    !amount.is_nan() && !amount.is_sign_negative()
}
