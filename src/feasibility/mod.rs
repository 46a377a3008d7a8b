pub mod error;
pub mod evaluator;
pub mod input;
pub mod types;

pub use error::{FeasibilityError, FeasibilityErrorKind, structural, type_kind};
pub use evaluator::{evaluate, evaluate_input, is_allocation_feasible};
pub use input::{InputValue, describe_shape, parse_capacities, parse_requests};
pub use types::{Capacities, EvaluationDocument, Quantity, Request, ResourceName};
