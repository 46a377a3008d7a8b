use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeasibilityErrorKind {
    /// A request (or the capacity map) is not shaped as a key to number mapping.
    Structural,
    /// A capacity or requested amount is present but not a number.
    TypeKind,
}

/// Contract violation raised by the untyped entry point.
///
/// Infeasibility is never reported through this type: an infeasible
/// allocation is a plain `false` verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", context_suffix(.index, .resource))]
pub struct FeasibilityError {
    pub kind: FeasibilityErrorKind,
    pub message: String,
    pub index: Option<usize>,
    pub resource: Option<String>,
}

impl FeasibilityError {
    pub fn new(kind: FeasibilityErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            index: None,
            resource: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn is_structural(&self) -> bool {
        self.kind == FeasibilityErrorKind::Structural
    }
}

fn context_suffix(index: &Option<usize>, resource: &Option<String>) -> String {
    match (index, resource) {
        (Some(index), Some(resource)) => format!(" (index={index}, resource={resource})"),
        (Some(index), None) => format!(" (index={index})"),
        (None, Some(resource)) => format!(" (resource={resource})"),
        (None, None) => String::new(),
    }
}

pub fn structural(message: impl Into<String>) -> FeasibilityError {
    FeasibilityError::new(FeasibilityErrorKind::Structural, message)
}

pub fn type_kind(message: impl Into<String>) -> FeasibilityError {
    FeasibilityError::new(FeasibilityErrorKind::TypeKind, message)
}
