//! Shared types used across the codebase

/// Database operations supported by the repositories.
/// Used when classifying driver errors, since the same constraint failure
/// means different things on insert and on delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Select,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Select => "select",
        }
    }
}
