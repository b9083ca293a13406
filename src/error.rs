//! Error types for roster optimization.
//!
//! Only configuration and input problems are errors. Quota infeasibility is
//! never raised: the optimizer does what it can and the evaluation penalizes
//! the residual (see [`crate::ga::RepairReport`]).

use thiserror::Error;

/// Errors reported before a run starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShiftError {
    /// A constraint configuration names a template that is not registered.
    #[error("unknown constraint template `{id}`; available: {}", available.join(", "))]
    UnknownTemplate { id: String, available: Vec<String> },

    /// A parameter override has the wrong type or is out of range.
    #[error("invalid parameter `{parameter}` for `{template}`: {reason}")]
    InvalidParameter {
        template: String,
        parameter: String,
        reason: String,
    },

    /// A cell code outside `0..=3`.
    #[error("invalid cell code: {0}")]
    InvalidCellCode(u8),

    /// The planning input is internally inconsistent.
    #[error("invalid planning input: {0}")]
    InvalidInput(String),

    /// The GA configuration is invalid.
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_template_lists_ids() {
        let err = ShiftError::UnknownTemplate {
            id: "nope".into(),
            available: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown constraint template `nope`; available: a, b"
        );
    }
}
