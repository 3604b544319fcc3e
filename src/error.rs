//! Error type for the derivation grammar.

use thiserror::Error;

/// Failures raised by the grammar primitives.
///
/// Unrecognized atom symbols and foreign alphabet symbols are not errors; they degrade
/// into normalized fragments and caller-supplied defaults respectively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The branch symbol does not carry a degree in `1..=3` before its closing bracket.
    #[error("Unknown branch character: {token}")]
    InvalidBranchDegree { token: String },
}

pub type Result<T> = std::result::Result<T, GrammarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_branch_degree_message() {
        let err = GrammarError::InvalidBranchDegree {
            token: "[Branch1_4]".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown branch character: [Branch1_4]");
    }
}
