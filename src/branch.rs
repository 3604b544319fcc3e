//! Branch derivation.
//!
//! Opening `[BranchL_X]` from a derivation state selects the X-th entry of that state's row.
//! An entry gives the state the new branch starts on and the state the outer chain
//! continues from once the branch is derived.

use crate::error::{GrammarError, Result};
use crate::state::{Capacity, DerivationState};

/// One entry of the branch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchTransition {
    /// State the branch starts on; `None` when the atom has no capacity to spare.
    pub initial: Option<DerivationState>,
    /// State of the outer chain after the branch.
    pub next: DerivationState,
}

const fn entry(initial: Option<DerivationState>, next: DerivationState) -> BranchTransition {
    BranchTransition { initial, next }
}

/// Row of the branch table for `state`, one entry per branch degree 1, 2, 3.
pub const fn branch_row(state: DerivationState) -> [BranchTransition; 3] {
    use DerivationState as S;

    let relaxed_one = Some(S::RELAXED_ONE);
    let relaxed_two = Some(S::RELAXED_TWO);
    let relaxed_high = Some(S::RELAXED_HIGH);

    match state {
        S::Capacity(Capacity::Zero) | S::Capacity(Capacity::One) | S::RelaxedNitrogen(_) => {
            [entry(None, state); 3]
        }
        S::Capacity(Capacity::Two) => [entry(relaxed_one, S::ONE); 3],
        S::Capacity(Capacity::High(high)) => match high.get() {
            3 => [
                entry(relaxed_one, S::TWO),
                entry(relaxed_one, S::TWO),
                entry(relaxed_two, S::ONE),
            ],
            4 => [
                entry(relaxed_two, S::TWO),
                entry(relaxed_one, S::THREE),
                entry(relaxed_high, S::ONE),
            ],
            5 => [
                entry(relaxed_two, S::THREE),
                entry(relaxed_one, S::FOUR),
                entry(relaxed_high, S::TWO),
            ],
            _ => [
                entry(relaxed_two, S::FOUR),
                entry(relaxed_one, S::FIVE),
                entry(relaxed_high, S::THREE),
            ],
        },
    }
}

/// Decode the degree of a `[BranchL_X]` symbol (the X before the closing bracket).
pub fn branch_degree(branch_token: &str) -> Result<u8> {
    branch_token
        .chars()
        .rev()
        .nth(1)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as u8)
        .filter(|d| (1..=3).contains(d))
        .ok_or_else(|| GrammarError::InvalidBranchDegree {
            token: branch_token.to_string(),
        })
}

/// Retrieve the initial branch state and the next outer state for a branch symbol.
///
/// # Arguments
/// * `branch_token` - The branch symbol, e.g. `[Branch1_2]` or `[Branch3_1]`
/// * `state` - The current derivation state
///
/// # Errors
/// [`GrammarError::InvalidBranchDegree`] if the degree is not 1, 2 or 3.
pub fn derive_branch(branch_token: &str, state: DerivationState) -> Result<BranchTransition> {
    let degree = branch_degree(branch_token)?;
    Ok(branch_row(state)[usize::from(degree - 1)])
}

/// Whether `state` can start a branch with capacity of its own.
pub fn can_originate_branch(state: DerivationState) -> bool {
    branch_row(state).iter().any(|t| t.initial.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use DerivationState as S;

    #[test]
    fn test_branch_degree() {
        assert_eq!(branch_degree("[Branch1_1]"), Ok(1));
        assert_eq!(branch_degree("[Branch2_3]"), Ok(3));
        assert_eq!(branch_degree("[Branch3_2]"), Ok(2));
    }

    #[test]
    fn test_invalid_branch_degree() {
        for token in ["[Branch1_0]", "[Branch1_4]", "[Branch2_9]", "[BranchX]", "]", ""] {
            assert_eq!(
                derive_branch(token, S::FOUR),
                Err(GrammarError::InvalidBranchDegree {
                    token: token.to_string()
                })
            );
        }
    }

    #[test]
    fn test_derive_branch_high_capacity() {
        assert_eq!(
            derive_branch("[Branch2_3]", S::FOUR),
            Ok(BranchTransition {
                initial: Some(S::RELAXED_HIGH),
                next: S::ONE,
            })
        );
        assert_eq!(
            derive_branch("[Branch1_1]", S::SIX),
            Ok(BranchTransition {
                initial: Some(S::RELAXED_TWO),
                next: S::FOUR,
            })
        );
        assert_eq!(
            derive_branch("[Branch1_2]", S::FIVE),
            Ok(BranchTransition {
                initial: Some(S::RELAXED_ONE),
                next: S::FOUR,
            })
        );
        assert_eq!(
            derive_branch("[Branch3_3]", S::THREE),
            Ok(BranchTransition {
                initial: Some(S::RELAXED_TWO),
                next: S::ONE,
            })
        );
    }

    #[test]
    fn test_degenerate_branches_keep_state() {
        for state in [S::ZERO, S::ONE, S::RELAXED_ONE, S::RELAXED_TWO, S::RELAXED_HIGH] {
            for token in ["[Branch1_1]", "[Branch1_2]", "[Branch1_3]"] {
                let transition = derive_branch(token, state).unwrap();
                assert_eq!(transition.initial, None);
                assert_eq!(transition.next, state);
            }
            assert!(!can_originate_branch(state));
        }
    }

    #[test]
    fn test_double_capacity_branches() {
        for token in ["[Branch1_1]", "[Branch2_2]", "[Branch3_3]"] {
            assert_eq!(
                derive_branch(token, S::TWO),
                Ok(BranchTransition {
                    initial: Some(S::RELAXED_ONE),
                    next: S::ONE,
                })
            );
        }
        assert!(can_originate_branch(S::TWO));
    }

    #[test]
    fn test_branch_states_stay_in_closed_set() {
        for state in DerivationState::ALL {
            for transition in branch_row(state) {
                assert!(DerivationState::from_code(transition.next.code()).is_some());
                if let Some(initial) = transition.initial {
                    assert!(initial.is_relaxed());
                }
            }
        }
    }
}
