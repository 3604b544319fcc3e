//! Grammar core of a SELFIES to SMILES translator.
//!
//! A SELFIES string is derived symbol by symbol. Each symbol is turned into a SMILES fragment
//! by a valence-aware state machine, so the output never exceeds an atom's bonding capacity:
//!
//! - [`derive_atom`] derives atom symbols and falls back to [`normalize`] for symbols it
//!   does not know.
//! - [`derive_branch`] gives the states around a `[BranchL_X]` symbol.
//! - [`chars_index`] packs the symbols that follow ring and branch symbols into an integer.
//!
//! Walking the symbol stream, keeping the branch stack and closing rings are left to the
//! caller; [`split_selfies`] and [`TokenKind`] help with the first step.
//!
//! ```
//! use rustselfies::{derive_atom, derive_branch, DerivationState};
//!
//! let (c, state) = derive_atom("[C]", DerivationState::START, true);
//! assert_eq!(c, "C");
//! let state = state.unwrap();
//! let (o, end) = derive_atom("[=O]", state, true);
//! assert_eq!(o, "=O");
//! assert_eq!(end, None);
//!
//! let branch = derive_branch("[Branch1_1]", state).unwrap();
//! assert_eq!(branch.next, DerivationState::TWO);
//! ```

pub mod alphabet;
pub mod atom;
pub mod branch;
pub mod constants;
pub mod error;
pub mod normalize;
pub mod state;
pub mod utils;

#[cfg(feature = "python")]
mod bindings;

pub use alphabet::{alphabet_code, batch_chars_index, chars_index, try_chars_index};
pub use atom::{derive_atom, fallback_state, AtomRule, AtomTable, AtomTransition};
pub use branch::{branch_degree, branch_row, can_originate_branch, derive_branch, BranchTransition};
pub use error::{GrammarError, Result};
pub use normalize::normalize;
pub use state::{Capacity, DerivationState, HighCapacity, RelaxedNitrogen};
pub use utils::{batch_split_selfies, split_selfies, TokenKind};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Valence-aware SELFIES derivation grammar with Python bindings
#[cfg(feature = "python")]
#[pymodule]
fn rustselfies(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    m.add_function(wrap_pyfunction!(bindings::get_next_state, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_next_branch_state, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::get_chars_index, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::batch_chars_index, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::process_unknown_char, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::split_selfies, m)?)?;
    Ok(())
}

// ============================================================================
// RUST TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SELFIES_TOKEN_PATTERN;
    use fancy_regex::Regex;

    /// Thread states through a linear chain of atom symbols, stopping when capacity runs out.
    fn derive_chain(selfies: &str, n_restrict: bool) -> String {
        let pattern = Regex::new(SELFIES_TOKEN_PATTERN).unwrap();
        let mut smiles = String::new();
        let mut state = DerivationState::START;
        for token in split_selfies(selfies, &pattern) {
            assert_eq!(TokenKind::of(&token), TokenKind::Atom);
            let (fragment, next) = derive_atom(&token, state, n_restrict);
            smiles.push_str(&fragment);
            match next {
                Some(next) => state = next,
                None => break,
            }
        }
        smiles
    }

    #[test]
    fn test_chain_ethanol() {
        assert_eq!(derive_chain("[C][C][O]", true), "CCO");
    }

    #[test]
    fn test_chain_bond_orders_are_capped() {
        // oxygen after a single remaining bond cannot be double bonded
        assert_eq!(derive_chain("[F][=O]", true), "FO");
        assert_eq!(derive_chain("[C][#C][#C]", true), "C#CC");
        assert_eq!(derive_chain("[O][#N]", true), "O=N");
    }

    #[test]
    fn test_chain_stops_when_saturated() {
        assert_eq!(derive_chain("[C][F][C][C]", true), "CF");
        assert_eq!(derive_chain("[C][#N][C]", true), "C#N");
    }

    #[test]
    fn test_chain_unknown_symbols() {
        assert_eq!(derive_chain("[c][Na+][C]", true), "c[Na+]C");
    }

    #[test]
    fn test_chain_relaxed_nitrogen() {
        // restricted: N has two bonds left, so [#C] is capped at a double bond
        assert_eq!(derive_chain("[C][N][=C]", true), "CN=C");
        assert_eq!(derive_chain("[O][N][#C]", true), "ON=C");
        // relaxed: N continues from the fallback state
        assert_eq!(derive_chain("[O][N][#C]", false), "ON#C");
    }

    #[test]
    fn test_branch_then_atoms() {
        let (_, state) = derive_atom("[C]", DerivationState::START, true);
        let branch = derive_branch("[Branch1_1]", state.unwrap()).unwrap();
        let (fragment, inner) = derive_atom("[F]", branch.initial.unwrap(), true);
        assert_eq!(fragment, "F");
        assert_eq!(inner, None);
        let (fragment, next) = derive_atom("[=O]", branch.next, true);
        assert_eq!(fragment, "=O");
        assert_eq!(next, None);
    }

    #[test]
    fn test_concurrent_derivations_agree() {
        use rayon::prelude::*;

        let inputs = vec!["[C][C][O]"; 64];
        let results: Vec<String> = inputs.par_iter().map(|s| derive_chain(s, true)).collect();
        assert!(results.iter().all(|r| r == "CCO"));
    }
}
