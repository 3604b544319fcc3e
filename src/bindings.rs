//! Python bindings exposing the grammar with legacy integer-coded states.

use fancy_regex::Regex;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::alphabet::{batch_chars_index as batch_chars_index_rs, try_chars_index};
use crate::atom::derive_atom;
use crate::branch::derive_branch;
use crate::constants::{LEGACY_HALT_CODE, SELFIES_TOKEN_PATTERN};
use crate::error::GrammarError;
use crate::normalize::normalize;
use crate::state::DerivationState;
use crate::utils::split_selfies as split_selfies_rs;

impl From<GrammarError> for PyErr {
    fn from(err: GrammarError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn state_from_code(code: i64) -> PyResult<DerivationState> {
    DerivationState::from_code(code)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown derivation state: {}", code)))
}

/// Derive a non-branch, non-ring SELFIES symbol from the given state.
///
/// Returns (derived SMILES fragment, next state); a next state of -1 ends the chain.
#[pyfunction]
#[pyo3(signature = (symbol, state, n_restrict=true))]
pub fn get_next_state(symbol: &str, state: i64, n_restrict: bool) -> PyResult<(String, i64)> {
    let (fragment, next) = derive_atom(symbol, state_from_code(state)?, n_restrict);
    let next = next.map_or(LEGACY_HALT_CODE, DerivationState::code);
    Ok((fragment.to_string(), next))
}

/// Returns (initial branch state or None, next state) for a branch symbol.
#[pyfunction]
pub fn get_next_branch_state(branch_symbol: &str, state: i64) -> PyResult<(Option<i64>, i64)> {
    let transition = derive_branch(branch_symbol, state_from_code(state)?)?;
    Ok((
        transition.initial.map(DerivationState::code),
        transition.next.code(),
    ))
}

/// Convert SELFIES symbols into their packed index.
///
/// `default` is returned unchanged (any Python object) if a symbol is unknown, or is not
/// a string.
#[pyfunction]
#[pyo3(signature = (*symbols, default=None))]
pub fn get_chars_index(
    py: Python<'_>,
    symbols: &Bound<'_, PyTuple>,
    default: Option<Py<PyAny>>,
) -> PyResult<Py<PyAny>> {
    let index = symbols
        .extract::<Vec<String>>()
        .ok()
        .and_then(|symbols| try_chars_index(&symbols));
    match (index, default) {
        (Some(n), _) => Ok(n.into_pyobject(py)?.into_any().unbind()),
        (None, Some(default)) => Ok(default),
        (None, None) => Ok(1u64.into_pyobject(py)?.into_any().unbind()),
    }
}

/// Index many symbol sequences in parallel, releasing the GIL.
#[pyfunction]
#[pyo3(signature = (sequences, default=1))]
pub fn batch_chars_index(py: Python<'_>, sequences: Vec<Vec<String>>, default: u64) -> Vec<u64> {
    py.detach(|| batch_chars_index_rs(&sequences, default))
}

/// Best-effort SMILES fragment for an unknown SELFIES symbol.
#[pyfunction]
pub fn process_unknown_char(symbol: &str) -> String {
    normalize(symbol).to_string()
}

/// Split a SELFIES string into its symbols.
#[pyfunction]
pub fn split_selfies(selfies: &str) -> PyResult<Vec<String>> {
    let pattern = Regex::new(SELFIES_TOKEN_PATTERN)
        .map_err(|e| PyValueError::new_err(format!("Invalid SELFIES pattern: {}", e)))?;
    Ok(split_selfies_rs(selfies, &pattern)
        .into_iter()
        .map(|s| s.to_string())
        .collect())
}
