//! Valence-aware atom derivation.
//!
//! Each derivation state selects one of four atom tables. A table maps a SELFIES symbol to
//! the SMILES fragment it derives and the state that follows. States 3 through 6 share one
//! table: the extra capacity changes how many bonds may follow, never the bond order chosen.

use ahash::AHashMap;
use compact_str::CompactString;
use once_cell::sync::Lazy;

use crate::constants::{RELAXABLE_NITROGEN, UNRECOGNIZED_TOKEN};
use crate::normalize::normalize;
use crate::state::{Capacity, DerivationState};

/// Result of deriving one atom: the SMILES fragment, and the next state.
///
/// A `None` next state means the atom used up the remaining capacity and the chain ends
/// (legacy code `-1`).
pub type AtomTransition = (CompactString, Option<DerivationState>);

/// One literal entry of an atom table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtomRule {
    pub fragment: &'static str,
    pub next: Option<DerivationState>,
}

type RuleRow = (&'static str, &'static str, Option<DerivationState>);

use DerivationState as S;

static START_RULES: [RuleRow; 20] = [
    ("[epsilon]", "", Some(S::ZERO)),
    ("[H]", "[H]", Some(S::ONE)),
    ("[F]", "F", Some(S::ONE)),
    ("[Cl]", "Cl", Some(S::ONE)),
    ("[Br]", "Br", Some(S::ONE)),
    ("[O]", "O", Some(S::TWO)),
    ("[=O]", "O", Some(S::TWO)),
    ("[N]", "N", Some(S::THREE)),
    ("[=N]", "N", Some(S::THREE)),
    ("[#N]", "N", Some(S::THREE)),
    ("[NHexpl]", "[NH]", Some(S::TWO)),
    ("[C]", "C", Some(S::FOUR)),
    ("[=C]", "C", Some(S::FOUR)),
    ("[#C]", "C", Some(S::FOUR)),
    ("[C@expl]", "[C@]", Some(S::FOUR)),
    ("[C@@expl]", "[C@@]", Some(S::FOUR)),
    ("[C@Hexpl]", "[C@H]", Some(S::THREE)),
    ("[C@@Hexpl]", "[C@@H]", Some(S::THREE)),
    ("[S]", "S", Some(S::SIX)),
    ("[=S]", "S", Some(S::SIX)),
];

static SINGLE_RULES: [RuleRow; 20] = [
    ("[epsilon]", "", None),
    ("[H]", "[H]", None),
    ("[F]", "F", None),
    ("[Cl]", "Cl", None),
    ("[Br]", "Br", None),
    ("[O]", "O", Some(S::ONE)),
    ("[=O]", "O", None),
    ("[N]", "N", Some(S::TWO)),
    ("[=N]", "N", Some(S::TWO)),
    ("[#N]", "N", Some(S::TWO)),
    ("[NHexpl]", "[NH]", Some(S::ONE)),
    ("[C]", "C", Some(S::THREE)),
    ("[=C]", "C", Some(S::THREE)),
    ("[#C]", "C", Some(S::THREE)),
    ("[C@expl]", "[C@]", Some(S::THREE)),
    ("[C@@expl]", "[C@@]", Some(S::THREE)),
    ("[C@Hexpl]", "[C@H]", Some(S::TWO)),
    ("[C@@Hexpl]", "[C@@H]", Some(S::TWO)),
    ("[S]", "S", Some(S::FIVE)),
    ("[=S]", "S", Some(S::FIVE)),
];

static DOUBLE_RULES: [RuleRow; 20] = [
    ("[epsilon]", "", None),
    ("[H]", "[H]", None),
    ("[F]", "F", None),
    ("[Cl]", "Cl", None),
    ("[Br]", "Br", None),
    ("[O]", "O", Some(S::ONE)),
    ("[=O]", "=O", None),
    ("[N]", "N", Some(S::TWO)),
    ("[=N]", "=N", Some(S::ONE)),
    ("[#N]", "=N", Some(S::ONE)),
    ("[NHexpl]", "[NH]", Some(S::ONE)),
    ("[C]", "C", Some(S::THREE)),
    ("[=C]", "=C", Some(S::TWO)),
    ("[#C]", "=C", Some(S::TWO)),
    ("[C@expl]", "[C@]", Some(S::THREE)),
    ("[C@@expl]", "[C@@]", Some(S::THREE)),
    ("[C@Hexpl]", "[C@H]", Some(S::TWO)),
    ("[C@@Hexpl]", "[C@@H]", Some(S::TWO)),
    ("[S]", "S", Some(S::FIVE)),
    ("[=S]", "=S", Some(S::FOUR)),
];

static HIGH_RULES: [RuleRow; 20] = [
    ("[epsilon]", "", None),
    ("[H]", "[H]", None),
    ("[F]", "F", None),
    ("[Cl]", "Cl", None),
    ("[Br]", "Br", None),
    ("[O]", "O", Some(S::ONE)),
    ("[=O]", "=O", None),
    ("[N]", "N", Some(S::TWO)),
    ("[=N]", "=N", Some(S::ONE)),
    ("[#N]", "#N", None),
    ("[NHexpl]", "[NH]", Some(S::ONE)),
    ("[C]", "C", Some(S::THREE)),
    ("[=C]", "=C", Some(S::TWO)),
    ("[#C]", "#C", Some(S::ONE)),
    ("[C@expl]", "[C@]", Some(S::THREE)),
    ("[C@@expl]", "[C@@]", Some(S::THREE)),
    ("[C@Hexpl]", "[C@H]", Some(S::TWO)),
    ("[C@@Hexpl]", "[C@@H]", Some(S::TWO)),
    ("[S]", "S", Some(S::FIVE)),
    ("[=S]", "=S", Some(S::FOUR)),
];

/// Immutable atom transition table for one group of derivation states.
#[derive(Debug)]
pub struct AtomTable {
    rules: AHashMap<&'static str, AtomRule>,
    /// Next state for symbols the table does not list (the `[???]` entry).
    pub unrecognized: DerivationState,
}

impl AtomTable {
    fn from_rows(rows: &'static [RuleRow], unrecognized: DerivationState) -> Self {
        let rules = rows
            .iter()
            .map(|&(token, fragment, next)| (token, AtomRule { fragment, next }))
            .collect();
        Self {
            rules,
            unrecognized,
        }
    }

    /// The table governing derivation from `state`.
    ///
    /// Relaxed-nitrogen states use the table of their base capacity.
    pub fn for_state(state: DerivationState) -> &'static AtomTable {
        match state.effective_capacity() {
            Capacity::Zero => &START_TABLE,
            Capacity::One => &SINGLE_TABLE,
            Capacity::Two => &DOUBLE_TABLE,
            Capacity::High(_) => &HIGH_TABLE,
        }
    }

    /// Look up a literal symbol, including the `[???]` fallback entry.
    ///
    /// The fallback entry derives the empty string and continues from the fallback state.
    pub fn rule(&self, token: &str) -> Option<AtomRule> {
        if token == UNRECOGNIZED_TOKEN {
            return Some(AtomRule {
                fragment: "",
                next: Some(self.unrecognized),
            });
        }
        self.rules.get(token).copied()
    }

    /// Iterate over the literal symbols of this table.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

static START_TABLE: Lazy<AtomTable> = Lazy::new(|| AtomTable::from_rows(&START_RULES, S::SIX));
static SINGLE_TABLE: Lazy<AtomTable> = Lazy::new(|| AtomTable::from_rows(&SINGLE_RULES, S::SIX));
static DOUBLE_TABLE: Lazy<AtomTable> = Lazy::new(|| AtomTable::from_rows(&DOUBLE_RULES, S::SIX));
static HIGH_TABLE: Lazy<AtomTable> = Lazy::new(|| AtomTable::from_rows(&HIGH_RULES, S::SIX));

/// Next state for symbols the table of `state` does not list.
#[inline]
pub fn fallback_state(state: DerivationState) -> DerivationState {
    AtomTable::for_state(state).unrecognized
}

/// Derive the SMILES fragment for a non-branch, non-ring SELFIES symbol.
///
/// # Arguments
/// * `token` - The SELFIES symbol to derive, e.g. `[=O]`
/// * `state` - The current derivation state
/// * `n_restrict` - If true, nitrogen is restricted to 3 bonds
///
/// # Returns
/// The derived fragment and the next state. Symbols outside the table are normalized
/// into a best-effort fragment and continue from the table's fallback state.
pub fn derive_atom(token: &str, state: DerivationState, n_restrict: bool) -> AtomTransition {
    let table = AtomTable::for_state(state);

    let Some(rule) = table.rule(token) else {
        log::debug!("Unrecognized symbol {} in state {}, normalizing", token, state);
        return (normalize(token), Some(table.unrecognized));
    };

    let mut next = rule.next;

    // relax nitrogen constraints if n_restrict = false
    if !n_restrict && RELAXABLE_NITROGEN.contains(&token) {
        next = Some(if state.is_relaxed() {
            S::FOUR
        } else {
            table.unrecognized
        });
        log::debug!(
            "Relaxed nitrogen {} in state {}: next state {:?} -> {:?}",
            token,
            state,
            rule.next,
            next
        );
    }

    (CompactString::from(rule.fragment), next)
}
