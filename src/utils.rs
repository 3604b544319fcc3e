//! Utility functions for splitting and classifying SELFIES symbols.

use compact_str::CompactString;
use fancy_regex::Regex;
use rayon::prelude::*;

/// Which derivation primitive a SELFIES symbol is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `[BranchL_X]`, handled by [`crate::derive_branch`]
    Branch,
    /// `[RingL]`, resolved by the caller
    Ring,
    /// `.` separating disconnected fragments
    Dot,
    /// Everything else, handled by [`crate::derive_atom`]
    Atom,
}

impl TokenKind {
    pub fn of(token: &str) -> Self {
        if token == "." {
            Self::Dot
        } else if token.contains("Branch") {
            Self::Branch
        } else if token.contains("Ring") {
            Self::Ring
        } else {
            Self::Atom
        }
    }
}

/// Split a SELFIES string into its bracketed symbols and `.` separators.
///
/// Text outside brackets (other than `.`) is skipped.
pub fn split_selfies(selfies: &str, pattern: &Regex) -> Vec<CompactString> {
    let mut tokens = Vec::new();
    for m in pattern.find_iter(selfies).flatten() {
        tokens.push(CompactString::from(m.as_str()));
    }
    log::trace!("Split {} bytes into {} symbols", selfies.len(), tokens.len());
    tokens
}

/// Split many SELFIES strings in parallel.
pub fn batch_split_selfies(selfies_list: &[String], pattern: &Regex) -> Vec<Vec<CompactString>> {
    selfies_list
        .par_iter()
        .map(|selfies| split_selfies(selfies, pattern))
        .collect()
}
