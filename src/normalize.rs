//! Best-effort conversion of unrecognized SELFIES symbols into SMILES fragments.

use compact_str::{format_compact, CompactString};

use crate::constants::{BOND_PREFIXES, BRACKET_LESS_SMILES, EXPLICIT_SUFFIX};

/// Convert a SELFIES symbol that no atom table lists into a plausible SMILES fragment.
///
/// Explicit aromatic symbols, for instance, are not part of the SELFIES alphabet, but
/// `[c]`, `[n]` and `[o]` still come out as `c`, `n` and `o`. The steps run in order:
///
/// 1. A bond-order or stereo marker right inside the bracket (`=`, `#`, `\`, `/`, `-`)
///    moves in front of the output.
/// 2. Elements written without brackets in SMILES lose their brackets.
/// 3. An `expl]` suffix collapses into a plain `]`.
///
/// Never fails; symbols matching none of the steps come back unchanged.
pub fn normalize(token: &str) -> CompactString {
    let mut processed = CompactString::default();
    let mut symbol = CompactString::from(token);

    // prefixes are ASCII, so byte slicing stays on char boundaries
    if BOND_PREFIXES.iter().any(|prefix| token.starts_with(prefix)) {
        processed.push_str(&token[1..2]);
        symbol = format_compact!("[{}", &token[2..]);
    }

    if BRACKET_LESS_SMILES.contains(&symbol.as_str()) {
        symbol = CompactString::from(&symbol[1..symbol.len() - 1]);
    }

    if symbol.contains(EXPLICIT_SUFFIX) {
        symbol = CompactString::from(symbol.replace(EXPLICIT_SUFFIX, "]"));
    }

    processed.push_str(&symbol);
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_aromatic() {
        assert_eq!(normalize("[c]"), "c");
        assert_eq!(normalize("[n]"), "n");
        assert_eq!(normalize("[o]"), "o");
    }

    #[test]
    fn test_normalize_bond_prefix() {
        assert_eq!(normalize("[=O]"), "=O");
        assert_eq!(normalize("[#c]"), "#c");
        assert_eq!(normalize("[-P]"), "-P");
        // not bracket-less, so the brackets stay
        assert_eq!(normalize("[=Se]"), "=[Se]");
    }

    #[test]
    fn test_normalize_stereo_prefix() {
        assert_eq!(normalize("[/C]"), "/C");
        assert_eq!(normalize("[\\Br]"), "\\Br");
        assert_eq!(normalize("[/C@@Hexpl]"), "/[C@@H]");
    }

    #[test]
    fn test_normalize_explicit_hydrogen() {
        assert_eq!(normalize("[NHexpl]"), "[NH]");
        assert_eq!(normalize("[nHexpl]"), "[nH]");
        assert_eq!(normalize("[C@Hexpl]"), "[C@H]");
        // the suffix only collapses when it closes the bracket
        assert_eq!(normalize("[explX]"), "[explX]");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize("[Xe]"), "[Xe]");
        assert_eq!(normalize("[Na+]"), "[Na+]");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("[="), "=[");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_total_and_deterministic(token in "\\PC{0,12}") {
            let first = normalize(&token);
            prop_assert_eq!(first, normalize(&token));
        }

        #[test]
        fn prop_normalize_keeps_unprefixed_brackets(body in "[A-Z][a-z]{1,2}[0-9+\\-]{0,2}") {
            let token = format!("[{}]", body);
            let expected = if BRACKET_LESS_SMILES.contains(&token.as_str()) {
                body.clone()
            } else {
                token.clone()
            };
            let normalized = normalize(&token);
            prop_assert_eq!(normalized.as_str(), expected.as_str());
        }
    }
}
