//! Constants shared by the derivation tables, the normalizer and the tokenizer.

/// SELFIES tokenization regex pattern
/// Matches:
/// - Bracketed symbols: [C], [=O], [C@@Hexpl], [Branch1_2], [Ring1], [epsilon], etc.
/// - Disconnected fragments: .
pub const SELFIES_TOKEN_PATTERN: &str = r"(\[[^\[\]]*\]|\.)";

/// Key of the fallback entry every atom table carries for symbols it does not list.
pub const UNRECOGNIZED_TOKEN: &str = "[???]";

/// Nitrogen symbols whose next state is relaxed when nitrogen is not restricted to 3 bonds.
///
/// `[#N]` is not listed: the legacy check compared it as a nested list and never matched.
pub const RELAXABLE_NITROGEN: [&str; 2] = ["[N]", "[=N]"];

/// Bracket prefixes (bond order or stereo marker) that the normalizer lifts out of the bracket.
pub const BOND_PREFIXES: [&str; 5] = ["[=", "[#", "[\\", "[/", "[-"];

/// SELFIES symbols whose SMILES counterparts are written without brackets by convention.
pub const BRACKET_LESS_SMILES: [&str; 15] = [
    "[B]", "[C]", "[N]", "[P]", "[O]", "[S]", "[F]", "[Cl]", "[Br]", "[I]", "[c]", "[n]", "[o]",
    "[s]", "[p]",
];

/// Suffix marking an explicit hydrogen or stereo annotation inside a SELFIES bracket.
pub const EXPLICIT_SUFFIX: &str = "expl]";

/// Ordered alphabet used to pack symbol sequences into integers (codes 0..=19).
pub const INDEX_ALPHABET: [&str; 20] = [
    "[epsilon]",
    "[Ring1]",
    "[Ring2]",
    "[Branch1_1]",
    "[Branch1_2]",
    "[Branch1_3]",
    "[Branch2_1]",
    "[Branch2_2]",
    "[Branch2_3]",
    "[F]",
    "[O]",
    "[=O]",
    "[N]",
    "[=N]",
    "[#N]",
    "[C]",
    "[=C]",
    "[#C]",
    "[S]",
    "[=S]",
];

/// Radix of the alphabet index
pub const ALPHABET_SIZE: u64 = INDEX_ALPHABET.len() as u64;

/// Legacy code for `None` next states (the chain ends after this symbol).
pub const LEGACY_HALT_CODE: i64 = -1;
