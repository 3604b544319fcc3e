//! Packing SELFIES symbol sequences into integers.
//!
//! Ring and branch symbols are followed by symbols that encode a length. Each of those
//! symbols is read as a digit in base 20 via [`INDEX_ALPHABET`].

use ahash::AHashMap;
use once_cell::sync::Lazy;
use rayon::prelude::*;

use crate::constants::{ALPHABET_SIZE, INDEX_ALPHABET};

static ALPHABET_CODE: Lazy<AHashMap<&'static str, u8>> = Lazy::new(|| {
    INDEX_ALPHABET
        .iter()
        .enumerate()
        .map(|(code, &token)| (token, code as u8))
        .collect()
});

/// Code of `token` in the index alphabet, if it belongs to it.
#[inline]
pub fn alphabet_code(token: &str) -> Option<u8> {
    ALPHABET_CODE.get(token).copied()
}

/// Convert a sequence of SELFIES symbols `[c_1, ..., c_n]` into a number N.
///
/// Each symbol becomes its alphabet code, the first code is incremented by one, and the
/// list is read as a number in base 20 with `c_1` as the most significant digit.
///
/// # Arguments
/// * `tokens` - The symbols to encode, possibly empty
/// * `default` - Returned when a symbol is outside the alphabet, or the value overflows `u64`
pub fn chars_index<S: AsRef<str>>(tokens: &[S], default: u64) -> u64 {
    try_chars_index(tokens).unwrap_or(default)
}

/// Like [`chars_index`], but `None` where `chars_index` would return its default.
pub fn try_chars_index<S: AsRef<str>>(tokens: &[S]) -> Option<u64> {
    if !tokens.iter().all(|t| alphabet_code(t.as_ref()).is_some()) {
        return None;
    }

    let last = tokens.len().saturating_sub(1);
    let mut n: u64 = 0;
    for (i, token) in tokens.iter().rev().enumerate() {
        let code = u64::from(alphabet_code(token.as_ref())?);
        let digit = code + u64::from(i == last);
        let place = ALPHABET_SIZE.checked_pow(u32::try_from(i).ok()?)?;
        n = n.checked_add(digit.checked_mul(place)?)?;
    }
    Some(n)
}

/// Run [`chars_index`] over many independent sequences in parallel.
pub fn batch_chars_index<S: AsRef<str> + Sync>(sequences: &[Vec<S>], default: u64) -> Vec<u64> {
    log::trace!("Indexing {} symbol sequences", sequences.len());
    sequences
        .par_iter()
        .map(|tokens| chars_index(tokens, default))
        .collect()
}
