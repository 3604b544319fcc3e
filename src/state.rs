//! Typed derivation states.
//!
//! A derivation state is the bonding capacity left on the atom derived last. The legacy
//! grammar encoded it as a raw integer (`0..=6`, plus `9991..=9993` once nitrogen's valence
//! restriction had been relaxed). Here the two ranges are separate variants, and the
//! integer form survives only through [`DerivationState::from_code`] and
//! [`DerivationState::code`] for interop.

use std::fmt;

/// Remaining capacity of at least 3 bonds, carrying the actual count (`3..=6`).
///
/// States 3 through 6 derive atoms identically; the count only matters when a branch opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HighCapacity(u8);

impl HighCapacity {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 6;

    pub const fn new(remaining: u8) -> Option<Self> {
        if remaining >= Self::MIN && remaining <= Self::MAX {
            Some(Self(remaining))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Ordinary bonding capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capacity {
    /// No bond to the next atom; this is where every chain starts.
    Zero,
    One,
    Two,
    High(HighCapacity),
}

impl Capacity {
    pub const fn new(remaining: u8) -> Option<Self> {
        match remaining {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => match HighCapacity::new(remaining) {
                Some(high) => Some(Self::High(high)),
                None => None,
            },
        }
    }

    pub const fn remaining(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::High(high) => high.get(),
        }
    }
}

/// Capacity reached inside a branch once nitrogen's valence restriction was relaxed.
///
/// Derives atoms exactly like the matching [`Capacity`] but remembers the relaxation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelaxedNitrogen {
    One,
    Two,
    /// Three or more bonds left.
    High,
}

impl RelaxedNitrogen {
    /// The ordinary capacity whose atom table this state shares.
    pub const fn base(self) -> Capacity {
        match self {
            Self::One => Capacity::One,
            Self::Two => Capacity::Two,
            Self::High => Capacity::High(HighCapacity(HighCapacity::MIN)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivationState {
    Capacity(Capacity),
    RelaxedNitrogen(RelaxedNitrogen),
}

impl DerivationState {
    pub const ZERO: Self = Self::Capacity(Capacity::Zero);
    pub const ONE: Self = Self::Capacity(Capacity::One);
    pub const TWO: Self = Self::Capacity(Capacity::Two);
    pub const THREE: Self = Self::Capacity(Capacity::High(HighCapacity(3)));
    pub const FOUR: Self = Self::Capacity(Capacity::High(HighCapacity(4)));
    pub const FIVE: Self = Self::Capacity(Capacity::High(HighCapacity(5)));
    pub const SIX: Self = Self::Capacity(Capacity::High(HighCapacity(6)));
    pub const RELAXED_ONE: Self = Self::RelaxedNitrogen(RelaxedNitrogen::One);
    pub const RELAXED_TWO: Self = Self::RelaxedNitrogen(RelaxedNitrogen::Two);
    pub const RELAXED_HIGH: Self = Self::RelaxedNitrogen(RelaxedNitrogen::High);

    /// The state a fresh derivation starts from.
    pub const START: Self = Self::ZERO;

    /// Every state the grammar can reach, in legacy code order.
    pub const ALL: [Self; 10] = [
        Self::ZERO,
        Self::ONE,
        Self::TWO,
        Self::THREE,
        Self::FOUR,
        Self::FIVE,
        Self::SIX,
        Self::RELAXED_ONE,
        Self::RELAXED_TWO,
        Self::RELAXED_HIGH,
    ];

    pub const fn capacity(remaining: u8) -> Option<Self> {
        match Capacity::new(remaining) {
            Some(capacity) => Some(Self::Capacity(capacity)),
            None => None,
        }
    }

    /// Parse a legacy integer state (`0..=6` or `9991..=9993`).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            9991 => Some(Self::RELAXED_ONE),
            9992 => Some(Self::RELAXED_TWO),
            9993 => Some(Self::RELAXED_HIGH),
            0..=6 => Self::capacity(code as u8),
            _ => None,
        }
    }

    /// Legacy integer form of this state.
    pub const fn code(self) -> i64 {
        match self {
            Self::Capacity(capacity) => capacity.remaining() as i64,
            Self::RelaxedNitrogen(RelaxedNitrogen::One) => 9991,
            Self::RelaxedNitrogen(RelaxedNitrogen::Two) => 9992,
            Self::RelaxedNitrogen(RelaxedNitrogen::High) => 9993,
        }
    }

    #[inline]
    pub const fn is_relaxed(self) -> bool {
        matches!(self, Self::RelaxedNitrogen(_))
    }

    /// Ordinary capacity governing atom derivation from this state.
    pub const fn effective_capacity(self) -> Capacity {
        match self {
            Self::Capacity(capacity) => capacity,
            Self::RelaxedNitrogen(relaxed) => relaxed.base(),
        }
    }
}

impl Default for DerivationState {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for DerivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity(capacity) => write!(f, "{}", capacity.remaining()),
            Self::RelaxedNitrogen(RelaxedNitrogen::High) => write!(f, "relaxed-N(3+)"),
            Self::RelaxedNitrogen(relaxed) => write!(f, "relaxed-N({})", relaxed.base().remaining()),
        }
    }
}
