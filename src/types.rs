//! Core data structures: symbols, patterns, pattern pairs and trial sequences.
//!
//! A [`Pattern`] is stored as its three symbols, most significant first. Read as
//! a binary number with `U = 1`, a pattern's value is also its index in the
//! catalog (`DDD` = 0 .. `UUU` = 7), which lets every per-pattern table be a
//! plain fixed-size array.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::constants::*;
use crate::error::SimError;

/// One element of the binary alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Down,
    Up,
}

impl Symbol {
    #[inline(always)]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Down => 'D',
            Symbol::Up => 'U',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'D' | 'd' => Some(Symbol::Down),
            'U' | 'u' => Some(Symbol::Up),
            _ => None,
        }
    }

    #[inline(always)]
    const fn bit(self) -> usize {
        match self {
            Symbol::Down => 0,
            Symbol::Up => 1,
        }
    }
}

/// One trial's worth of symbols.
pub type Sequence = [Symbol; SEQUENCE_LEN];

/// A fixed-length run of symbols searched for in each trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern([Symbol; PATTERN_LEN]);

impl Pattern {
    pub const fn new(symbols: [Symbol; PATTERN_LEN]) -> Self {
        Self(symbols)
    }

    /// Build the pattern whose binary value (`U` = 1) is `index`.
    pub const fn from_index(index: usize) -> Self {
        let mut symbols = [Symbol::Down; PATTERN_LEN];
        let mut i = 0;
        while i < PATTERN_LEN {
            if (index >> (PATTERN_LEN - 1 - i)) & 1 == 1 {
                symbols[i] = Symbol::Up;
            }
            i += 1;
        }
        Self(symbols)
    }

    /// Dense index 0..NUM_PATTERNS, equal to the catalog position.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        let mut value = 0;
        let mut i = 0;
        while i < PATTERN_LEN {
            value = (value << 1) | self.0[i].bit();
            i += 1;
        }
        value
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[Symbol; PATTERN_LEN] {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.0.iter().map(|s| s.as_char()).collect();
        f.pad(&s)
    }
}

impl FromStr for Pattern {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != PATTERN_LEN {
            return Err(SimError::InvalidPattern(s.to_string()));
        }
        let mut symbols = [Symbol::Down; PATTERN_LEN];
        for (slot, &c) in symbols.iter_mut().zip(chars.iter()) {
            *slot = Symbol::from_char(c).ok_or_else(|| SimError::InvalidPattern(s.to_string()))?;
        }
        Ok(Self(symbols))
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered pair of distinct patterns: "does `first` show up before `second`?"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PatternPair {
    pub first: Pattern,
    pub second: Pattern,
}

impl fmt::Display for PatternPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// Parse a `U`/`D` string of exactly [`SEQUENCE_LEN`] symbols.
pub fn parse_sequence(s: &str) -> Result<Sequence, SimError> {
    let mut seq = [Symbol::Down; SEQUENCE_LEN];
    let mut len = 0;
    for c in s.chars() {
        let sym = Symbol::from_char(c).ok_or_else(|| SimError::InvalidSequence {
            reason: format!("unexpected symbol {:?}", c),
        })?;
        if len == SEQUENCE_LEN {
            return Err(SimError::InvalidSequence {
                reason: format!("longer than {} symbols", SEQUENCE_LEN),
            });
        }
        seq[len] = sym;
        len += 1;
    }
    if len != SEQUENCE_LEN {
        return Err(SimError::InvalidSequence {
            reason: format!("expected {} symbols, got {}", SEQUENCE_LEN, len),
        });
    }
    Ok(seq)
}
