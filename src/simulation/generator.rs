//! Trial generation: one random up/down sequence per call.

use crate::constants::*;
use crate::types::{Sequence, Symbol};

use super::fast_prng::RandomSource;

/// Map one die draw to a symbol: above [`UP_THRESHOLD`] is `U`.
#[inline(always)]
pub fn symbol_from_draw(value: u32) -> Symbol {
    if value > UP_THRESHOLD {
        Symbol::Up
    } else {
        Symbol::Down
    }
}

/// Fill a fresh [`SEQUENCE_LEN`]-symbol sequence from `rng`.
#[inline(always)]
pub fn generate_sequence<R: RandomSource + ?Sized>(rng: &mut R) -> Sequence {
    let mut seq = [Symbol::Down; SEQUENCE_LEN];
    for s in &mut seq {
        *s = symbol_from_draw(rng.draw());
    }
    seq
}
