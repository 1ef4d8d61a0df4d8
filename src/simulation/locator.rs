//! First-occurrence search.

use crate::constants::*;
use crate::types::{Pattern, Symbol};

/// End position of the first occurrence of `pattern` in `sequence`.
///
/// A match starting at zero-based index `i` returns `i + PATTERN_LEN`, the
/// number of symbols read once the pattern completes. No match returns
/// `sequence.len()` (for a full trial, [`NOT_FOUND`]).
#[inline(always)]
pub fn first_occurrence(pattern: &Pattern, sequence: &[Symbol]) -> u16 {
    let target = pattern.symbols();
    sequence
        .windows(PATTERN_LEN)
        .position(|w| w == target)
        .map_or(sequence.len() as u16, |i| (i + PATTERN_LEN) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_sequence;

    fn p(s: &str) -> Pattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_found_at_start() {
        let seq = parse_sequence(&"DDDUUU".repeat(SEQUENCE_LEN / 6 + 1)[..SEQUENCE_LEN]).unwrap();
        assert_eq!(first_occurrence(&p("DDD"), &seq), 3);
        assert_eq!(first_occurrence(&p("UUU"), &seq), 6);
        assert_eq!(first_occurrence(&p("DDU"), &seq), 4);
    }

    #[test]
    fn test_not_found_is_sequence_length() {
        let seq = parse_sequence(&"D".repeat(SEQUENCE_LEN)).unwrap();
        assert_eq!(first_occurrence(&p("UUD"), &seq), NOT_FOUND);
        assert_eq!(first_occurrence(&p("DDD"), &seq), 3);
    }

    #[test]
    fn test_match_on_last_symbol_collides_with_sentinel() {
        let s = format!("{}UUU", "D".repeat(SEQUENCE_LEN - 3));
        let seq = parse_sequence(&s).unwrap();
        assert_eq!(first_occurrence(&p("UUU"), &seq), NOT_FOUND);
        assert_eq!(first_occurrence(&p("DUU"), &seq), (SEQUENCE_LEN - 1) as u16);
    }

    #[test]
    fn test_short_slices() {
        assert_eq!(first_occurrence(&p("UDU"), &[]), 0);
        let two = [Symbol::Up, Symbol::Down];
        assert_eq!(first_occurrence(&p("UDU"), &two), 2);
    }
}
