//! Bit-reversal permutation tables.
//!
//! The iterative bottom-up stage loop is only equivalent to the recursive
//! even/odd FFT decomposition if the input is first reordered so that the
//! finest "decimated" pairs sit next to each other. Reversing the `pot`-bit
//! binary representation of every index produces exactly that ordering.
//!
//! Tables are built once per exponent and cached for the lifetime of the
//! process, so engines of the same size share one table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use log::trace;

/// Reverses the lowest `pot` bits of `x`.
#[inline]
pub(crate) fn bit_reverse(x: usize, pot: u32) -> usize {
    if pot == 0 {
        return x;
    }
    x.reverse_bits() >> (usize::BITS - pot)
}

/// Builds the bit-reversal table for `n = 2^pot`.
///
/// The result is a bijection on `[0, n)`: entry `i` holds the index formed by
/// reversing the `pot`-bit binary representation of `i`.
fn build_table(pot: u32) -> Arc<[usize]> {
    let n = 1usize << pot;
    (0..n).map(|i| bit_reverse(i, pot)).collect()
}

static TABLES: OnceLock<Mutex<HashMap<u32, Arc<[usize]>>>> = OnceLock::new();

fn shared_tables() -> &'static Mutex<HashMap<u32, Arc<[usize]>>> {
    TABLES.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Returns the shared bit-reversal table for `n = 2^pot`, building it on
/// first use.
pub(crate) fn bit_reversal_table(pot: u32) -> Arc<[usize]> {
    let mut tables = shared_tables()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    if let Some(table) = tables.get(&pot) {
        trace!("bit-reversal table cache hit for pot={pot}");
        return Arc::clone(table);
    }

    trace!("bit-reversal table cache miss for pot={pot}, building");
    let table = build_table(pot);
    tables.insert(pot, Arc::clone(&table));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversal_spot_checks() {
        // 0000001 reversed over 7 bits is 1000000
        assert_eq!(bit_reverse(1, 7), 64);
        assert_eq!(bit_reverse(64, 7), 1);
        // palindromic patterns map to themselves
        assert_eq!(bit_reverse(0, 10), 0);
        assert_eq!(bit_reverse(0b1000000001, 10), 0b1000000001);
        assert_eq!(bit_reverse(0b0000000110, 10), 0b0110000000);
    }

    #[test]
    fn tables_are_bijections() {
        for pot in 7..=12 {
            let n = 1usize << pot;
            let table = bit_reversal_table(pot);
            assert_eq!(table.len(), n);

            let mut seen = vec![false; n];
            for &idx in table.iter() {
                assert!(idx < n);
                assert!(!seen[idx], "index {idx} appears twice for pot={pot}");
                seen[idx] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn tables_are_involutions() {
        // Reversing twice is the identity, so the table is its own inverse.
        let table = bit_reversal_table(8);
        for (i, &rev) in table.iter().enumerate() {
            assert_eq!(table[rev], i);
        }
    }

    #[test]
    fn cache_returns_the_same_table() {
        let a = bit_reversal_table(9);
        let b = bit_reversal_table(9);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
