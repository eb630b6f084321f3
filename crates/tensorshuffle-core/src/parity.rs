//! # Permutation Signature
//!
//! Parity of an arbitrary rearrangement of a reference sequence, computed
//! independently of any enumerator. Used to cross-check enumerated signs and
//! to test operands for antisymmetry.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ConfigurationError;
use crate::sign::Sign;

/// Parity of `permuted` relative to `reference`.
///
/// A permutation of `n` labels with `c` cycles decomposes into `n - c`
/// transpositions. Fails if `permuted` is not a rearrangement of `reference`
/// or if `reference` repeats a label.
pub fn signature<T>(reference: &[T], permuted: &[T]) -> Result<Sign, ConfigurationError>
where
    T: Eq + Hash + Debug,
{
    let not_a_permutation = || ConfigurationError::NotAPermutation {
        reference: format!("{reference:?}"),
        permuted: format!("{permuted:?}"),
    };

    if reference.len() != permuted.len() {
        return Err(not_a_permutation());
    }
    crate::block::ensure_distinct(reference)?;

    let position: HashMap<&T, usize> = reference.iter().enumerate().map(|(i, t)| (t, i)).collect();
    let targets = permuted
        .iter()
        .map(|item| position.get(item).copied())
        .collect::<Option<Vec<usize>>>()
        .ok_or_else(not_a_permutation)?;

    let mut visited = vec![false; targets.len()];
    let mut cycles = 0;
    for start in 0..targets.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut cursor = start;
        while !visited[cursor] {
            visited[cursor] = true;
            cursor = targets[cursor];
        }
        // Revisiting an already-closed cycle means a label was used twice.
        if cursor != start {
            return Err(not_a_permutation());
        }
    }

    Ok(Sign::from_transpositions(targets.len() - cycles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_even() {
        assert_eq!(signature(&[1, 2, 3], &[1, 2, 3]).unwrap(), Sign::Plus);
        assert_eq!(signature::<u8>(&[], &[]).unwrap(), Sign::Plus);
    }

    #[test]
    fn test_transposition_is_odd() {
        assert_eq!(signature(&['a', 'b', 'c'], &['c', 'b', 'a']).unwrap(), Sign::Minus);
    }

    #[test]
    fn test_three_cycle_is_even() {
        assert_eq!(signature(&[0, 1, 2, 3], &[0, 3, 1, 2]).unwrap(), Sign::Plus);
    }

    #[test]
    fn test_double_transposition_is_even() {
        assert_eq!(signature(&[0, 1, 2, 3], &[2, 3, 0, 1]).unwrap(), Sign::Plus);
    }

    #[test]
    fn test_rejects_foreign_label() {
        let err = signature(&[0, 1, 2], &[0, 1, 5]).unwrap_err();
        assert!(matches!(err, ConfigurationError::NotAPermutation { .. }));
    }

    #[test]
    fn test_rejects_repeated_label() {
        assert!(signature(&[0, 1, 2], &[0, 0, 2]).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(signature(&[0, 1, 2], &[0, 1]).is_err());
    }
}
