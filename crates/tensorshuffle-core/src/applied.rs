//! # Applied Permutations
//!
//! Extends permutations of a few labels to permutations of a larger operand
//! sequence that contains them. Operand positions whose label belongs to the
//! source take the correspondingly permuted label; every other position keeps
//! its own label. Fixed positions add no transpositions, so signs pass
//! through unchanged.
//!
//! The subset requirement is checked once, at construction.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::block::ensure_distinct;
use crate::error::ConfigurationError;
use crate::source::{PermutationSource, SignedPermutation};

/// Position mapping from a label subset onto an operand sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lift<T> {
    operand: Vec<T>,
    /// For each operand position, the index of its label among the subset items.
    slots: Vec<Option<usize>>,
}

impl<T> Lift<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Map `items` onto `operand`. Both must be free of repeated labels and
    /// every item must occur in the operand.
    pub fn new(
        items: &[T],
        operand: impl IntoIterator<Item = T>,
    ) -> Result<Self, ConfigurationError> {
        let operand: Vec<T> = operand.into_iter().collect();
        ensure_distinct(items)?;
        ensure_distinct(&operand)?;

        if !items.iter().all(|item| operand.contains(item)) {
            return Err(ConfigurationError::NotASubset {
                items: format!("{items:?}"),
                operand: format!("{operand:?}"),
            });
        }

        let index_of: HashMap<&T, usize> = items.iter().enumerate().map(|(k, t)| (t, k)).collect();
        let slots = operand.iter().map(|label| index_of.get(label).copied()).collect();

        Ok(Self { operand, slots })
    }
}

impl<T: Clone> Lift<T> {
    /// The operand sequence in reference order.
    pub fn operand(&self) -> &[T] {
        &self.operand
    }

    /// Place a rearrangement of the subset items onto the operand.
    ///
    /// `permuted[k]` replaces the operand label equal to the `k`-th subset
    /// item. Positions not covered keep their label.
    pub fn apply(&self, permuted: &[T]) -> Vec<T> {
        self.slots
            .iter()
            .zip(&self.operand)
            .map(|(slot, label)| slot.and_then(|k| permuted.get(k)).unwrap_or(label).clone())
            .collect()
    }
}

/// The permutations of a source, lifted onto an operand sequence.
#[derive(Debug, Clone)]
pub struct AppliedPermutations<S: PermutationSource> {
    source: S,
    lift: Lift<S::Label>,
}

impl<S> AppliedPermutations<S>
where
    S: PermutationSource,
    S::Label: Debug,
{
    /// Fails with [`ConfigurationError::NotASubset`] if some source item is
    /// missing from `operand`.
    pub fn new(
        source: S,
        operand: impl IntoIterator<Item = S::Label>,
    ) -> Result<Self, ConfigurationError> {
        let lift = Lift::new(source.items(), operand)?;
        Ok(Self { source, lift })
    }
}

impl<S: PermutationSource> AppliedPermutations<S> {
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn lift(&self) -> &Lift<S::Label> {
        &self.lift
    }

    /// A fresh pass over the lifted signed permutations.
    pub fn iter(&self) -> AppliedIter<'_, S> {
        AppliedIter {
            inner: self.source.signed_permutations(),
            lift: &self.lift,
        }
    }
}

impl<S: PermutationSource> PermutationSource for AppliedPermutations<S> {
    type Label = S::Label;
    type Iter<'a> = AppliedIter<'a, S> where Self: 'a;

    /// The operand sequence: lifted permutations rearrange all of it.
    fn items(&self) -> &[S::Label] {
        self.lift.operand()
    }

    fn signed_permutations(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

/// Iterator over [`AppliedPermutations`].
pub struct AppliedIter<'a, S: PermutationSource + 'a> {
    inner: S::Iter<'a>,
    lift: &'a Lift<S::Label>,
}

impl<'a, S: PermutationSource + 'a> Iterator for AppliedIter<'a, S> {
    type Item = SignedPermutation<S::Label>;

    fn next(&mut self) -> Option<Self::Item> {
        let SignedPermutation { sign, items } = self.inner.next()?;
        Some(SignedPermutation::new(sign, self.lift.apply(&items)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockPermutations;
    use crate::sign::Sign;

    #[test]
    fn test_lift_onto_five_labels() {
        let bp = BlockPermutations::distinct(['b', 'c', 'd']).unwrap();
        let applied = AppliedPermutations::new(bp, ['a', 'b', 'c', 'd', 'e']).unwrap();
        let perms: Vec<(i8, String)> = applied
            .iter()
            .map(|p| (p.sign.as_i8(), p.items.into_iter().collect()))
            .collect();
        assert_eq!(
            perms,
            vec![
                (1, "abcde".to_string()),
                (-1, "abdce".to_string()),
                (-1, "acbde".to_string()),
                (1, "acdbe".to_string()),
                (1, "adbce".to_string()),
                (-1, "adcbe".to_string()),
            ]
        );
    }

    #[test]
    fn test_lift_onto_axis_range() {
        let bp = BlockPermutations::new([1usize, 3], [1, 1]).unwrap();
        let applied = AppliedPermutations::new(bp, 0..5).unwrap();
        let perms: Vec<_> = applied.iter().map(SignedPermutation::into_parts).collect();
        assert_eq!(
            perms,
            vec![
                (Sign::Plus, vec![0, 1, 2, 3, 4]),
                (Sign::Minus, vec![0, 3, 2, 1, 4]),
            ]
        );
    }

    #[test]
    fn test_rejects_items_outside_operand() {
        let bp = BlockPermutations::new(['a', 'b'], [1, 1]).unwrap();
        let err = AppliedPermutations::new(bp, ['a', 'c']).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NotASubset {
                items: "['a', 'b']".into(),
                operand: "['a', 'c']".into(),
            }
        );
    }

    #[test]
    fn test_rejects_axis_labels_beyond_range() {
        let bp = BlockPermutations::new([0usize, 7], [1, 1]).unwrap();
        assert!(AppliedPermutations::new(bp, 0..5).is_err());
    }

    #[test]
    fn test_nested_lift() {
        let bp = BlockPermutations::distinct([2usize, 3]).unwrap();
        let inner = AppliedPermutations::new(bp, 1..4).unwrap();
        let outer = AppliedPermutations::new(inner, 0..6).unwrap();
        assert_eq!(outer.items(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(outer.lift().operand(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(outer.source().items(), &[1, 2, 3]);
        assert_eq!(outer.source().source().items(), &[2, 3]);
        let perms: Vec<_> = outer.signed_permutations().map(|p| p.items).collect();
        assert_eq!(perms, vec![vec![0, 1, 2, 3, 4, 5], vec![0, 1, 3, 2, 4, 5]]);
    }

    #[test]
    fn test_apply_keeps_uncovered_positions() {
        let lift = Lift::new(&[4usize, 1], 0..6).unwrap();
        assert_eq!(lift.apply(&[1, 4]), vec![0, 4, 2, 3, 1, 5]);
        assert_eq!(lift.apply(&[4, 1]), vec![0, 1, 2, 3, 4, 5]);
    }
}
