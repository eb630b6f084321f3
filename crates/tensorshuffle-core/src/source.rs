//! # Permutation Sources
//!
//! A permutation source owns a reference ordering of labels and can produce
//! every signed rearrangement of them that it considers distinct. Both the
//! block enumerator and the lifted (applied) permutation set are sources, so
//! a lift can wrap either one.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::sign::Sign;

/// A rearrangement of a reference sequence together with its parity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedPermutation<T> {
    /// Parity relative to the reference order.
    pub sign: Sign,
    /// The rearranged labels.
    pub items: Vec<T>,
}

impl<T> SignedPermutation<T> {
    pub fn new(sign: Sign, items: Vec<T>) -> Self {
        Self { sign, items }
    }

    /// Discard the sign.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn into_parts(self) -> (Sign, Vec<T>) {
        (self.sign, self.items)
    }
}

/// Anything that can enumerate signed permutations of a fixed label sequence.
///
/// `items()` is the reference order every yielded permutation is a
/// rearrangement of. Iteration is restartable: each call to
/// `signed_permutations()` starts from the beginning.
pub trait PermutationSource {
    /// Label type being permuted.
    type Label: Clone + Eq + Hash;

    /// Iterator returned by [`PermutationSource::signed_permutations`].
    type Iter<'a>: Iterator<Item = SignedPermutation<Self::Label>>
    where
        Self: 'a;

    /// The reference order.
    fn items(&self) -> &[Self::Label];

    /// A fresh pass over every signed permutation of [`PermutationSource::items`].
    fn signed_permutations(&self) -> Self::Iter<'_>;
}
