//! # Block Permutations
//!
//! Enumerates the distinct rearrangements of an item sequence whose items are
//! grouped into equivalence blocks, tagging each with its parity.
//!
//! ## Algorithm
//!
//! Knuth's Algorithm L (TAOCP 4A, §7.2.1.2) run over a multiset. Each item is
//! mapped to the index of its block, so `('a','b','c','d')` with composition
//! `(2, 2)` becomes the block-id array `[0, 0, 1, 1]`. Algorithm L visits every
//! distinct arrangement of that array in lexicographic order, starting from
//! the ascending one and stopping at the descending one. Every swap and suffix
//! reversal applied to the block-id array is applied to the items as well, and
//! the running sign is updated from those same moves:
//!
//! - a swap is one transposition;
//! - reversing a suffix of length `L` is `L / 2` transpositions.
//!
//! The sign is therefore the parity of the *labelled* rearrangement, not of
//! the block-id arrangement. Block structure only decides which
//! rearrangements get visited.
//!
//! The number of permutations produced is `n! / (k_1! k_2! ... k_m!)` for
//! block sizes `k_i`.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::error::ConfigurationError;
use crate::sign::Sign;
use crate::source::{PermutationSource, SignedPermutation};

/// Distinct signed permutations of items partitioned into equivalence blocks.
///
/// Blocks are contiguous runs of the reference order: block `i` owns the
/// `composition[i]` items following those owned by blocks `0..i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPermutations<T> {
    items: Vec<T>,
    composition: Vec<usize>,
    blocks: Vec<usize>,
}

impl<T> BlockPermutations<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Build an enumerator over `items` with equivalence blocks of the given sizes.
    ///
    /// Fails if the items are not pairwise distinct, a block size is zero, or
    /// the block sizes do not sum to the number of items.
    pub fn new(
        items: impl IntoIterator<Item = T>,
        composition: impl IntoIterator<Item = usize>,
    ) -> Result<Self, ConfigurationError> {
        let items: Vec<T> = items.into_iter().collect();
        let composition: Vec<usize> = composition.into_iter().collect();

        if let Some(index) = composition.iter().position(|&size| size == 0) {
            return Err(ConfigurationError::EmptyBlock { index });
        }
        if composition.iter().sum::<usize>() != items.len() {
            return Err(ConfigurationError::NotAComposition {
                composition: format!("{composition:?}"),
                len: items.len(),
            });
        }
        ensure_distinct(&items)?;

        let blocks = composition
            .iter()
            .enumerate()
            .flat_map(|(block, &size)| std::iter::repeat(block).take(size))
            .collect();

        Ok(Self {
            items,
            composition,
            blocks,
        })
    }

    /// Every item in its own block: plain permutations with standard parity.
    pub fn distinct(items: impl IntoIterator<Item = T>) -> Result<Self, ConfigurationError> {
        let items: Vec<T> = items.into_iter().collect();
        let composition = vec![1; items.len()];
        Self::new(items, composition)
    }
}

impl<T: Clone> BlockPermutations<T> {
    /// Reference order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Block sizes.
    pub fn composition(&self) -> &[usize] {
        &self.composition
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of permutations the enumerator yields, `n! / Π k_i!`.
    ///
    /// Computed as a product of binomial coefficients so intermediate values
    /// stay small. `None` if the count does not fit in a `u128`.
    pub fn permutation_count(&self) -> Option<u128> {
        let mut placed: u128 = 0;
        let mut count: u128 = 1;
        for &size in &self.composition {
            for k in 1..=size as u128 {
                placed += 1;
                // C(placed, k) built incrementally: multiply before dividing
                // keeps every step an exact integer.
                count = count.checked_mul(placed)? / k;
            }
        }
        Some(count)
    }

    /// A fresh pass over every distinct signed permutation.
    pub fn iter(&self) -> SignedPermutations<T> {
        SignedPermutations {
            items: self.items.clone(),
            blocks: self.blocks.clone(),
            sign: Sign::Plus,
            exhausted: false,
        }
    }

    /// The same permutations in the same order, without signs.
    pub fn unsigned(&self) -> impl Iterator<Item = Vec<T>> {
        self.iter().map(SignedPermutation::into_items)
    }
}

impl<T: Clone + Eq + Hash> PermutationSource for BlockPermutations<T> {
    type Label = T;
    type Iter<'a> = SignedPermutations<T> where Self: 'a;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn signed_permutations(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a BlockPermutations<T> {
    type Item = SignedPermutation<T>;
    type IntoIter = SignedPermutations<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the signed permutations of a [`BlockPermutations`].
///
/// Owns its working buffers; they are mutated in place between yields.
#[derive(Debug, Clone)]
pub struct SignedPermutations<T> {
    items: Vec<T>,
    blocks: Vec<usize>,
    sign: Sign,
    exhausted: bool,
}

impl<T> SignedPermutations<T> {
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.blocks.swap(a, b);
    }

    fn reverse_from(&mut self, start: usize) {
        self.items[start..].reverse();
        self.blocks[start..].reverse();
    }

    /// Step to the lexicographically next block-id arrangement.
    fn advance(&mut self) {
        let n = self.blocks.len();
        let Some(p0) = (0..n.saturating_sub(1))
            .rev()
            .find(|&p| self.blocks[p] < self.blocks[p + 1])
        else {
            self.exhausted = true;
            return;
        };
        // blocks[p0 + 1] > blocks[p0], so the search cannot come up empty.
        let p1 = (p0 + 1..n)
            .rev()
            .find(|&p| self.blocks[p0] < self.blocks[p])
            .unwrap_or(p0 + 1);

        self.swap(p0, p1);
        self.sign = -self.sign;

        let tail = n - p0 - 1;
        self.reverse_from(p0 + 1);
        self.sign *= Sign::from_transpositions(tail / 2);
    }
}

impl<T: Clone> Iterator for SignedPermutations<T> {
    type Item = SignedPermutation<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = SignedPermutation::new(self.sign, self.items.clone());
        self.advance();
        Some(current)
    }
}

impl<T: Clone> FusedIterator for SignedPermutations<T> {}

/// Reject item sequences that repeat a label.
pub(crate) fn ensure_distinct<T>(items: &[T]) -> Result<(), ConfigurationError>
where
    T: Eq + Hash + Debug,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item) {
            return Err(ConfigurationError::DuplicateItem {
                item: format!("{item:?}"),
            });
        }
    }
    Ok(())
}
