//! # Error Types
//!
//! Every constraint on permutation inputs is checked when a value is
//! constructed, never while it is being iterated. A `BlockPermutations` or
//! `AppliedPermutations` that exists is valid for its whole lifetime, so the
//! iterators they hand out are infallible.
//!
//! Labels are generic, so the variants carry their offending values rendered
//! with `Debug` rather than the values themselves.

use thiserror::Error;

/// Invalid input to a permutation constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Block sizes do not sum to the number of items.
    #[error("{composition} is not an integer composition of {len}")]
    NotAComposition {
        /// The rejected composition, rendered.
        composition: String,
        /// The number of items it was meant to partition.
        len: usize,
    },

    /// A composition entry of zero.
    #[error("block {index} of the composition is empty")]
    EmptyBlock {
        /// Position of the zero entry.
        index: usize,
    },

    /// The same label appears twice in one item set.
    #[error("item {item} appears more than once")]
    DuplicateItem {
        /// The repeated label, rendered.
        item: String,
    },

    /// A lift whose source items are not all present in the operand set.
    #[error("{items} is not a subset of {operand}")]
    NotASubset {
        /// The source items, rendered.
        items: String,
        /// The operand set, rendered.
        operand: String,
    },

    /// A sequence that is not a rearrangement of its reference.
    #[error("{permuted} is not a permutation of {reference}")]
    NotAPermutation {
        /// The reference sequence, rendered.
        reference: String,
        /// The supposed rearrangement, rendered.
        permuted: String,
    },
}
