//! # tensorshuffle-core: Signed Multiset Permutations
//!
//! The combinatorial leaf of the tensorshuffle workspace. Everything here is
//! pure: no I/O, no shared state, no numeric arrays.
//!
//! - **Block permutations** (`block.rs`): every distinct rearrangement of an
//!   item sequence partitioned into equivalence blocks, each tagged with the
//!   parity of the labelled rearrangement. Lazy and restartable.
//!
//! - **Applied permutations** (`applied.rs`): lifts permutations of a label
//!   subset onto a larger operand sequence, holding uncovered positions fixed.
//!
//! - **Signature** (`parity.rs`): parity of an arbitrary rearrangement.
//!
//! - **Sign** (`sign.rs`): the two-valued parity type.
//!
//! ## Example
//!
//! ```
//! use tensorshuffle_core::{BlockPermutations, Sign};
//!
//! let perms = BlockPermutations::new(['a', 'b', 'c'], [1, 2]).unwrap();
//! let listed: Vec<(Sign, String)> = perms
//!     .iter()
//!     .map(|p| (p.sign, p.items.into_iter().collect()))
//!     .collect();
//! assert_eq!(
//!     listed,
//!     vec![
//!         (Sign::Plus, "abc".to_string()),
//!         (Sign::Plus, "cab".to_string()),
//!         (Sign::Minus, "cba".to_string()),
//!     ]
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tensorshuffle-*` crates.
//! - No `unsafe` code.
//! - Input validation happens in constructors; iterators never fail.

pub mod applied;
pub mod block;
pub mod error;
pub mod parity;
pub mod sign;
pub mod source;

pub use applied::{AppliedIter, AppliedPermutations, Lift};
pub use block::{BlockPermutations, SignedPermutations};
pub use error::ConfigurationError;
pub use parity::signature;
pub use sign::{InvalidSign, Sign};
pub use source::{PermutationSource, SignedPermutation};
