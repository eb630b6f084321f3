//! # tensorshuffle-operator: Antisymmetrization Operators
//!
//! Turns a compact symmetry spec such as `"0,1/2,3|4/5"` into an operator
//! that sums signed, axis-permuted copies of an array:
//!
//! - **Spec** (`spec.rs`): parser and printer for the textual format.
//!
//! - **Operand** (`operand.rs`): the `AxisPermutable` capability an operand
//!   must have, its implementation for `ndarray::ArrayD`, and JSON loading.
//!
//! - **Operator** (`operator.rs`): the immutable operator algebra. Scaling,
//!   deferred composition, and evaluation.
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use tensorshuffle_operator::Operator;
//!
//! let m = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
//! let antisymmetric = Operator::new("0/1").unwrap().evaluate(&m).unwrap();
//! assert_eq!(antisymmetric, array![[0.0, -1.0], [1.0, 0.0]].into_dyn());
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `tensorshuffle-core` internally.
//! - Spec validation happens at construction; axis-range validation at
//!   evaluation.
//! - Logs through `tracing`; installing a subscriber is the binary's job.

pub mod error;
pub mod operand;
pub mod operator;
pub mod spec;

pub use error::{OperatorError, SpecError};
pub use operand::{array_from_json, array_to_json, AxisPermutable, Operand};
pub use operator::Operator;
pub use spec::{BlockGroup, SymmetrySpec};
