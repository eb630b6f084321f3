//! # Error Types
//!
//! Three families, matching when they can be detected:
//!
//! - configuration errors (`Spec`, `Configuration`) are raised while an
//!   operator is being built;
//! - capability errors are raised when a value cannot act as an operand;
//! - dimension and extent mismatches are raised at evaluation, since an
//!   operator is built without knowing the operand it will meet.
//!
//! Nothing is retried or recovered; evaluation either returns a complete
//! result or an error.

use tensorshuffle_core::ConfigurationError;
use thiserror::Error;

/// Top-level error type for operator construction and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// Malformed symmetry-spec string.
    #[error("invalid symmetry spec: {0}")]
    Spec(#[from] SpecError),

    /// Inconsistent items, composition, or lift.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The value cannot be used as an axis-permutable operand.
    #[error("operand lacks required capability: {0}")]
    Capability(String),

    /// The operator names an axis the operand does not have.
    #[error("axis {axis} is out of range for an operand with {ndim} axes")]
    DimensionMismatch {
        /// The offending axis label.
        axis: usize,
        /// Number of axes of the operand.
        ndim: usize,
    },

    /// Axes that get permuted into each other have different lengths.
    #[error("axes {axes:?} are permuted together but have lengths {extents:?}")]
    ExtentMismatch {
        /// Axes of one spec group.
        axes: Vec<usize>,
        /// Their lengths in the operand.
        extents: Vec<usize>,
    },

    /// The operator expanded to no terms.
    #[error("operator expanded to an empty sum")]
    EmptyExpansion,

    /// An element JSON cannot carry (NaN or an infinity).
    #[error("{value} cannot be written as a JSON number")]
    NonFinite {
        /// The offending element.
        value: f64,
    },

    /// A zero-length axis followed by further axes; nested JSON arrays
    /// would drop the trailing ones.
    #[error("shape {shape:?} has an empty axis before its last axis and cannot be written as nested JSON arrays")]
    UnrepresentableShape {
        /// Shape of the array.
        shape: Vec<usize>,
    },
}

/// Error while parsing a symmetry spec such as `"0,1/2,3|4/5"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// An empty group, block, or axis token.
    #[error("empty axis in group {group:?}")]
    Empty {
        /// The group substring containing the empty segment.
        group: String,
    },

    /// A token that is not a non-negative decimal integer.
    #[error("invalid axis {token:?} in group {group:?}")]
    InvalidAxis {
        /// The offending token.
        token: String,
        /// The group substring containing it.
        group: String,
    },

    /// The same axis is named twice.
    #[error("axis {axis} appears more than once in {spec:?}")]
    DuplicateAxis {
        /// The repeated axis.
        axis: usize,
        /// The full spec, rendered.
        spec: String,
    },
}
