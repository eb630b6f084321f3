//! # Antisymmetrization Operator
//!
//! An `Operator` is a weighted signed sum over axis permutations, described by
//! a [`SymmetrySpec`]. Applied to an operand `X` of rank `n` it computes
//!
//! ```text
//! weight * Σ sign(σ) · X.permute_axes(σ)
//! ```
//!
//! where `σ` ranges over the Cartesian product of every group's block
//! permutations, concatenated and lifted onto the axis range `0..n`.
//!
//! ## Algebra
//!
//! Operators are immutable; combining them always builds a new one.
//!
//! - `scale(c)` multiplies the weight.
//! - `a.compose(&b)` defers: evaluating the result on `X` computes
//!   `a(b(X))`. Operators form a singly linked chain, head first, and
//!   evaluation walks it from the tail back to the head.
//! - `evaluate(&x)` is the only step that touches an operand.
//!
//! ```text
//! Operator::new ──▶ scale / compose ──▶ evaluate(&operand) ──▶ result
//! ```
//!
//! Whether the spec's axes fit the operand is only known at evaluation time,
//! so operators can be built and chained without a target rank.

use std::ops::Mul;
use std::str::FromStr;
use std::sync::Arc;

use itertools::Itertools;
use tensorshuffle_core::{BlockPermutations, Lift, Sign, SignedPermutation};
use tracing::{debug, trace};

use crate::error::OperatorError;
use crate::operand::Operand;
use crate::spec::SymmetrySpec;

/// A weighted antisymmetrizer, optionally followed by the chain it defers to.
#[derive(Debug, Clone)]
pub struct Operator {
    spec: SymmetrySpec,
    groups: Vec<BlockPermutations<usize>>,
    axes: Vec<usize>,
    weight: f64,
    continuation: Option<Arc<Operator>>,
}

impl Operator {
    /// Parse `spec` and build an operator with weight `1.0`.
    pub fn new(spec: &str) -> Result<Self, OperatorError> {
        Self::from_spec(spec.parse()?)
    }

    /// Build an operator with weight `1.0` from a parsed spec.
    pub fn from_spec(spec: SymmetrySpec) -> Result<Self, OperatorError> {
        let groups = spec
            .groups()
            .iter()
            .map(|g| BlockPermutations::new(g.items().to_vec(), g.composition().to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        let axes = spec.axes().collect();
        debug!(spec = %spec, groups = groups.len(), "built operator");
        Ok(Self {
            spec,
            groups,
            axes,
            weight: 1.0,
            continuation: None,
        })
    }

    /// Replace the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn spec(&self) -> &SymmetrySpec {
        &self.spec
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The operator evaluated before this one, if any.
    pub fn continuation(&self) -> Option<&Operator> {
        self.continuation.as_deref()
    }

    /// Every link of the chain, starting with `self`.
    pub fn chain(&self) -> impl Iterator<Item = &Operator> + '_ {
        std::iter::successors(Some(self), |op| op.continuation())
    }

    /// Number of terms one application of this link sums, `Π n_g! / Π k_i!`.
    pub fn term_count(&self) -> Option<u128> {
        self.groups
            .iter()
            .try_fold(1u128, |acc, g| acc.checked_mul(g.permutation_count()?))
    }

    /// A copy with the weight multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Operator {
        let mut scaled = self.clone();
        scaled.weight *= factor;
        scaled
    }

    /// An operator that applies `inner` first and then `self`.
    ///
    /// `inner` is attached at the end of `self`'s chain, so for any chains
    /// `a` and `b`, `a.compose(&b).evaluate(x) == a.evaluate(b.evaluate(x))`.
    /// Copies the links of `self` and shares `inner`; cost is linear in the
    /// length of `self`'s chain.
    pub fn compose(&self, inner: &Operator) -> Operator {
        let links: Vec<&Operator> = self.chain().collect();
        links
            .into_iter()
            .rev()
            .fold(inner.clone(), |tail, link| link.relink(Some(Arc::new(tail))))
    }

    /// This link alone, followed by `continuation`.
    fn relink(&self, continuation: Option<Arc<Operator>>) -> Operator {
        Operator {
            spec: self.spec.clone(),
            groups: self.groups.clone(),
            axes: self.axes.clone(),
            weight: self.weight,
            continuation,
        }
    }

    /// The signed axis permutations this link sums over for a rank-`ndim` operand.
    ///
    /// Permutations of each group are combined by Cartesian product; signs
    /// multiply and permuted axes concatenate, then the result is lifted onto
    /// `0..ndim`.
    pub fn signed_axis_permutations(
        &self,
        ndim: usize,
    ) -> Result<impl Iterator<Item = SignedPermutation<usize>> + '_, OperatorError> {
        if let Some(&axis) = self.axes.iter().find(|&&axis| axis >= ndim) {
            return Err(OperatorError::DimensionMismatch { axis, ndim });
        }
        let lift = Lift::new(&self.axes, 0..ndim)?;

        Ok(self
            .groups
            .iter()
            .map(BlockPermutations::iter)
            .multi_cartesian_product()
            .map(move |combination| {
                let sign: Sign = combination.iter().map(|p| p.sign).product();
                let permuted: Vec<usize> = combination
                    .into_iter()
                    .flat_map(SignedPermutation::into_items)
                    .collect();
                SignedPermutation::new(sign, lift.apply(&permuted))
            }))
    }

    /// Apply the whole chain to `operand`, innermost link first.
    pub fn evaluate<T: Operand>(&self, operand: &T) -> Result<T, OperatorError> {
        let mut pending: Vec<&Operator> = self.chain().collect();
        let innermost = pending.pop().unwrap_or(self);
        let mut value = innermost.apply_link(operand)?;
        while let Some(link) = pending.pop() {
            value = link.apply_link(&value)?;
        }
        Ok(value)
    }

    /// Apply this link alone, ignoring the continuation.
    fn apply_link<T: Operand>(&self, operand: &T) -> Result<T, OperatorError> {
        let ndim = operand.ndim();
        let permutations = self.signed_axis_permutations(ndim)?;
        self.check_extents(operand)?;

        let mut sum: Option<T> = None;
        let mut terms = 0usize;
        for SignedPermutation { sign, items } in permutations {
            trace!(%sign, axes = ?items, "adding term");
            let term = operand.permute_axes(&items);
            sum = Some(match (sum, sign) {
                (None, Sign::Plus) => term,
                (None, Sign::Minus) => term * -1.0,
                (Some(acc), Sign::Plus) => acc + term,
                (Some(acc), Sign::Minus) => acc - term,
            });
            terms += 1;
        }

        debug!(spec = %self.spec, ndim, terms, weight = self.weight, "applied operator");
        let sum = sum.ok_or(OperatorError::EmptyExpansion)?;
        Ok(sum * self.weight)
    }

    /// Axes permuted into each other must have the same length.
    fn check_extents<T: Operand>(&self, operand: &T) -> Result<(), OperatorError> {
        for group in self.spec.groups() {
            let extents: Option<Vec<usize>> =
                group.items().iter().map(|&axis| operand.axis_len(axis)).collect();
            if let Some(extents) = extents {
                if !extents.iter().all_equal() {
                    return Err(OperatorError::ExtentMismatch {
                        axes: group.items().to_vec(),
                        extents,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Drop for Operator {
    // Unlinks iteratively; the default drop recurses once per link.
    fn drop(&mut self) {
        let mut next = self.continuation.take();
        while let Some(link) = next {
            next = Arc::try_unwrap(link)
                .ok()
                .and_then(|mut op| op.continuation.take());
        }
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, link) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            if link.weight != 1.0 {
                write!(f, "{}*", link.weight)?;
            }
            write!(f, "P({})", link.spec)?;
        }
        Ok(())
    }
}

impl Mul<f64> for Operator {
    type Output = Operator;

    fn mul(self, factor: f64) -> Operator {
        self.scale(factor)
    }
}

impl Mul<Operator> for f64 {
    type Output = Operator;

    fn mul(self, operator: Operator) -> Operator {
        operator.scale(self)
    }
}

impl Mul for Operator {
    type Output = Operator;

    /// `a * b` applies `b` first.
    fn mul(self, inner: Operator) -> Operator {
        self.compose(&inner)
    }
}
