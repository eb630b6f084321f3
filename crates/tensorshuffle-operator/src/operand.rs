//! # Operands
//!
//! What an operator needs from the value it is applied to: a rank, and a
//! way to reorder axes. Summation and scaling come from the value's own
//! `Add`, `Sub`, and `Mul<f64>` implementations.
//!
//! `ndarray::ArrayD` implements the capability directly. Values arriving as
//! JSON go through [`array_from_json`], which is where a non-array operand is
//! rejected at runtime.

use std::ops::{Add, Mul, Sub};

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use serde_json::{Number, Value};

use crate::error::OperatorError;

/// A value whose axes can be reordered.
pub trait AxisPermutable: Sized {
    /// Number of axes.
    fn ndim(&self) -> usize;

    /// Generalized transpose: axis `i` of the result is axis `axes[i]` of `self`.
    ///
    /// Callers pass a permutation of `0..self.ndim()`.
    fn permute_axes(&self, axes: &[usize]) -> Self;

    /// Length of `axis`, if the operand knows it.
    fn axis_len(&self, _axis: usize) -> Option<usize> {
        None
    }
}

/// An axis-permutable value closed under signed, weighted summation.
pub trait Operand:
    AxisPermutable + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> Operand for T where
    T: AxisPermutable + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}

impl<A: Clone> AxisPermutable for ArrayD<A> {
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    fn permute_axes(&self, axes: &[usize]) -> Self {
        self.view().permuted_axes(IxDyn(axes)).to_owned()
    }

    fn axis_len(&self, axis: usize) -> Option<usize> {
        self.shape().get(axis).copied()
    }
}

/// Build an `f64` array from a rectangular nested JSON array.
///
/// The shape is read from the first element at each depth; every other
/// element must match it. A bare number is a rank-0 array.
pub fn array_from_json(value: &Value) -> Result<ArrayD<f64>, OperatorError> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(elements) = cursor {
        shape.push(elements.len());
        match elements.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut data = Vec::with_capacity(shape.iter().product());
    flatten_into(value, &shape, &mut data)?;
    ArrayD::from_shape_vec(IxDyn(&shape), data)
        .map_err(|e| OperatorError::Capability(format!("cannot shape array: {e}")))
}

fn flatten_into(value: &Value, shape: &[usize], out: &mut Vec<f64>) -> Result<(), OperatorError> {
    match (shape.split_first(), value) {
        (None, Value::Number(n)) => {
            let x = n
                .as_f64()
                .ok_or_else(|| OperatorError::Capability(format!("{n} is not representable as f64")))?;
            out.push(x);
            Ok(())
        }
        (None, other) => Err(OperatorError::Capability(format!(
            "expected a number, found {other}"
        ))),
        (Some((&len, rest)), Value::Array(elements)) if elements.len() == len => elements
            .iter()
            .try_for_each(|element| flatten_into(element, rest, out)),
        (Some((&len, _)), other) => Err(OperatorError::Capability(format!(
            "expected an array of length {len}, found {other}"
        ))),
    }
}

/// Render an `f64` array as nested JSON arrays.
///
/// Fails on NaN and infinities, which JSON numbers cannot hold, and on shapes
/// with a zero-length axis before the last one, whose trailing axes nested
/// arrays cannot express. Everything this accepts reads back through
/// [`array_from_json`] with the same shape and values.
pub fn array_to_json(array: &ArrayD<f64>) -> Result<Value, OperatorError> {
    let shape = array.shape();
    if let Some(axis) = shape.iter().position(|&len| len == 0) {
        if axis + 1 < shape.len() {
            return Err(OperatorError::UnrepresentableShape {
                shape: shape.to_vec(),
            });
        }
    }
    view_to_json(&array.view())
}

fn view_to_json(view: &ArrayViewD<'_, f64>) -> Result<Value, OperatorError> {
    if view.ndim() == 0 {
        let &x = view
            .iter()
            .next()
            .ok_or_else(|| OperatorError::Capability("rank-0 array without an element".into()))?;
        return Number::from_f64(x)
            .map(Value::Number)
            .ok_or(OperatorError::NonFinite { value: x });
    }
    view.outer_iter()
        .map(|sub| view_to_json(&sub))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
