//! # Check Subcommand
//!
//! Tests whether an array is antisymmetric under a spec: for every signed
//! axis permutation `(s, σ)` the operator would sum, `x.permute_axes(σ)`
//! must equal `s · x` within the tolerance.
//!
//! Exits with status 0 when it is and 1 when it is not.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use ndarray::ArrayD;
use serde::Serialize;

use tensorshuffle_core::SignedPermutation;
use tensorshuffle_operator::{AxisPermutable, Operator, SymmetrySpec};

use crate::{format_items, read_operand, write_json};

/// Arguments for `tensorshuffle check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Symmetry spec, e.g. "0/1/2/3".
    pub spec: SymmetrySpec,

    /// JSON file holding the operand, or `-` for stdin.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Largest absolute elementwise deviation still counted as equal.
    #[arg(long, default_value_t = 1e-9)]
    pub tolerance: f64,

    /// Emit a JSON report.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of an antisymmetry check.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub spec: SymmetrySpec,
    pub antisymmetric: bool,
    pub max_deviation: f64,
    /// The permutation with the largest deviation, if any exceeded the tolerance.
    pub worst: Option<SignedPermutation<usize>>,
}

/// Compare `operand` with its signed permuted copies.
pub fn check_antisymmetry(
    spec: &SymmetrySpec,
    operand: &ArrayD<f64>,
    tolerance: f64,
) -> Result<CheckReport> {
    let operator = Operator::from_spec(spec.clone())?;
    let mut max_deviation = 0.0_f64;
    let mut worst = None;

    for p in operator.signed_axis_permutations(operand.ndim())? {
        let permuted = operand.permute_axes(&p.items);
        if permuted.shape() != operand.shape() {
            bail!(
                "axes {} of an array with shape {:?} cannot be permuted into each other",
                format_items(&p.items),
                operand.shape()
            );
        }
        let deviation = permuted
            .iter()
            .zip(operand.iter())
            .map(|(a, b)| (a - p.sign.as_f64() * b).abs())
            .fold(0.0, f64::max);
        tracing::debug!(sign = %p.sign, axes = ?p.items, deviation, "compared permuted copy");
        if deviation > max_deviation {
            max_deviation = deviation;
            if deviation > tolerance {
                worst = Some(p);
            }
        }
    }

    Ok(CheckReport {
        spec: spec.clone(),
        antisymmetric: max_deviation <= tolerance,
        max_deviation,
        worst,
    })
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let operand = read_operand(&args.input)?;
    let report = check_antisymmetry(&args.spec, &operand, args.tolerance)?;

    if args.json {
        write_json(out, &report)?;
    } else if report.antisymmetric {
        writeln!(
            out,
            "antisymmetric under {} (max deviation {:e})",
            report.spec, report.max_deviation
        )?;
    } else {
        writeln!(
            out,
            "not antisymmetric under {} (max deviation {:e})",
            report.spec, report.max_deviation
        )?;
        if let Some(p) = &report.worst {
            writeln!(out, "worst permutation: {}  {}", p.sign, format_items(&p.items))?;
        }
    }
    Ok(if report.antisymmetric { 0 } else { 1 })
}
